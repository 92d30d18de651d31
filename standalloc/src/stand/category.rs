//! Aircraft type to stand usage letter table.

use crate::pilot::AircraftType;

/// Usage letter of aircraft types without a category.
///
/// Never appears in a `Use` string, so such flights fail every stand that
/// declares one.
pub const UNMAPPED_USAGE: char = '\0';

/// Usage letter checked against a stand's `Use` string.
pub fn usage_letter(aircraft_type: AircraftType) -> char {
    match aircraft_type {
        AircraftType::Airliner => 'A',
        AircraftType::GeneralAviation => 'P',
        AircraftType::Helicopter => 'H',
        AircraftType::Military => 'M',
        AircraftType::Cargo => 'C',
        AircraftType::Unknown => UNMAPPED_USAGE,
    }
}

/// Whether a stand declaring `usage` accepts flights with `letter`.
pub fn usage_accepts(usage: &str, letter: char) -> bool {
    letter != UNMAPPED_USAGE && usage.contains(letter)
}
