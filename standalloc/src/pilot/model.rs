//! Flight records consumed by the allocation engine.

use serde::{Deserialize, Serialize};

/// Operational category of an aircraft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AircraftType {
    #[default]
    Airliner,
    #[serde(alias = "generalAviation")]
    GeneralAviation,
    Helicopter,
    Military,
    Cargo,
    /// Any type the feed reports that has no usage category.
    #[serde(other)]
    Unknown,
}

/// A flight as known to the pilot directory.
///
/// `stand` is empty until the engine assigns one; only the engine writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pilot {
    pub callsign: String,
    #[serde(default)]
    pub origin: String,
    pub destination: String,
    /// Aircraft size code matched against a stand's `Code`.
    #[serde(default)]
    pub aircraft_code: String,
    #[serde(default)]
    pub aircraft_type: AircraftType,
    #[serde(default)]
    pub stand: String,
    #[serde(default)]
    pub is_schengen: bool,
}

impl Pilot {
    pub fn new(callsign: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            callsign: callsign.into(),
            origin: String::new(),
            destination: destination.into(),
            aircraft_code: String::new(),
            aircraft_type: AircraftType::default(),
            stand: String::new(),
            is_schengen: false,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_aircraft_code(mut self, code: impl Into<String>) -> Self {
        self.aircraft_code = code.into();
        self
    }

    pub fn with_aircraft_type(mut self, aircraft_type: AircraftType) -> Self {
        self.aircraft_type = aircraft_type;
        self
    }

    pub fn with_schengen(mut self, is_schengen: bool) -> Self {
        self.is_schengen = is_schengen;
        self
    }

    /// Whether a stand is currently assigned.
    pub fn has_stand(&self) -> bool {
        !self.stand.is_empty()
    }

    /// Two-letter country prefix of the origin, empty when the origin is
    /// shorter than two characters.
    pub fn origin_country(&self) -> &str {
        prefix(&self.origin, 2).unwrap_or("")
    }

    /// Three-letter operator prefix of the callsign, if long enough.
    pub fn operator_prefix(&self) -> Option<&str> {
        prefix(&self.callsign, 3)
    }
}

/// First `n` characters of `s`, or `None` when `s` is shorter.
fn prefix(s: &str, n: usize) -> Option<&str> {
    match s.char_indices().nth(n) {
        Some((idx, _)) => Some(&s[..idx]),
        None if s.chars().count() == n => Some(s),
        None => None,
    }
}
