//! Stand eligibility predicates.
//!
//! Each predicate inspects one optional field of a [`StandDefinition`]; an
//! absent field never rejects. Candidates are checked in a fixed order and
//! the first failing predicate names the rejection.

use std::fmt;

use super::category::{usage_accepts, usage_letter};
use super::ledger::Ledger;
use crate::airport::StandDefinition;
use crate::pilot::Pilot;

/// Why a stand was removed from the candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Code { stand: String, pilot: String },
    Use { stand: String, pilot: char },
    Schengen { stand: bool, pilot: bool },
    Countries { stand: Vec<String>, pilot: String },
    Callsign { pilot: String },
    Occupied,
    Blocked,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Code { stand, pilot } => {
                write!(f, "code mismatch. Stand: {} Pilot: {}", stand, pilot)
            }
            Rejection::Use { stand, pilot } => {
                write!(f, "Use mismatch. Stand: {} Pilot: {}", stand, pilot.escape_default())
            }
            Rejection::Schengen { stand, pilot } => {
                write!(f, "Schengen mismatch. Stand: {} Pilot: {}", stand, pilot)
            }
            Rejection::Countries { stand, pilot } => {
                write!(f, "Countries mismatch. Stand: {} Pilot: {}", stand.join(","), pilot)
            }
            Rejection::Callsign { pilot } => write!(f, "Callsign mismatch. Pilot: {}", pilot),
            Rejection::Occupied => f.write_str("already occupied"),
            Rejection::Blocked => f.write_str("blocked"),
        }
    }
}

/// Flight and ledger state a candidate is checked against.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub pilot: &'a Pilot,
    pub icao: &'a str,
    pub ledger: &'a Ledger,
}

impl<'a> FilterContext<'a> {
    pub fn new(pilot: &'a Pilot, icao: &'a str, ledger: &'a Ledger) -> Self {
        Self { pilot, icao, ledger }
    }

    /// Check a stand against every predicate in order.
    pub fn check(&self, stand: &StandDefinition) -> Result<(), Rejection> {
        self.check_code(stand)?;
        self.check_use(stand)?;
        self.check_schengen(stand)?;
        self.check_countries(stand)?;
        self.check_callsigns(stand)?;
        self.check_ledger(stand)
    }

    fn check_code(&self, stand: &StandDefinition) -> Result<(), Rejection> {
        match stand.code.as_deref() {
            Some(code) if !code.contains(self.pilot.aircraft_code.as_str()) => {
                Err(Rejection::Code {
                    stand: code.to_string(),
                    pilot: self.pilot.aircraft_code.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    fn check_use(&self, stand: &StandDefinition) -> Result<(), Rejection> {
        let Some(usage) = stand.usage.as_deref() else {
            return Ok(());
        };
        let letter = usage_letter(self.pilot.aircraft_type);
        if usage_accepts(usage, letter) {
            Ok(())
        } else {
            Err(Rejection::Use {
                stand: usage.to_string(),
                pilot: letter,
            })
        }
    }

    fn check_schengen(&self, stand: &StandDefinition) -> Result<(), Rejection> {
        match stand.schengen {
            Some(schengen) if schengen != self.pilot.is_schengen => Err(Rejection::Schengen {
                stand: schengen,
                pilot: self.pilot.is_schengen,
            }),
            _ => Ok(()),
        }
    }

    fn check_countries(&self, stand: &StandDefinition) -> Result<(), Rejection> {
        let Some(countries) = stand.countries.as_deref() else {
            return Ok(());
        };
        let country = self.pilot.origin_country();
        if countries.iter().any(|c| c == country) {
            Ok(())
        } else {
            Err(Rejection::Countries {
                stand: countries.to_vec(),
                pilot: country.to_string(),
            })
        }
    }

    fn check_callsigns(&self, stand: &StandDefinition) -> Result<(), Rejection> {
        let Some(callsigns) = stand.callsigns.as_deref() else {
            return Ok(());
        };
        let accepted = self
            .pilot
            .operator_prefix()
            .is_some_and(|prefix| callsigns.iter().any(|c| c == prefix));
        if accepted {
            Ok(())
        } else {
            Err(Rejection::Callsign {
                pilot: self.pilot.callsign.clone(),
            })
        }
    }

    fn check_ledger(&self, stand: &StandDefinition) -> Result<(), Rejection> {
        if self.ledger.is_occupied(&stand.name, self.icao) {
            return Err(Rejection::Occupied);
        }
        if self.ledger.is_blocked(&stand.name, self.icao) {
            return Err(Rejection::Blocked);
        }
        Ok(())
    }
}

/// Stands of `stands` passing every predicate, in declaration order.
///
/// One line per removal is appended to `trace`.
pub fn eligible_stands<'s>(
    stands: &'s [StandDefinition],
    ctx: &FilterContext<'_>,
    trace: &mut Vec<String>,
) -> Vec<&'s StandDefinition> {
    trace.push(format!(
        "Total stands available before filtering: {}",
        stands.len()
    ));

    let survivors: Vec<&StandDefinition> = stands
        .iter()
        .filter(|stand| match ctx.check(stand) {
            Ok(()) => true,
            Err(rejection) => {
                trace.push(removal_line(&stand.name, &rejection));
                false
            }
        })
        .collect();

    trace.push(format!(
        "Total stands available after filtering: {}",
        survivors.len()
    ));
    survivors
}

fn removal_line(name: &str, rejection: &Rejection) -> String {
    match rejection {
        Rejection::Occupied | Rejection::Blocked => {
            format!("Removing stand {} because it is {}.", name, rejection)
        }
        other => format!("Removing stand {} due to {}", name, other),
    }
}
