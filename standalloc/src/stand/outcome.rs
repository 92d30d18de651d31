//! Result of one assignment call.

use std::fmt;

/// Why an airport configuration could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigFault {
    /// The configuration could not be resolved.
    Unavailable(String),
    /// The configuration has no `Stands` section.
    MissingStands,
}

impl fmt::Display for ConfigFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFault::Unavailable(reason) => write!(f, "config unavailable: {}", reason),
            ConfigFault::MissingStands => f.write_str("no stand section in config"),
        }
    }
}

/// What [`StandEngine::assign`](super::StandEngine::assign) decided.
///
/// The pilot record is updated in every case; the outcome only reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    /// A stand was selected for the flight.
    Assigned {
        stand: String,
        /// Stands newly blocked by this assignment.
        blocked: Vec<String>,
        apron: bool,
    },
    /// The flight already occupied a stand at its destination.
    Reused { stand: String },
    /// No stand survived filtering; the stand was cleared.
    Unavailable,
    /// The destination configuration was unusable; the stand was cleared.
    ConfigError(ConfigFault),
    /// The callsign is not in the pilot directory.
    UnknownCallsign,
}

impl AssignOutcome {
    /// Stand now held by the flight, if any.
    pub fn stand(&self) -> Option<&str> {
        match self {
            AssignOutcome::Assigned { stand, .. } | AssignOutcome::Reused { stand } => Some(stand),
            _ => None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.stand().is_some()
    }
}

impl fmt::Display for AssignOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignOutcome::Assigned { stand, apron: true, .. } => write!(f, "{} (apron)", stand),
            AssignOutcome::Assigned { stand, .. } => f.write_str(stand),
            AssignOutcome::Reused { stand } => write!(f, "{} (kept)", stand),
            AssignOutcome::Unavailable => f.write_str("no suitable stand"),
            AssignOutcome::ConfigError(fault) => fault.fmt(f),
            AssignOutcome::UnknownCallsign => f.write_str("unknown callsign"),
        }
    }
}
