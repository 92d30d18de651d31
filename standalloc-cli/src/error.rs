//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use standalloc::airport::AirportConfigError;
use standalloc::config::ConfigFileError;
use standalloc::pilot::PilotFileError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Airport configuration could not be read
    Airport(AirportConfigError),
    /// Pilot list could not be read
    Pilots { path: PathBuf, error: PilotFileError },
    /// Async runtime failure
    Runtime(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Airport(AirportConfigError::NotFound(_))
            | CliError::Airport(AirportConfigError::Io(_)) => {
                eprintln!();
                eprintln!("Airport configs are read from <directory>/<ICAO>.json.");
                eprintln!("Set the directory with: standalloc config set airports.directory <path>");
            }
            CliError::Pilots { .. } => {
                eprintln!();
                eprintln!("The pilot file must be a JSON array of objects with at least");
                eprintln!("'callsign' and 'destination' fields.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Airport(e) => write!(f, "Airport configuration error: {}", e),
            CliError::Pilots { path, error } => {
                write!(f, "Failed to load pilots from '{}': {}", path.display(), error)
            }
            CliError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Airport(e) => Some(e),
            CliError::Pilots { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<AirportConfigError> for CliError {
    fn from(e: AirportConfigError) -> Self {
        CliError::Airport(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pilots_error() {
        let err = CliError::Pilots {
            path: PathBuf::from("pilots.json"),
            error: PilotFileError::NotFound(PathBuf::from("pilots.json")),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load pilots from 'pilots.json': Pilot file not found: pilots.json"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_from_airport_error() {
        let err: CliError = AirportConfigError::InvalidIcao("XX".into()).into();
        assert_eq!(
            err.to_string(),
            "Airport configuration error: Invalid ICAO code: 'XX'"
        );
    }
}
