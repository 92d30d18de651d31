//! Error type for airport configuration loading.

use std::path::PathBuf;

/// Error returned when an airport configuration cannot be resolved.
#[derive(Debug, thiserror::Error)]
pub enum AirportConfigError {
    /// The ICAO code is not a four-character airport code.
    #[error("Invalid ICAO code: '{0}'")]
    InvalidIcao(String),

    /// No configuration file exists for the airport.
    #[error("Airport config not found at: {0}")]
    NotFound(PathBuf),

    /// The configuration document is not valid.
    #[error("Failed to parse airport config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
