//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Airport stand configuration settings
    pub airports: AirportsSettings,
    /// Allocation engine settings
    pub engine: EngineSettings,
    /// Logging settings
    pub logging: LoggingSettings,
    /// Watch mode settings
    pub watch: WatchSettings,
}

/// Airport configuration source.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportsSettings {
    /// Directory holding one `<ICAO>.json` stand configuration per airport.
    pub directory: PathBuf,
}

/// Allocation engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Write a filter trace when a flight first gets no suitable stand.
    pub dump_enabled: bool,
    /// Directory receiving the filter traces.
    pub dump_directory: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

/// Watch mode configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchSettings {
    /// Seconds between airport config version checks.
    /// Default: 10
    pub interval_secs: u64,
}
