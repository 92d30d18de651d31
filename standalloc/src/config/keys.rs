//! Configuration key access and validation.
//!
//! This module provides a type-safe interface for getting and setting
//! configuration values by `section.key` name.

use std::str::FromStr;
use thiserror::Error;

use super::defaults::MIN_WATCH_INTERVAL_SECS;
use super::file::ConfigFile;
use super::parser::{expand_tilde, parse_bool};
use super::writer::path_to_string;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
///
/// Each key maps to a specific field in [`ConfigFile`] and knows how to
/// get and set its value with proper validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    AirportsDirectory,
    EngineDumpEnabled,
    EngineDumpDirectory,
    LoggingFile,
    WatchIntervalSecs,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "airports.directory" => Ok(ConfigKey::AirportsDirectory),
            "engine.dump_enabled" => Ok(ConfigKey::EngineDumpEnabled),
            "engine.dump_directory" => Ok(ConfigKey::EngineDumpDirectory),
            "logging.file" => Ok(ConfigKey::LoggingFile),
            "watch.interval_secs" => Ok(ConfigKey::WatchIntervalSecs),
            _ => Err(ConfigKeyError::UnknownKey(s.to_string())),
        }
    }
}

impl ConfigKey {
    /// All keys in display order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::AirportsDirectory,
            ConfigKey::EngineDumpEnabled,
            ConfigKey::EngineDumpDirectory,
            ConfigKey::LoggingFile,
            ConfigKey::WatchIntervalSecs,
        ]
    }

    /// Full key name in `section.key` form.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::AirportsDirectory => "airports.directory",
            ConfigKey::EngineDumpEnabled => "engine.dump_enabled",
            ConfigKey::EngineDumpDirectory => "engine.dump_directory",
            ConfigKey::LoggingFile => "logging.file",
            ConfigKey::WatchIntervalSecs => "watch.interval_secs",
        }
    }

    /// INI section of the key.
    pub fn section(&self) -> &'static str {
        self.name().split_once('.').map_or("", |(s, _)| s)
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        self.name().split_once('.').map_or("", |(_, k)| k)
    }

    /// What the key controls.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigKey::AirportsDirectory => "Directory holding one <ICAO>.json stand table per airport",
            ConfigKey::EngineDumpEnabled => {
                "Write a filter trace the first time a flight gets no stand"
            }
            ConfigKey::EngineDumpDirectory => "Where <CALLSIGN>_<ICAO>.log filter traces are written",
            ConfigKey::LoggingFile => "Log file, cleared at the start of each command",
            ConfigKey::WatchIntervalSecs => {
                "Seconds between airport config version checks in assign --watch"
            }
        }
    }

    /// Value of the key in a default configuration.
    pub fn default_value(&self) -> String {
        self.get(&ConfigFile::default())
    }

    /// Current value rendered as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::AirportsDirectory => path_to_string(&config.airports.directory),
            ConfigKey::EngineDumpEnabled => config.engine.dump_enabled.to_string(),
            ConfigKey::EngineDumpDirectory => path_to_string(&config.engine.dump_directory),
            ConfigKey::LoggingFile => path_to_string(&config.logging.file),
            ConfigKey::WatchIntervalSecs => config.watch.interval_secs.to_string(),
        }
    }

    /// Validate `value` and store it into `config`.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        let value = value.trim();
        match self {
            ConfigKey::AirportsDirectory => {
                config.airports.directory = self.non_empty_path(value)?;
            }
            ConfigKey::EngineDumpEnabled => {
                config.engine.dump_enabled =
                    parse_bool(value).ok_or_else(|| self.invalid("must be true or false"))?;
            }
            ConfigKey::EngineDumpDirectory => {
                config.engine.dump_directory = self.non_empty_path(value)?;
            }
            ConfigKey::LoggingFile => {
                config.logging.file = self.non_empty_path(value)?;
            }
            ConfigKey::WatchIntervalSecs => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| self.invalid("must be a positive integer (seconds)"))?;
                if secs < MIN_WATCH_INTERVAL_SECS {
                    return Err(self.invalid("must be at least 1 second"));
                }
                config.watch.interval_secs = secs;
            }
        }
        Ok(())
    }

    fn non_empty_path(&self, value: &str) -> Result<std::path::PathBuf, ConfigKeyError> {
        if value.is_empty() {
            return Err(self.invalid("path must not be empty"));
        }
        Ok(expand_tilde(value))
    }

    fn invalid(&self, reason: &str) -> ConfigKeyError {
        ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_known_keys() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
        assert_eq!(
            "WATCH.Interval_Secs".parse::<ConfigKey>().unwrap(),
            ConfigKey::WatchIntervalSecs
        );
    }

    #[test]
    fn test_unknown_key() {
        assert!(matches!(
            "cache.directory".parse::<ConfigKey>(),
            Err(ConfigKeyError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_section_and_key_name() {
        assert_eq!(ConfigKey::EngineDumpEnabled.section(), "engine");
        assert_eq!(ConfigKey::EngineDumpEnabled.key_name(), "dump_enabled");
    }

    #[test]
    fn test_every_key_is_described() {
        for key in ConfigKey::all() {
            assert!(!key.description().is_empty(), "{}", key.name());
        }
        assert_eq!(ConfigKey::WatchIntervalSecs.default_value(), "10");
    }

    #[test]
    fn test_set_and_get() {
        let mut config = ConfigFile::default();

        ConfigKey::AirportsDirectory
            .set(&mut config, "/srv/airports")
            .unwrap();
        ConfigKey::EngineDumpEnabled.set(&mut config, "off").unwrap();
        ConfigKey::WatchIntervalSecs.set(&mut config, "20").unwrap();

        assert_eq!(config.airports.directory, PathBuf::from("/srv/airports"));
        assert_eq!(ConfigKey::EngineDumpEnabled.get(&config), "false");
        assert_eq!(ConfigKey::WatchIntervalSecs.get(&config), "20");
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = ConfigFile::default();
        assert!(ConfigKey::WatchIntervalSecs.set(&mut config, "0").is_err());
        assert!(ConfigKey::WatchIntervalSecs.set(&mut config, "abc").is_err());
        assert!(ConfigKey::LoggingFile.set(&mut config, "  ").is_err());
        assert!(ConfigKey::EngineDumpEnabled.set(&mut config, "sure").is_err());
        assert_eq!(config, ConfigFile::default());
    }
}
