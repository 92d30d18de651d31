//! Configuration file handling for ~/.standalloc/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use super::settings::*;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load `~/.standalloc/config.ini`. See [`load_from`](Self::load_from).
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields [`ConfigFile::default`]. Keys absent from an
    /// existing file keep their defaults. A file that cannot be parsed, or a
    /// value that fails validation, is an error so callers never save over it.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.standalloc/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }
}

/// Get the path to the config directory (~/.standalloc).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".standalloc")
}

/// Get the path to the config file (~/.standalloc/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_WATCH_INTERVAL_SECS;

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, "[engine]\ndump_enabled = false\n").unwrap();

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert!(!config.engine.dump_enabled);
        assert_eq!(config.watch, ConfigFile::default().watch);
        assert_eq!(config.airports, ConfigFile::default().airports);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.airports.directory = temp_dir.path().join("airports");
        config.engine.dump_enabled = false;
        config.watch.interval_secs = 30;
        config.save_to(&config_path).unwrap();

        let loaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(loaded.airports.directory, temp_dir.path().join("airports"));
        assert!(!loaded.engine.dump_enabled);
        assert_eq!(loaded.watch.interval_secs, 30);
        assert_ne!(loaded.watch.interval_secs, DEFAULT_WATCH_INTERVAL_SECS);
    }

    #[test]
    fn test_invalid_value_reports_section_and_key() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, "[watch]\ninterval_secs = soon\n").unwrap();

        let err = ConfigFile::load_from(&config_path).unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref section, ref key, .. }
                if section == "watch" && key == "interval_secs"
        ));
    }
}
