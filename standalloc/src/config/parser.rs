//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::defaults::clamp_watch_interval;
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [airports] section
    if let Some(section) = ini.section(Some("airports")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.airports.directory = expand_tilde(v);
            }
        }
    }

    // [engine] section
    if let Some(section) = ini.section(Some("engine")) {
        if let Some(v) = section.get("dump_enabled") {
            config.engine.dump_enabled = parse_bool(v).ok_or_else(|| {
                ConfigFileError::InvalidValue {
                    section: "engine".to_string(),
                    key: "dump_enabled".to_string(),
                    value: v.to_string(),
                    reason: "must be true or false".to_string(),
                }
            })?;
        }
        if let Some(v) = section.get("dump_directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.engine.dump_directory = expand_tilde(v);
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    // [watch] section
    if let Some(section) = ini.section(Some("watch")) {
        if let Some(v) = section.get("interval_secs") {
            let parsed: u64 = v.trim().parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "watch".to_string(),
                key: "interval_secs".to_string(),
                value: v.to_string(),
                reason: "must be a positive integer (seconds)".to_string(),
            })?;
            config.watch.interval_secs = clamp_watch_interval(parsed);
        }
    }

    Ok(config)
}

/// Parse a boolean config value.
///
/// Accepts true/false, yes/no, 1/0 and on/off, case-insensitively.
pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
