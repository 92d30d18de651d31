//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[airports]
; Directory holding one <ICAO>.json stand configuration per airport
; Each file carries an optional "version" and a "Stands" object
directory = {}

[engine]
; Write a filter trace to dump_directory the first time a flight gets no stand
dump_enabled = {}
; Directory receiving <CALLSIGN>_<ICAO>.log filter traces
dump_directory = {}

[logging]
; Log file path (cleared at the start of every session)
file = {}

[watch]
; Seconds between airport config version checks in watch mode (minimum: 1)
interval_secs = {}
"#,
        path_to_string(&config.airports.directory),
        config.engine.dump_enabled,
        path_to_string(&config.engine.dump_directory),
        path_to_string(&config.logging.file),
        config.watch.interval_secs,
    )
}

/// Render a path, collapsing the home directory back to `~`.
pub(super) fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}
