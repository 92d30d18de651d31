//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use super::file::config_directory;
use super::settings::*;

/// Default airport configuration directory name under the config directory.
pub const DEFAULT_AIRPORTS_DIR_NAME: &str = "airports";

/// Default diagnostic dump directory name under the config directory.
pub const DEFAULT_DUMP_DIR_NAME: &str = "dumps";

/// Default log file name under the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "standalloc.log";

/// Default diagnostic dump toggle.
pub const DEFAULT_DUMP_ENABLED: bool = true;

/// Default interval between airport config version checks (seconds).
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 10;

/// Minimum accepted watch interval (seconds).
pub const MIN_WATCH_INTERVAL_SECS: u64 = 1;

impl Default for ConfigFile {
    fn default() -> Self {
        let base = config_directory();
        Self {
            airports: AirportsSettings {
                directory: base.join(DEFAULT_AIRPORTS_DIR_NAME),
            },
            engine: EngineSettings {
                dump_enabled: DEFAULT_DUMP_ENABLED,
                dump_directory: base.join(DEFAULT_DUMP_DIR_NAME),
            },
            logging: LoggingSettings {
                file: base.join(DEFAULT_LOG_FILE_NAME),
            },
            watch: WatchSettings {
                interval_secs: DEFAULT_WATCH_INTERVAL_SECS,
            },
        }
    }
}

/// Clamps the watch interval to the minimum and logs a warning if clamped.
pub(super) fn clamp_watch_interval(value: u64) -> u64 {
    if value < MIN_WATCH_INTERVAL_SECS {
        tracing::warn!(
            requested = value,
            min = MIN_WATCH_INTERVAL_SECS,
            "watch.interval_secs below minimum, clamping to {}",
            MIN_WATCH_INTERVAL_SECS
        );
        MIN_WATCH_INTERVAL_SECS
    } else {
        value
    }
}
