//! Application configuration for StandAlloc.
//!
//! Settings are read from `~/.standalloc/config.ini`, one struct per INI
//! section:
//!
//! - `[airports]` - where the per-airport stand configurations live
//! - `[engine]` - diagnostic dump behavior of the allocation engine
//! - `[logging]` - log file location
//! - `[watch]` - config version polling interval
//!
//! Airport stand tables themselves are JSON documents handled by
//! [`crate::airport`].
//!
//! # Example
//!
//! ```
//! use standalloc::config::{ConfigFile, ConfigKey};
//!
//! let mut config = ConfigFile::default();
//! let key: ConfigKey = "watch.interval_secs".parse().unwrap();
//! key.set(&mut config, "30").unwrap();
//! assert_eq!(key.get(&config), "30");
//! ```

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{AirportsSettings, ConfigFile, EngineSettings, LoggingSettings, WatchSettings};
