//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and engine wiring to
//! reduce duplication across command handlers.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use standalloc::airport::AirportConfigStore;
use standalloc::config::ConfigFile;
use standalloc::log::{Logger, MemoryLogger, TracingLogger};
use standalloc::logging::{default_log_dir, default_log_file, init_logging_full, LoggingGuard};
use standalloc::pilot::PilotDirectory;
use standalloc::stand::{FileDump, StandEngine};
use tracing::info;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    /// Recent engine records, forwarded on to `tracing`
    recent: Arc<MemoryLogger>,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `verbose` - Echo log records to the console when stdout is a terminal
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    pub fn new(verbose: bool, debug_mode: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| default_log_dir().to_string());
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| default_log_file().to_string());

        // Piped output stays machine-readable
        let stdout_enabled = verbose && std::io::stdout().is_terminal();

        let logging_guard = init_logging_full(&log_dir, &log_file, stdout_enabled, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let recent = MemoryLogger::new().with_forward(Arc::new(TracingLogger::new()));

        Ok(Self {
            logging_guard,
            config,
            recent: Arc::new(recent),
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Records captured from the store and engine created by this runner.
    pub fn recent_log(&self) -> &MemoryLogger {
        &self.recent
    }

    fn logger(&self) -> Arc<dyn Logger> {
        self.recent.clone()
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("StandAlloc v{}", standalloc::VERSION);
        info!("StandAlloc CLI: {} command", command);
    }

    /// Airport directory: CLI argument first, then config.
    pub fn airports_dir(&self, cli_dir: Option<PathBuf>) -> PathBuf {
        cli_dir.unwrap_or_else(|| self.config.airports.directory.clone())
    }

    /// Create an airport config store logging through the recent-record buffer.
    pub fn create_store(&self, cli_dir: Option<PathBuf>) -> Arc<AirportConfigStore> {
        let directory = self.airports_dir(cli_dir);
        info!("Reading airport configs from {}", directory.display());
        Arc::new(AirportConfigStore::with_logger(directory, self.logger()))
    }

    /// Create the allocation engine, with file dumps when enabled in config.
    pub fn create_engine(
        &self,
        store: Arc<AirportConfigStore>,
        pilots: Arc<dyn PilotDirectory>,
        dump_enabled: bool,
    ) -> StandEngine {
        let engine = StandEngine::new(store, pilots).with_logger(self.logger());
        if dump_enabled && self.config.engine.dump_enabled {
            let directory = self.config.engine.dump_directory.clone();
            info!("Diagnostic dumps enabled in {}", directory.display());
            engine.with_dump(Arc::new(FileDump::new(directory)))
        } else {
            engine
        }
    }
}
