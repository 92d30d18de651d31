//! Tracing library adapter implementation.

use crate::log::{LogLevel, LogTags, Logger};
use std::fmt::Arguments;

/// Logger implementation that delegates to the `tracing` crate.
///
/// Tags are emitted as structured fields (`icao`, `callsign`, `category`),
/// so subscribers can filter on them. Absent tags are recorded as empty.
///
/// # Example
///
/// ```ignore
/// use standalloc::log::{Logger, TracingLogger};
/// use std::sync::Arc;
///
/// // Assumes tracing subscriber is already initialized
/// let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a new tracing logger adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, tags: &LogTags<'_>, args: Arguments<'_>) {
        let icao = tags.icao.unwrap_or_default();
        let callsign = tags.callsign.unwrap_or_default();
        let category = tags.category.map(|c| c.as_str()).unwrap_or_default();

        match level {
            LogLevel::Trace => tracing::trace!(icao, callsign, category, "{}", args),
            LogLevel::Debug => tracing::debug!(icao, callsign, category, "{}", args),
            LogLevel::Info => tracing::info!(icao, callsign, category, "{}", args),
            LogLevel::Warn => tracing::warn!(icao, callsign, category, "{}", args),
            LogLevel::Error => tracing::error!(icao, callsign, category, "{}", args),
        }
    }
}
