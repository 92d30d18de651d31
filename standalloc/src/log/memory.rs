//! In-memory logger keeping the most recent records.

use std::collections::VecDeque;
use std::fmt::Arguments;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};

use crate::log::{LogCategory, LogLevel, LogTags, Logger};

/// Default number of records retained by [`MemoryLogger`].
pub const DEFAULT_MEMORY_LOG_CAPACITY: usize = 1_000;

/// A log record captured by [`MemoryLogger`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub icao: Option<String>,
    pub callsign: Option<String>,
    pub category: Option<LogCategory>,
}

/// Criteria for querying captured records. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub level: Option<LogLevel>,
    pub icao: Option<String>,
    pub callsign: Option<String>,
    pub category: Option<LogCategory>,
}

impl LogFilter {
    /// Match records at exactly `level`.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Match records tagged with `callsign`.
    pub fn callsign(mut self, callsign: impl Into<String>) -> Self {
        self.callsign = Some(callsign.into());
        self
    }

    /// Match records tagged with `icao`.
    pub fn icao(mut self, icao: impl Into<String>) -> Self {
        self.icao = Some(icao.into());
        self
    }

    /// Match records in `category`.
    pub fn category(mut self, category: LogCategory) -> Self {
        self.category = Some(category);
        self
    }

    fn matches(&self, entry: &LogEntry) -> bool {
        self.level.map_or(true, |l| entry.level == l)
            && self
                .icao
                .as_deref()
                .map_or(true, |i| entry.icao.as_deref() == Some(i))
            && self
                .callsign
                .as_deref()
                .map_or(true, |c| entry.callsign.as_deref() == Some(c))
            && self.category.map_or(true, |c| entry.category == Some(c))
    }
}

/// Logger retaining a bounded history of records in memory.
///
/// Oldest records are evicted once `capacity` is reached. Records can
/// optionally be forwarded to another logger, so the memory sink can sit in
/// front of [`TracingLogger`](crate::log::TracingLogger).
pub struct MemoryLogger {
    entries: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
    forward: Option<Arc<dyn Logger>>,
}

impl MemoryLogger {
    /// Create a memory logger with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_LOG_CAPACITY)
    }

    /// Create a memory logger retaining at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
            forward: None,
        }
    }

    /// Forward every record to `logger` after capturing it.
    pub fn with_forward(mut self, logger: Arc<dyn Logger>) -> Self {
        self.forward = Some(logger);
        self
    }

    /// All retained records, oldest first.
    pub fn recent(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }

    /// Retained records matching `filter`, oldest first.
    pub fn query(&self, filter: &LogFilter) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    /// Number of retained records matching `filter`.
    pub fn count(&self, filter: &LogFilter) -> usize {
        self.lock().iter().filter(|e| filter.matches(e)).count()
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop all retained records.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLogger")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("forwarding", &self.forward.is_some())
            .finish()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, tags: &LogTags<'_>, args: Arguments<'_>) {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            message: args.to_string(),
            icao: tags.icao.map(str::to_string),
            callsign: tags.callsign.map(str::to_string),
            category: tags.category,
        };

        {
            let mut entries = self.lock();
            if entries.len() == self.capacity {
                entries.pop_front();
            }
            entries.push_back(entry);
        }

        if let Some(forward) = &self.forward {
            forward.log(level, tags, args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{log_info, log_warn};

    #[test]
    fn test_captures_message_and_tags() {
        let logger = MemoryLogger::new();
        log_warn!(
            logger,
            tags = LogTags::assignment("LFPG", "AFR123"),
            "No suitable stand found for {}",
            "AFR123"
        );

        let entries = logger.recent();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Warn);
        assert_eq!(entries[0].message, "No suitable stand found for AFR123");
        assert_eq!(entries[0].icao.as_deref(), Some("LFPG"));
        assert_eq!(entries[0].callsign.as_deref(), Some("AFR123"));
        assert_eq!(entries[0].category, Some(LogCategory::Assignment));
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let logger = MemoryLogger::with_capacity(2);
        log_info!(logger, "one");
        log_info!(logger, "two");
        log_info!(logger, "three");

        let messages: Vec<_> = logger.recent().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_filter_by_level_and_callsign() {
        let logger = MemoryLogger::new();
        log_warn!(logger, tags = LogTags::assignment("EGLL", "BAW1"), "a");
        log_warn!(logger, tags = LogTags::assignment("EGLL", "BAW2"), "b");
        log_info!(logger, tags = LogTags::assignment("EGLL", "BAW1"), "c");

        let filter = LogFilter::default().level(LogLevel::Warn).callsign("BAW1");
        assert_eq!(logger.count(&filter), 1);
        assert_eq!(logger.query(&filter)[0].message, "a");
        assert_eq!(logger.count(&LogFilter::default().icao("EGLL")), 3);
        assert_eq!(
            logger.count(&LogFilter::default().category(LogCategory::Config)),
            0
        );
    }

    #[test]
    fn test_forwards_to_inner_logger() {
        let inner = Arc::new(MemoryLogger::new());
        let logger = MemoryLogger::new().with_forward(inner.clone());
        log_info!(logger, "forwarded");

        assert_eq!(logger.len(), 1);
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn test_clear() {
        let logger = MemoryLogger::new();
        log_info!(logger, "x");
        logger.clear();
        assert!(logger.is_empty());
    }
}
