//! Logger trait definition.

use std::fmt::{self, Arguments};

/// Log level for filtering messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Verbose debugging information
    Trace,
    /// Debugging information
    Debug,
    /// General information
    Info,
    /// Warning messages
    Warn,
    /// Error messages
    Error,
}

impl LogLevel {
    /// Upper-case label used in log records ("INFO", "WARN", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category attached to a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogCategory {
    /// Stand assignment decisions.
    Assignment,
    /// Airport configuration loading.
    Config,
    /// Process lifecycle (startup, shutdown, reloads).
    System,
}

impl LogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogCategory::Assignment => "Assignment",
            LogCategory::Config => "Config",
            LogCategory::System => "System",
        }
    }
}

/// Structured tags carried alongside a log message.
///
/// Tags let sinks index records by airport and flight without parsing the
/// message text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogTags<'a> {
    /// Airport ICAO code the record relates to.
    pub icao: Option<&'a str>,
    /// Flight callsign the record relates to.
    pub callsign: Option<&'a str>,
    /// Record category.
    pub category: Option<LogCategory>,
}

impl<'a> LogTags<'a> {
    /// Tags with no fields set.
    pub const NONE: LogTags<'static> = LogTags {
        icao: None,
        callsign: None,
        category: None,
    };

    /// Tags for an assignment record of `callsign` at `icao`.
    pub fn assignment(icao: &'a str, callsign: &'a str) -> Self {
        Self {
            icao: Some(icao),
            callsign: Some(callsign),
            category: Some(LogCategory::Assignment),
        }
    }

    /// Tags for a configuration record of `icao`.
    pub fn config(icao: &'a str) -> Self {
        Self {
            icao: Some(icao),
            callsign: None,
            category: Some(LogCategory::Config),
        }
    }

    /// Tags for a system record.
    pub fn system() -> Self {
        Self {
            category: Some(LogCategory::System),
            ..Self::default()
        }
    }
}

/// Logging interface for application components.
///
/// This trait provides a logging abstraction that allows components to log
/// messages without depending on a specific logging implementation.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across threads.
///
/// # Example
///
/// ```
/// use standalloc::log::{Logger, LogTags, NoOpLogger};
/// use standalloc::{log_info, log_warn};
/// use std::sync::Arc;
///
/// let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
/// log_info!(logger, "Engine started");
/// log_warn!(logger, tags = LogTags::config("LFPG"), "Config missing");
/// ```
pub trait Logger: Send + Sync {
    /// Log a tagged message at the specified level.
    ///
    /// This is the core method that implementations must provide.
    /// The convenience methods delegate to it.
    fn log(&self, level: LogLevel, tags: &LogTags<'_>, args: Arguments<'_>);

    /// Log a trace-level message.
    fn trace(&self, tags: &LogTags<'_>, args: Arguments<'_>) {
        self.log(LogLevel::Trace, tags, args);
    }

    /// Log a debug-level message.
    fn debug(&self, tags: &LogTags<'_>, args: Arguments<'_>) {
        self.log(LogLevel::Debug, tags, args);
    }

    /// Log an info-level message.
    fn info(&self, tags: &LogTags<'_>, args: Arguments<'_>) {
        self.log(LogLevel::Info, tags, args);
    }

    /// Log a warning-level message.
    fn warn(&self, tags: &LogTags<'_>, args: Arguments<'_>) {
        self.log(LogLevel::Warn, tags, args);
    }

    /// Log an error-level message.
    fn error(&self, tags: &LogTags<'_>, args: Arguments<'_>) {
        self.log(LogLevel::Error, tags, args);
    }
}

/// Convenience macros for logging with format strings.
///
/// Each macro accepts an optional `tags = <LogTags>` argument before the
/// format string.
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, tags = $tags:expr, $($arg:tt)*) => {
        $logger.trace(&$tags, format_args!($($arg)*))
    };
    ($logger:expr, $($arg:tt)*) => {
        $logger.trace(&$crate::log::LogTags::NONE, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, tags = $tags:expr, $($arg:tt)*) => {
        $logger.debug(&$tags, format_args!($($arg)*))
    };
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&$crate::log::LogTags::NONE, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, tags = $tags:expr, $($arg:tt)*) => {
        $logger.info(&$tags, format_args!($($arg)*))
    };
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&$crate::log::LogTags::NONE, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, tags = $tags:expr, $($arg:tt)*) => {
        $logger.warn(&$tags, format_args!($($arg)*))
    };
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&$crate::log::LogTags::NONE, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, tags = $tags:expr, $($arg:tt)*) => {
        $logger.error(&$tags, format_args!($($arg)*))
    };
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(&$crate::log::LogTags::NONE, format_args!($($arg)*))
    };
}
