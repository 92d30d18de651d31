//! No-operation logger implementation.

use crate::log::{LogLevel, LogTags, Logger};
use std::fmt::Arguments;

/// A logger that discards all messages.
///
/// Useful for unit tests and for embedding the engine where the host
/// already reports outcomes itself.
///
/// # Example
///
/// ```
/// use standalloc::log::{Logger, LogTags, NoOpLogger};
/// use std::sync::Arc;
///
/// let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
/// logger.info(&LogTags::NONE, format_args!("This message is discarded"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _tags: &LogTags<'_>, _args: Arguments<'_>) {}
}
