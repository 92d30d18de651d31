//! Logging abstraction layer.
//!
//! This module provides a logging interface that decouples the allocation
//! engine from specific logging implementations (like `tracing`).
//!
//! # Architecture
//!
//! - `Logger` trait: The interface that all components use for logging
//! - `LogTags`: Airport, callsign and category attached to each record
//! - `TracingLogger`: Production adapter that delegates to the `tracing` crate
//! - `MemoryLogger`: Bounded in-memory history of recent records
//! - `NoOpLogger`: Silent logger for testing and benchmarking
//!
//! # Usage
//!
//! Components that need logging should accept an `Arc<dyn Logger>` and use
//! the provided macros:
//!
//! ```
//! use standalloc::log::{Logger, LogTags, NoOpLogger};
//! use standalloc::{log_debug, log_info};
//! use std::sync::Arc;
//!
//! struct MyComponent {
//!     logger: Arc<dyn Logger>,
//! }
//!
//! impl MyComponent {
//!     fn do_work(&self, icao: &str) {
//!         log_info!(self.logger, tags = LogTags::config(icao), "Loading {}", icao);
//!         log_debug!(self.logger, "Work completed");
//!     }
//! }
//!
//! MyComponent { logger: Arc::new(NoOpLogger) }.do_work("LFBO");
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::{LogEntry, LogFilter, MemoryLogger, DEFAULT_MEMORY_LOG_CAPACITY};
pub use noop::NoOpLogger;
pub use r#trait::{LogCategory, LogLevel, LogTags, Logger};
pub use tracing_adapter::TracingLogger;
