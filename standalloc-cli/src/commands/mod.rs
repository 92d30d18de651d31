//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`airports`] - List configured airports
//! - [`assign`] - Assign stands to a pilot list (optionally watching for changes)
//! - [`config`] - Configuration management (get, set, list, path)
//! - [`stands`] - Show the stand table of one airport

pub mod airports;
pub mod assign;
pub mod config;
pub mod stands;
