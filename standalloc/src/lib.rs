//! StandAlloc - Airport stand allocation for simulated air traffic
//!
//! This library assigns parking stands to arriving flights from per-airport
//! stand eligibility tables, and keeps the occupancy and blocking ledgers
//! that stop two flights from sharing a stand.
//!
//! # High-Level API
//!
//! ```ignore
//! use standalloc::airport::AirportConfigStore;
//! use standalloc::pilot::InMemoryPilotDirectory;
//! use standalloc::stand::StandEngine;
//!
//! let configs = Arc::new(AirportConfigStore::new("~/.standalloc/airports"));
//! let pilots = Arc::new(InMemoryPilotDirectory::from_file("pilots.json")?);
//! let engine = StandEngine::new(configs, pilots);
//!
//! let outcome = engine.assign("AFR123");
//! ```

pub mod airport;
pub mod config;
pub mod log;
pub mod logging;
pub mod pilot;
pub mod stand;

/// Version of the StandAlloc library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
