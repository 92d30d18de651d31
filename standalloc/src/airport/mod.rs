//! Airport stand configuration.
//!
//! Each airport is described by a JSON document `<ICAO>.json` whose
//! `Stands` object lists the stands in preference order:
//!
//! ```json
//! {
//!   "version": "2024.1",
//!   "Stands": {
//!     "K3": { "Code": "ABC", "Use": "AC", "Schengen": true, "Block": ["K4"] },
//!     "G1": { "Apron": true }
//!   }
//! }
//! ```
//!
//! [`AirportConfigStore`] loads these documents on demand and reloads them
//! when their `version` changes.

mod config;
mod error;
mod stand;
mod store;

pub use config::AirportConfig;
pub use error::AirportConfigError;
pub use stand::{StandDefinition, StandPosition, DEFAULT_STAND_RADIUS_M};
pub use store::{normalize_icao, AirportConfigStore, StandConfigSource};
