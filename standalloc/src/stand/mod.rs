//! Stand allocation.
//!
//! [`StandEngine::assign`] resolves a flight, filters its destination's
//! stand table, reduces the survivors by priority and picks a winner:
//!
//! 1. `Code`, `Use`, `Schengen`, `Countries` and `Callsigns` must all accept
//!    the flight, and the stand must be neither occupied nor blocked at the
//!    airport ([`filter`]).
//! 2. Only survivors at the lowest declared `Priority` remain ([`select`]).
//! 3. The survivor with the narrowest `Code` wins, earlier stands first.
//!
//! Non-apron winners are recorded in the [`Ledger`] together with the stands
//! they block.

mod category;
mod dump;
mod engine;
pub mod filter;
mod ledger;
mod outcome;
pub mod select;
mod stats;

pub use category::{usage_accepts, usage_letter, UNMAPPED_USAGE};
pub use dump::{DiagnosticDump, DumpReport, FileDump, NoDump};
pub use engine::StandEngine;
pub use filter::{FilterContext, Rejection};
pub use ledger::{EngineStatus, Ledger, LedgerSnapshot, StandRecord};
pub use outcome::{AssignOutcome, ConfigFault};
pub use stats::{HourCounts, HourlyCount, HourlyStats, StatEvent, STATS_WINDOW_HOURS};
