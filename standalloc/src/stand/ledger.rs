//! Occupancy and blocking ledgers.

use serde::Serialize;

use super::stats::HourCounts;

/// A stand held on behalf of a flight at one airport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StandRecord {
    pub name: String,
    pub icao: String,
    pub callsign: String,
}

impl StandRecord {
    pub fn new(
        name: impl Into<String>,
        icao: impl Into<String>,
        callsign: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            icao: icao.into(),
            callsign: callsign.into(),
        }
    }
}

/// Occupied and blocked stands across all airports, in insertion order.
///
/// Entries are never evicted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    occupied: Vec<StandRecord>,
    blocked: Vec<StandRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stand occupied by `callsign` at `icao`.
    pub fn occupied_by(&self, callsign: &str, icao: &str) -> Option<&StandRecord> {
        self.occupied
            .iter()
            .find(|r| r.callsign == callsign && r.icao == icao)
    }

    pub fn is_occupied(&self, name: &str, icao: &str) -> bool {
        self.occupied.iter().any(|r| r.name == name && r.icao == icao)
    }

    pub fn is_blocked(&self, name: &str, icao: &str) -> bool {
        self.blocked.iter().any(|r| r.name == name && r.icao == icao)
    }

    /// Record an occupied stand. Refused when another entry already holds
    /// the same stand at the same airport.
    pub fn occupy(&mut self, record: StandRecord) -> bool {
        if self.is_occupied(&record.name, &record.icao) {
            return false;
        }
        self.occupied.push(record);
        true
    }

    /// Record a blocked stand unless the identical entry exists.
    pub fn block(&mut self, record: StandRecord) -> bool {
        if self.blocked.contains(&record) {
            return false;
        }
        self.blocked.push(record);
        true
    }

    pub fn occupied(&self) -> &[StandRecord] {
        &self.occupied
    }

    pub fn blocked(&self) -> &[StandRecord] {
        &self.blocked
    }
}

/// Point-in-time copy of the engine's ledgers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    pub occupied: Vec<StandRecord>,
    pub blocked: Vec<StandRecord>,
    /// Callsigns already warned about having no suitable stand, sorted.
    pub reported: Vec<String>,
}

/// Ledger sizes and recent activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStatus {
    pub occupied: usize,
    pub blocked: usize,
    pub reported: usize,
    /// Assignment events of the last 24 hours.
    pub last_day: HourCounts,
}
