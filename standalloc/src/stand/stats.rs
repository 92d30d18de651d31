//! Hourly assignment counters over a rolling day.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

/// Hours reported by [`HourlyStats::last_day`].
pub const STATS_WINDOW_HOURS: i64 = 24;

/// Buckets older than this many hours are pruned.
const RETAINED_HOURS: i64 = 48;

const SECS_PER_HOUR: i64 = 3_600;

/// Assignment event counted by [`HourlyStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatEvent {
    /// A new stand was granted.
    Assigned,
    /// Every stand was filtered out.
    NoStand,
    /// The destination config was unavailable or had no stand section.
    ConfigError,
}

/// Event counts of one hour, or of a whole window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HourCounts {
    pub assigned: u64,
    pub no_stand: u64,
    pub config_errors: u64,
}

impl HourCounts {
    fn add(&mut self, event: StatEvent) {
        match event {
            StatEvent::Assigned => self.assigned += 1,
            StatEvent::NoStand => self.no_stand += 1,
            StatEvent::ConfigError => self.config_errors += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.assigned + self.no_stand + self.config_errors
    }
}

impl std::ops::AddAssign for HourCounts {
    fn add_assign(&mut self, other: Self) {
        self.assigned += other.assigned;
        self.no_stand += other.no_stand;
        self.config_errors += other.config_errors;
    }
}

/// Counts of the hour starting at `hour_start` (UTC, on the hour).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyCount {
    pub hour_start: DateTime<Utc>,
    pub counts: HourCounts,
}

/// Event counters bucketed by UTC hour.
#[derive(Debug, Clone, Default)]
pub struct HourlyStats {
    buckets: BTreeMap<i64, HourCounts>,
}

impl HourlyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `event` in the hour containing `at`.
    pub fn record(&mut self, event: StatEvent, at: DateTime<Utc>) {
        let hour = hour_index(at);
        self.buckets.entry(hour).or_default().add(event);

        while let Some((&oldest, _)) = self.buckets.first_key_value() {
            if oldest >= hour - RETAINED_HOURS {
                break;
            }
            self.buckets.pop_first();
        }
    }

    /// One entry per hour for the 24 hours ending with the hour of `now`,
    /// oldest first. Hours without events report zero counts.
    pub fn last_day(&self, now: DateTime<Utc>) -> Vec<HourlyCount> {
        let current = hour_index(now);
        (current - STATS_WINDOW_HOURS + 1..=current)
            .map(|hour| HourlyCount {
                hour_start: hour_start(hour),
                counts: self.buckets.get(&hour).copied().unwrap_or_default(),
            })
            .collect()
    }

    /// Sum of the 24-hour window ending with the hour of `now`.
    pub fn last_day_totals(&self, now: DateTime<Utc>) -> HourCounts {
        let current = hour_index(now);
        let mut totals = HourCounts::default();
        for (_, counts) in self.buckets.range(current - STATS_WINDOW_HOURS + 1..=current) {
            totals += *counts;
        }
        totals
    }
}

fn hour_index(at: DateTime<Utc>) -> i64 {
    at.timestamp().div_euclid(SECS_PER_HOUR)
}

fn hour_start(hour: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(hour * SECS_PER_HOUR, 0)
        .single()
        .unwrap_or_default()
}
