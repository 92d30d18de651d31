//! The stand allocation engine.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use super::dump::{DiagnosticDump, DumpReport, NoDump};
use super::filter::{eligible_stands, FilterContext};
use super::ledger::{EngineStatus, Ledger, LedgerSnapshot, StandRecord};
use super::outcome::{AssignOutcome, ConfigFault};
use super::select::{reduce_by_priority, select_winner};
use super::stats::{HourlyCount, HourlyStats, StatEvent};
use crate::airport::StandConfigSource;
use crate::log::{LogTags, Logger, NoOpLogger};
use crate::pilot::PilotDirectory;
use crate::{log_debug, log_info, log_warn};

/// State shared by all assignment calls.
#[derive(Debug, Default)]
struct EngineState {
    ledger: Ledger,
    /// Callsigns already warned about having no suitable stand.
    reported: HashSet<String>,
    stats: HourlyStats,
}

/// Assigns stands to flights and tracks which stands are taken.
///
/// `assign` may be called from many threads. The decision and the ledger
/// update of one call run under a single lock, so two flights are never
/// granted the same stand at the same airport.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use standalloc::airport::{AirportConfig, AirportConfigStore, StandDefinition};
/// use standalloc::pilot::{InMemoryPilotDirectory, Pilot, PilotDirectory};
/// use standalloc::stand::StandEngine;
///
/// let configs = Arc::new(AirportConfigStore::new("airports"));
/// configs.insert(AirportConfig::new("LFPG", vec![StandDefinition::new("A1")]));
/// let pilots = Arc::new(InMemoryPilotDirectory::new());
/// pilots.upsert(Pilot::new("AFR123", "LFPG"));
///
/// let engine = StandEngine::new(configs, pilots.clone());
/// engine.assign("AFR123");
/// assert_eq!(pilots.lookup("AFR123").unwrap().stand, "A1");
/// ```
pub struct StandEngine {
    configs: Arc<dyn StandConfigSource>,
    pilots: Arc<dyn PilotDirectory>,
    logger: Arc<dyn Logger>,
    dump: Arc<dyn DiagnosticDump>,
    state: Mutex<EngineState>,
}

impl StandEngine {
    pub fn new(configs: Arc<dyn StandConfigSource>, pilots: Arc<dyn PilotDirectory>) -> Self {
        Self {
            configs,
            pilots,
            logger: Arc::new(NoOpLogger),
            dump: Arc::new(NoDump),
            state: Mutex::new(EngineState::default()),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Set where diagnostic dumps of failed assignments go.
    pub fn with_dump(mut self, dump: Arc<dyn DiagnosticDump>) -> Self {
        self.dump = dump;
        self
    }

    /// Assign a stand to `callsign` at its destination.
    ///
    /// The pilot record always ends with either the chosen stand or an
    /// empty stand. The returned outcome reports which.
    pub fn assign(&self, callsign: &str) -> AssignOutcome {
        let Some(pilot) = self.pilots.lookup(callsign) else {
            log_debug!(self.logger, "Ignoring assignment for unknown callsign {}", callsign);
            return AssignOutcome::UnknownCallsign;
        };

        let icao = pilot.destination.trim().to_ascii_uppercase();
        let tags = LogTags::assignment(&icao, callsign);

        let config = match self.configs.ensure_loaded(&icao) {
            Ok(config) => config,
            Err(e) => {
                log_warn!(
                    self.logger,
                    tags = tags,
                    "Failed to retrieve config when assigning stand for: {} ({})",
                    callsign,
                    e
                );
                let mut state = self.lock();
                state.stats.record(StatEvent::ConfigError, Utc::now());
                self.pilots.set_stand(callsign, "");
                return AssignOutcome::ConfigError(ConfigFault::Unavailable(e.to_string()));
            }
        };

        let mut pending_dump = None;
        let outcome = {
            let mut state = self.lock();

            if let Some(held) = state.ledger.occupied_by(callsign, &icao) {
                let stand = held.name.clone();
                log_debug!(
                    self.logger,
                    tags = tags,
                    "Pilot: {} already occupies stand: {}",
                    callsign,
                    stand
                );
                self.pilots.set_stand(callsign, &stand);
                return AssignOutcome::Reused { stand };
            }

            let Some(stands) = config.stands() else {
                log_warn!(self.logger, tags = tags, "No stand section in config for: {}", icao);
                state.stats.record(StatEvent::ConfigError, Utc::now());
                self.pilots.set_stand(callsign, "");
                return AssignOutcome::ConfigError(ConfigFault::MissingStands);
            };

            log_debug!(
                self.logger,
                tags = tags,
                "Assigning stand for pilot: {} at {}",
                callsign,
                icao
            );

            let mut trace = Vec::new();
            let ctx = FilterContext::new(&pilot, &icao, &state.ledger);
            let mut candidates = eligible_stands(stands, &ctx, &mut trace);
            for line in &trace {
                log_debug!(self.logger, tags = tags, "{}", line);
            }
            reduce_by_priority(&mut candidates);

            match select_winner(&candidates) {
                None => {
                    state.stats.record(StatEvent::NoStand, Utc::now());
                    self.pilots.set_stand(callsign, "");
                    if state.reported.insert(callsign.to_string()) {
                        log_warn!(
                            self.logger,
                            tags = tags,
                            "No suitable stand found for pilot: {} at {}",
                            callsign,
                            icao
                        );
                        pending_dump = Some(DumpReport::new(callsign, &icao, trace));
                    }
                    AssignOutcome::Unavailable
                }
                Some(winner) => {
                    let stand = winner.name.clone();
                    let apron = winner.is_apron();
                    state.stats.record(StatEvent::Assigned, Utc::now());
                    self.pilots.set_stand(callsign, &stand);
                    log_info!(
                        self.logger,
                        tags = tags,
                        "Assigned stand {} to pilot: {}",
                        stand,
                        callsign
                    );

                    let mut blocked = Vec::new();
                    if !apron {
                        state
                            .ledger
                            .occupy(StandRecord::new(stand.as_str(), icao.as_str(), callsign));
                        for name in winner.blocked_names() {
                            let record = StandRecord::new(name.as_str(), icao.as_str(), callsign);
                            if state.ledger.block(record) {
                                log_debug!(
                                    self.logger,
                                    tags = tags,
                                    "Also blocking stand {} due to assignment of {}",
                                    name,
                                    stand
                                );
                                blocked.push(name.clone());
                            }
                        }
                    }

                    AssignOutcome::Assigned {
                        stand,
                        blocked,
                        apron,
                    }
                }
            }
        };

        if let Some(report) = pending_dump {
            if let Err(e) = self.dump.write(&report) {
                log_debug!(
                    self.logger,
                    tags = tags,
                    "Failed to write diagnostic dump for {}: {}",
                    callsign,
                    e
                );
            }
        }

        outcome
    }

    /// Assign stands to a batch of callsigns on scoped worker threads.
    ///
    /// Outcomes are returned in input order.
    pub fn assign_many<S>(&self, callsigns: &[S]) -> Vec<AssignOutcome>
    where
        S: AsRef<str> + Sync,
    {
        if callsigns.is_empty() {
            return Vec::new();
        }

        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
            .min(callsigns.len());
        let chunk_size = callsigns.len().div_ceil(workers);

        std::thread::scope(|scope| {
            let handles: Vec<_> = callsigns
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|c| self.assign(c.as_ref()))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        })
    }

    /// Occupied stands, in insertion order.
    pub fn occupied(&self) -> Vec<StandRecord> {
        self.lock().ledger.occupied().to_vec()
    }

    /// Blocked stands, in insertion order.
    pub fn blocked(&self) -> Vec<StandRecord> {
        self.lock().ledger.blocked().to_vec()
    }

    /// Consistent copy of both ledgers and the reported set.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let state = self.lock();
        let mut reported: Vec<String> = state.reported.iter().cloned().collect();
        reported.sort();
        LedgerSnapshot {
            occupied: state.ledger.occupied().to_vec(),
            blocked: state.ledger.blocked().to_vec(),
            reported,
        }
    }

    pub fn status(&self) -> EngineStatus {
        let state = self.lock();
        EngineStatus {
            occupied: state.ledger.occupied().len(),
            blocked: state.ledger.blocked().len(),
            reported: state.reported.len(),
            last_day: state.stats.last_day_totals(Utc::now()),
        }
    }

    /// Per-hour event counts of the last 24 hours, oldest first.
    pub fn hourly_stats(&self) -> Vec<HourlyCount> {
        self.lock().stats.last_day(Utc::now())
    }

    /// Allow the "no suitable stand" warning for `callsign` again.
    pub fn clear_reported(&self, callsign: &str) -> bool {
        self.lock().reported.remove(callsign)
    }

    /// Allow the "no suitable stand" warning for every callsign again.
    pub fn reset_reported(&self) {
        self.lock().reported.clear();
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for StandEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandEngine")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::{AirportConfig, AirportConfigStore, StandDefinition};
    use crate::log::{LogFilter, LogLevel, MemoryLogger};
    use crate::pilot::{AircraftType, InMemoryPilotDirectory, Pilot};
    use crate::stand::HourCounts;
    use std::io;

    struct Fixture {
        configs: Arc<AirportConfigStore>,
        pilots: Arc<InMemoryPilotDirectory>,
        logger: Arc<MemoryLogger>,
        engine: StandEngine,
    }

    fn fixture(stands: Vec<StandDefinition>) -> Fixture {
        let configs = Arc::new(AirportConfigStore::new("/nonexistent"));
        configs.insert(AirportConfig::new("LFPG", stands));
        let pilots = Arc::new(InMemoryPilotDirectory::new());
        let logger = Arc::new(MemoryLogger::new());
        let engine = StandEngine::new(configs.clone(), pilots.clone()).with_logger(logger.clone());
        Fixture {
            configs,
            pilots,
            logger,
            engine,
        }
    }

    fn airliner(callsign: &str) -> Pilot {
        Pilot::new(callsign, "LFPG")
            .with_origin("LFBO")
            .with_aircraft_code("C")
            .with_aircraft_type(AircraftType::Airliner)
    }

    fn stand_of(f: &Fixture, callsign: &str) -> String {
        f.pilots.lookup(callsign).unwrap().stand
    }

    #[test]
    fn test_assigns_first_eligible_stand() {
        let f = fixture(vec![
            StandDefinition::new("A1").with_code("E"),
            StandDefinition::new("A2"),
        ]);
        f.pilots.upsert(airliner("AFR1"));

        let outcome = f.engine.assign("AFR1");

        assert_eq!(outcome.stand(), Some("A2"));
        assert_eq!(stand_of(&f, "AFR1"), "A2");
        assert_eq!(f.engine.occupied(), vec![StandRecord::new("A2", "LFPG", "AFR1")]);
    }

    #[test]
    fn test_reuse_is_idempotent() {
        let f = fixture(vec![StandDefinition::new("A1"), StandDefinition::new("A2")]);
        f.pilots.upsert(airliner("AFR1"));

        f.engine.assign("AFR1");
        let second = f.engine.assign("AFR1");

        assert_eq!(second, AssignOutcome::Reused { stand: "A1".into() });
        assert_eq!(stand_of(&f, "AFR1"), "A1");
        assert_eq!(f.engine.occupied().len(), 1);
    }

    #[test]
    fn test_reuse_is_scoped_to_destination() {
        let f = fixture(vec![StandDefinition::new("A1")]);
        f.configs.insert(AirportConfig::new("LFPO", vec![StandDefinition::new("B1")]));
        f.pilots.upsert(airliner("AFR1"));
        f.engine.assign("AFR1");

        let mut diverted = airliner("AFR1");
        diverted.destination = "LFPO".to_string();
        f.pilots.upsert(diverted);

        assert_eq!(f.engine.assign("AFR1").stand(), Some("B1"));
        assert_eq!(f.engine.occupied().len(), 2);
    }

    #[test]
    fn test_mutual_exclusivity() {
        let f = fixture(vec![StandDefinition::new("A1"), StandDefinition::new("A2")]);
        f.pilots.upsert(airliner("AFR1"));
        f.pilots.upsert(airliner("AFR2"));
        f.pilots.upsert(airliner("AFR3"));

        assert_eq!(f.engine.assign("AFR1").stand(), Some("A1"));
        assert_eq!(f.engine.assign("AFR2").stand(), Some("A2"));
        assert_eq!(f.engine.assign("AFR3"), AssignOutcome::Unavailable);
        assert_eq!(stand_of(&f, "AFR3"), "");
    }

    #[test]
    fn test_blocking_propagation() {
        let f = fixture(vec![
            StandDefinition::new("K1").with_block(["K2", "K2"]),
            StandDefinition::new("K2"),
            StandDefinition::new("K3"),
        ]);
        f.pilots.upsert(airliner("AFR1"));
        f.pilots.upsert(airliner("AFR2"));

        let first = f.engine.assign("AFR1");
        assert_eq!(
            first,
            AssignOutcome::Assigned {
                stand: "K1".into(),
                blocked: vec!["K2".into()],
                apron: false
            }
        );
        assert_eq!(f.engine.assign("AFR2").stand(), Some("K3"));
        assert_eq!(f.engine.blocked(), vec![StandRecord::new("K2", "LFPG", "AFR1")]);
    }

    #[test]
    fn test_apron_is_shared() {
        let f = fixture(vec![StandDefinition::new("G1").with_apron(true).with_block(["G2"])]);
        f.pilots.upsert(airliner("AFR1"));
        f.pilots.upsert(airliner("AFR2"));

        assert_eq!(f.engine.assign("AFR1").stand(), Some("G1"));
        assert_eq!(f.engine.assign("AFR2").stand(), Some("G1"));
        assert!(f.engine.occupied().is_empty());
        assert!(f.engine.blocked().is_empty());
    }

    #[test]
    fn test_priority_reduction() {
        let f = fixture(vec![
            StandDefinition::new("P3").with_priority(3),
            StandDefinition::new("P1a").with_priority(1),
            StandDefinition::new("none"),
            StandDefinition::new("P1b").with_priority(1),
            StandDefinition::new("P5").with_priority(5),
        ]);
        for cs in ["AFR1", "AFR2", "AFR3"] {
            f.pilots.upsert(airliner(cs));
        }

        assert_eq!(f.engine.assign("AFR1").stand(), Some("P1a"));
        assert_eq!(f.engine.assign("AFR2").stand(), Some("P1b"));
        assert_eq!(f.engine.assign("AFR3").stand(), Some("P3"));
    }

    #[test]
    fn test_tie_break_prefers_narrow_code() {
        let f = fixture(vec![
            StandDefinition::new("wide").with_code("CD"),
            StandDefinition::new("narrow").with_code("BC"),
        ]);
        f.pilots.upsert(airliner("AFR1"));

        assert_eq!(f.engine.assign("AFR1").stand(), Some("narrow"));
    }

    #[test]
    fn test_country_filter() {
        let f = fixture(vec![StandDefinition::new("S1").with_countries(["FR", "DE"])]);
        f.pilots.upsert(airliner("AAL1").with_origin("USxx"));
        f.pilots.upsert(airliner("AFR1").with_origin("FRxx"));

        assert_eq!(f.engine.assign("AAL1"), AssignOutcome::Unavailable);
        assert_eq!(f.engine.assign("AFR1").stand(), Some("S1"));
    }

    #[test]
    fn test_warning_is_deduplicated() {
        let f = fixture(vec![StandDefinition::new("A1").with_code("E")]);
        f.pilots.upsert(airliner("ABC123"));
        f.pilots.set_stand("ABC123", "OLD");

        let warnings = LogFilter::default()
            .level(LogLevel::Warn)
            .callsign("ABC123");

        f.engine.assign("ABC123");
        assert_eq!(stand_of(&f, "ABC123"), "");
        f.pilots.set_stand("ABC123", "OLD");
        f.engine.assign("ABC123");
        assert_eq!(stand_of(&f, "ABC123"), "");
        assert_eq!(f.logger.count(&warnings), 1);

        assert!(f.engine.clear_reported("ABC123"));
        f.engine.assign("ABC123");
        assert_eq!(f.logger.count(&warnings), 2);
        assert_eq!(f.engine.status().reported, 1);

        f.engine.reset_reported();
        assert!(f.engine.snapshot().reported.is_empty());
    }

    #[test]
    fn test_missing_config_clears_stand() {
        let f = fixture(vec![]);
        let mut pilot = airliner("DLH1");
        pilot.destination = "EDDF".to_string();
        f.pilots.upsert(pilot);
        f.pilots.set_stand("DLH1", "V1");

        let outcome = f.engine.assign("DLH1");

        assert!(matches!(outcome, AssignOutcome::ConfigError(ConfigFault::Unavailable(_))));
        assert_eq!(stand_of(&f, "DLH1"), "");
        assert_eq!(f.logger.count(&LogFilter::default().level(LogLevel::Warn)), 1);
    }

    #[test]
    fn test_missing_stand_section_clears_stand() {
        let f = fixture(vec![]);
        f.configs.insert(AirportConfig::without_stands("LFPG"));
        f.pilots.upsert(airliner("AFR1"));
        f.pilots.set_stand("AFR1", "Z");

        assert_eq!(
            f.engine.assign("AFR1"),
            AssignOutcome::ConfigError(ConfigFault::MissingStands)
        );
        assert_eq!(stand_of(&f, "AFR1"), "");
    }

    #[test]
    fn test_null_stand_section_is_missing_not_unavailable() {
        let f = fixture(vec![]);
        let config = AirportConfig::from_json_str("LFPG", r#"{"version": 3, "Stands": null}"#).unwrap();
        f.configs.insert(config);
        f.pilots.upsert(airliner("AFR1"));

        assert_eq!(
            f.engine.assign("AFR1"),
            AssignOutcome::ConfigError(ConfigFault::MissingStands)
        );
        assert_eq!(f.logger.count(&LogFilter::default().level(LogLevel::Warn)), 1);
    }

    #[test]
    fn test_unknown_callsign_is_noop() {
        let f = fixture(vec![StandDefinition::new("A1")]);
        assert_eq!(f.engine.assign("NOPE"), AssignOutcome::UnknownCallsign);
        assert!(f.engine.occupied().is_empty());
    }

    #[test]
    fn test_lowercase_destination_resolves() {
        let f = fixture(vec![StandDefinition::new("A1")]);
        let mut pilot = airliner("AFR1");
        pilot.destination = "lfpg".to_string();
        f.pilots.upsert(pilot);

        assert_eq!(f.engine.assign("AFR1").stand(), Some("A1"));
        assert_eq!(f.engine.occupied()[0].icao, "LFPG");
    }

    struct RecordingDump(Mutex<Vec<DumpReport>>);

    impl DiagnosticDump for RecordingDump {
        fn write(&self, report: &DumpReport) -> io::Result<()> {
            self.0.lock().unwrap().push(report.clone());
            Ok(())
        }
    }

    struct FailingDump;

    impl DiagnosticDump for FailingDump {
        fn write(&self, _report: &DumpReport) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn test_dump_written_once_per_report() {
        let dump = Arc::new(RecordingDump(Mutex::new(Vec::new())));
        let mut f = fixture(vec![StandDefinition::new("A1").with_use("H")]);
        f.engine = f.engine.with_dump(dump.clone());
        f.pilots.upsert(airliner("AFR1"));

        f.engine.assign("AFR1");
        f.engine.assign("AFR1");

        let reports = dump.0.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].icao, "LFPG");
        assert!(reports[0]
            .lines
            .iter()
            .any(|l| l == "Removing stand A1 due to Use mismatch. Stand: H Pilot: A"));
    }

    #[test]
    fn test_dump_failure_is_swallowed() {
        let mut f = fixture(vec![]);
        f.engine = f.engine.with_dump(Arc::new(FailingDump));
        f.pilots.upsert(airliner("AFR1"));

        assert_eq!(f.engine.assign("AFR1"), AssignOutcome::Unavailable);
        assert_eq!(f.engine.status().reported, 1);
    }

    #[test]
    fn test_status_counts_last_day_events() {
        let f = fixture(vec![StandDefinition::new("A1")]);
        f.pilots.upsert(airliner("AFR1"));
        f.pilots.upsert(airliner("AFR2"));
        let mut lost = airliner("AFR3");
        lost.destination = "ZZZZ".to_string();
        f.pilots.upsert(lost);

        f.engine.assign("AFR1");
        f.engine.assign("AFR1");
        f.engine.assign("AFR2");
        f.engine.assign("AFR2");
        f.engine.assign("AFR3");

        let day = f.engine.status().last_day;
        assert_eq!(day.assigned, 1);
        assert_eq!(day.no_stand, 2);
        assert_eq!(day.config_errors, 1);

        let hourly = f.engine.hourly_stats();
        assert_eq!(hourly.len(), 24);
        let summed = hourly.iter().fold(HourCounts::default(), |mut acc, h| {
            acc += h.counts;
            acc
        });
        assert_eq!(summed, day);
    }

    #[test]
    fn test_assign_many_keeps_input_order() {
        let f = fixture(vec![StandDefinition::new("A1")]);
        f.pilots.upsert(airliner("AFR1"));

        let outcomes = f.engine.assign_many(&["GHOST", "AFR1"]);

        assert_eq!(outcomes[0], AssignOutcome::UnknownCallsign);
        assert_eq!(outcomes[1].stand(), Some("A1"));
        assert!(f.engine.assign_many::<&str>(&[]).is_empty());
    }
}
