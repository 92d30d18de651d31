//! Assign command - allocate stands for a pilot list.
//!
//! Each callsign is handed to the engine on the blocking thread pool, so
//! assignments contend on the engine lock exactly as live flight events do.
//! With `--watch` the command keeps polling airport configs for version
//! changes and retries flights still waiting for a stand until Ctrl+C.
//! `--recent N` prints the last engine log records once the run ends.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use standalloc::airport::AirportConfigStore;
use clap::ValueEnum;
use standalloc::config::MIN_WATCH_INTERVAL_SECS;
use standalloc::log::{LogCategory, LogEntry, LogFilter, LogLevel, MemoryLogger};
use standalloc::pilot::InMemoryPilotDirectory;
use standalloc::stand::{AssignOutcome, StandEngine};
use tracing::{info, warn};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the assign command.
pub struct AssignArgs {
    pub pilots: PathBuf,
    pub airports: Option<PathBuf>,
    pub watch: bool,
    pub interval: Option<u64>,
    pub no_dump: bool,
    pub verbose: bool,
    pub debug: bool,
    /// Number of recent log records to print at the end.
    pub recent: Option<usize>,
    pub recent_filter: LogFilter,
}

/// Log level accepted by `--recent-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LevelArg> for LogLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Trace => LogLevel::Trace,
            LevelArg::Debug => LogLevel::Debug,
            LevelArg::Info => LogLevel::Info,
            LevelArg::Warn => LogLevel::Warn,
            LevelArg::Error => LogLevel::Error,
        }
    }
}

/// Log category accepted by `--recent-category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Assignment,
    Config,
    System,
}

impl From<CategoryArg> for LogCategory {
    fn from(category: CategoryArg) -> Self {
        match category {
            CategoryArg::Assignment => LogCategory::Assignment,
            CategoryArg::Config => LogCategory::Config,
            CategoryArg::System => LogCategory::System,
        }
    }
}

/// Build the record filter of `--recent` from its optional narrowing flags.
pub fn recent_filter(
    level: Option<LevelArg>,
    category: Option<CategoryArg>,
    callsign: Option<String>,
    icao: Option<String>,
) -> LogFilter {
    let mut filter = LogFilter::default();
    if let Some(level) = level {
        filter = filter.level(level.into());
    }
    if let Some(category) = category {
        filter = filter.category(category.into());
    }
    if let Some(callsign) = callsign {
        filter = filter.callsign(callsign.trim().to_ascii_uppercase());
    }
    if let Some(icao) = icao {
        filter = filter.icao(icao.trim().to_ascii_uppercase());
    }
    filter
}

/// Run the assign command.
pub fn run(args: AssignArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.verbose, args.debug)?;
    runner.log_startup("assign");

    let pilots = InMemoryPilotDirectory::from_file(&args.pilots).map_err(|error| {
        CliError::Pilots {
            path: args.pilots.clone(),
            error,
        }
    })?;
    let pilots = Arc::new(pilots);
    info!("Loaded {} pilots from {}", pilots.len(), args.pilots.display());

    let store = runner.create_store(args.airports.clone());
    let engine = Arc::new(runner.create_engine(store.clone(), pilots.clone(), !args.no_dump));

    let interval_secs = args
        .interval
        .unwrap_or(runner.config().watch.interval_secs)
        .max(MIN_WATCH_INTERVAL_SECS);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))?;

    runtime.block_on(async {
        let outcomes = assign_all(&engine, pilots.callsigns()).await?;
        print_outcomes(&outcomes);
        print_status(&engine, &pilots);

        if !args.watch {
            return Ok(());
        }

        println!();
        println!(
            "Watching airport configs every {}s. Press Ctrl+C to stop.",
            interval_secs
        );
        watch(&engine, &store, &pilots, Duration::from_secs(interval_secs)).await?;

        println!();
        print_status(&engine, &pilots);
        Ok::<(), CliError>(())
    })?;

    if let Some(limit) = args.recent {
        print_recent(runner.recent_log(), &args.recent_filter, limit);
    }
    Ok(())
}

/// Assign every callsign concurrently, returning outcomes in input order.
async fn assign_all(
    engine: &Arc<StandEngine>,
    callsigns: Vec<String>,
) -> Result<Vec<(String, AssignOutcome)>, CliError> {
    let handles: Vec<_> = callsigns
        .into_iter()
        .map(|callsign| {
            let engine = Arc::clone(engine);
            tokio::task::spawn_blocking(move || {
                let outcome = engine.assign(&callsign);
                (callsign, outcome)
            })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        outcomes.push(
            handle
                .await
                .map_err(|e| CliError::Runtime(e.to_string()))?,
        );
    }
    Ok(outcomes)
}

/// Poll config versions and retry waiting flights until Ctrl+C.
async fn watch(
    engine: &Arc<StandEngine>,
    store: &Arc<AirportConfigStore>,
    pilots: &Arc<InMemoryPilotDirectory>,
    period: Duration,
) -> Result<(), CliError> {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                if let Err(e) = result {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                }
                info!("Watch stopped");
                return Ok(());
            }
            _ = ticker.tick() => {
                let checker = Arc::clone(store);
                let updated = tokio::task::spawn_blocking(move || checker.check_all_versions())
                    .await
                    .map_err(|e| CliError::Runtime(e.to_string()))?;
                for icao in &updated {
                    println!("Reloaded {}", icao);
                }

                let waiting = waiting_callsigns(pilots);
                if waiting.is_empty() {
                    continue;
                }

                let outcomes = assign_all(engine, waiting).await?;
                let assigned: Vec<_> = outcomes
                    .into_iter()
                    .filter(|(_, outcome)| outcome.is_assigned())
                    .collect();
                if !assigned.is_empty() {
                    print_outcomes(&assigned);
                }
            }
        }
    }
}

fn print_outcomes(outcomes: &[(String, AssignOutcome)]) {
    for (callsign, outcome) in outcomes {
        println!("{:<10} {}", callsign, outcome);
    }
}

/// Callsigns whose pilot record currently has no stand, sorted.
fn waiting_callsigns(pilots: &InMemoryPilotDirectory) -> Vec<String> {
    pilots
        .snapshot()
        .into_iter()
        .filter(|p| !p.has_stand())
        .map(|p| p.callsign)
        .collect()
}

fn print_status(engine: &StandEngine, pilots: &InMemoryPilotDirectory) {
    let status = engine.status();
    let day = status.last_day;
    println!();
    println!(
        "Occupied: {}  Blocked: {}  Without stand: {}  Warned: {}",
        status.occupied,
        status.blocked,
        waiting_callsigns(pilots).len(),
        status.reported
    );
    println!(
        "Last 24h: {} assigned, {} without stand, {} config errors",
        day.assigned, day.no_stand, day.config_errors
    );
}

/// Print the last `limit` captured records matching `filter`.
fn print_recent(log: &MemoryLogger, filter: &LogFilter, limit: usize) {
    let entries = log.query(filter);
    let skip = entries.len().saturating_sub(limit);

    println!();
    println!("Recent log ({} of {} matching)", entries.len() - skip, entries.len());
    for entry in &entries[skip..] {
        println!("{}", format_entry(entry));
    }
}

fn format_entry(entry: &LogEntry) -> String {
    let scope = match (entry.icao.as_deref(), entry.callsign.as_deref()) {
        (Some(icao), Some(callsign)) => format!(" [{} {}]", icao, callsign),
        (Some(icao), None) => format!(" [{}]", icao),
        (None, Some(callsign)) => format!(" [{}]", callsign),
        (None, None) => String::new(),
    };
    format!(
        "{} {:<5}{} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        scope,
        entry.message
    )
}
