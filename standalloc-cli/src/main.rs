//! StandAlloc CLI - Command-line interface
//!
//! This binary provides a command-line interface to the StandAlloc library.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::assign::{recent_filter, AssignArgs, CategoryArg, LevelArg};
use commands::config::ConfigCommands;

#[derive(Parser)]
#[command(name = "standalloc")]
#[command(version = standalloc::VERSION)]
#[command(about = "Assign airport parking stands to simulated flights", long_about = None)]
struct Cli {
    /// Enable debug-level logging regardless of RUST_LOG
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign stands to every flight in a pilot file
    Assign {
        /// JSON array of pilot records
        #[arg(long)]
        pilots: PathBuf,

        /// Airport config directory (overrides airports.directory)
        #[arg(long)]
        airports: Option<PathBuf>,

        /// Keep running, reloading changed configs and retrying waiting flights
        #[arg(long)]
        watch: bool,

        /// Seconds between config checks in watch mode (overrides watch.interval_secs)
        #[arg(long)]
        interval: Option<u64>,

        /// Do not write diagnostic dumps for flights without a stand
        #[arg(long)]
        no_dump: bool,

        /// Echo log records to the terminal
        #[arg(short, long)]
        verbose: bool,

        /// Print the last N engine log records when the run ends
        #[arg(long, value_name = "N")]
        recent: Option<usize>,

        /// Only print recent records at this level
        #[arg(long, value_enum, requires = "recent")]
        recent_level: Option<LevelArg>,

        /// Only print recent records in this category
        #[arg(long, value_enum, requires = "recent")]
        recent_category: Option<CategoryArg>,

        /// Only print recent records about this callsign
        #[arg(long, requires = "recent")]
        recent_callsign: Option<String>,

        /// Only print recent records about this airport
        #[arg(long, requires = "recent")]
        recent_icao: Option<String>,
    },

    /// List configured airports
    Airports {
        /// Airport config directory (overrides airports.directory)
        #[arg(long)]
        airports: Option<PathBuf>,
    },

    /// Show the stand table of an airport
    Stands {
        /// Airport ICAO code
        icao: String,

        /// Airport config directory (overrides airports.directory)
        #[arg(long)]
        airports: Option<PathBuf>,
    },

    /// View or modify config.ini
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assign {
            pilots,
            airports,
            watch,
            interval,
            no_dump,
            verbose,
            recent,
            recent_level,
            recent_category,
            recent_callsign,
            recent_icao,
        } => commands::assign::run(AssignArgs {
            pilots,
            airports,
            watch,
            interval,
            no_dump,
            verbose,
            debug: cli.debug,
            recent,
            recent_filter: recent_filter(
                recent_level,
                recent_category,
                recent_callsign,
                recent_icao,
            ),
        }),
        Commands::Airports { airports } => commands::airports::run(airports, cli.debug),
        Commands::Stands { icao, airports } => commands::stands::run(&icao, airports, cli.debug),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
