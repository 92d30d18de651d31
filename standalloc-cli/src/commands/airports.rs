//! Airports command - list the airports with a stand configuration.

use std::path::PathBuf;

use standalloc::airport::StandConfigSource;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the airports command.
pub fn run(airports: Option<PathBuf>, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(false, debug)?;
    runner.log_startup("airports");
    let store = runner.create_store(airports);

    let codes = store.airport_list()?;
    if codes.is_empty() {
        println!("No airport configs found in {}", store.directory().display());
        return Ok(());
    }

    println!("{:<6} {:>7}  {}", "ICAO", "Stands", "Version");
    for icao in codes {
        match store.ensure_loaded(&icao) {
            Ok(config) => {
                let stands = config
                    .stands()
                    .map_or_else(|| "-".to_string(), |s| s.len().to_string());
                println!(
                    "{:<6} {:>7}  {}",
                    icao,
                    stands,
                    config.version().unwrap_or("-")
                );
            }
            Err(e) => println!("{:<6} {:>7}  ({})", icao, "?", e),
        }
    }

    Ok(())
}
