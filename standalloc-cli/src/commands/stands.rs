//! Stands command - print the stand table of one airport.

use std::path::PathBuf;

use standalloc::airport::StandDefinition;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the stands command.
pub fn run(icao: &str, airports: Option<PathBuf>, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(false, debug)?;
    runner.log_startup("stands");
    let store = runner.create_store(airports);

    let Some(stands) = store.stands(icao)? else {
        println!("{} has no Stands section", icao.to_uppercase());
        return Ok(());
    };

    println!("{} - {} stands (preference order)", icao.to_uppercase(), stands.len());
    println!();
    println!(
        "{:<8} {:<7} {:<6} {:<9} {:<9} {:<6} {}",
        "Stand", "Code", "Use", "Schengen", "Priority", "Apron", "Blocks"
    );
    for stand in &stands {
        print_stand(stand);
    }

    Ok(())
}

fn print_stand(stand: &StandDefinition) {
    let schengen = match stand.schengen {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    };
    println!(
        "{:<8} {:<7} {:<6} {:<9} {:<9} {:<6} {}",
        stand.name,
        stand.code.as_deref().unwrap_or("-"),
        stand.usage.as_deref().unwrap_or("-"),
        schengen,
        stand
            .priority
            .map_or_else(|| "-".to_string(), |p| p.to_string()),
        if stand.is_apron() { "yes" } else { "-" },
        stand.blocked_names().join(",")
    );
}
