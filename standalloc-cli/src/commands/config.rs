//! Config command - inspect and edit `~/.standalloc/config.ini`.
//!
//! `set` validates the value, saves it and reports what the change means for
//! stand allocation, such as how many airport tables the new directory holds.

use std::path::Path;

use clap::Subcommand;
use standalloc::airport::AirportConfigStore;
use standalloc::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Airports listed by name after a directory change before eliding the rest.
const LISTED_AIRPORTS: usize = 5;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of one key
    Get {
        /// Key in section.key form (e.g. airports.directory)
        key: String,
    },

    /// Validate and store a value
    Set {
        /// Key in section.key form (e.g. watch.interval_secs)
        key: String,

        /// New value
        value: String,
    },

    /// Show every key grouped by section, with what it controls
    List,

    /// Print the config file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            let key = parse_key(&key)?;
            println!("{}", key.get(&ConfigFile::load()?));
        }
        ConfigCommands::Set { key, value } => {
            let key = parse_key(&key)?;
            // A broken file is reported rather than overwritten with defaults
            let mut config = ConfigFile::load()?;
            let change = apply(&mut config, key, &value)?;
            if change.old != change.new {
                config.save()?;
            }
            println!("{} = {}", key.name(), change.new);
            for note in change_notes(&change, &config) {
                println!("  {}", note);
            }
        }
        ConfigCommands::List => print!("{}", render_list(&ConfigFile::load()?)),
        ConfigCommands::Path => {
            let path = config_file_path();
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(not created yet, defaults apply until 'standalloc config set' writes it)");
            }
        }
    }
    Ok(())
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        let known: Vec<&str> = ConfigKey::all().iter().map(ConfigKey::name).collect();
        CliError::Config(format!(
            "Unknown configuration key '{}'. Known keys: {}",
            key,
            known.join(", ")
        ))
    })
}

/// A validated edit of one key.
#[derive(Debug)]
struct Change {
    key: ConfigKey,
    old: String,
    new: String,
}

fn apply(config: &mut ConfigFile, key: ConfigKey, value: &str) -> Result<Change, CliError> {
    let old = key.get(config);
    key.set(config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(Change {
        key,
        old,
        new: key.get(config),
    })
}

/// What a change means for the allocation engine, one line per note.
fn change_notes(change: &Change, config: &ConfigFile) -> Vec<String> {
    if change.old == change.new {
        return vec!["Unchanged.".to_string()];
    }

    let mut notes = Vec::new();
    match change.key {
        ConfigKey::AirportsDirectory => {
            notes.push(describe_airports(&config.airports.directory));
        }
        ConfigKey::EngineDumpEnabled if config.engine.dump_enabled => {
            notes.push(format!(
                "Filter traces will be written to {}",
                config.engine.dump_directory.display()
            ));
        }
        ConfigKey::EngineDumpEnabled => {
            notes.push("Flights without a stand will only be logged.".to_string());
        }
        ConfigKey::EngineDumpDirectory if !config.engine.dump_enabled => {
            notes.push("Dumps are disabled. Enable them with engine.dump_enabled = true".to_string());
        }
        ConfigKey::EngineDumpDirectory | ConfigKey::LoggingFile | ConfigKey::WatchIntervalSecs => {}
    }

    if change.key == ConfigKey::LoggingFile {
        notes.push("Used from the next command on.".to_string());
    } else {
        notes.push(
            "A running 'standalloc assign --watch' keeps the previous value until restarted."
                .to_string(),
        );
    }
    notes
}

fn describe_airports(directory: &Path) -> String {
    match AirportConfigStore::new(directory).airport_list() {
        Err(_) => format!("{} does not exist yet.", directory.display()),
        Ok(codes) if codes.is_empty() => {
            format!("No <ICAO>.json stand tables in {}", directory.display())
        }
        Ok(codes) => {
            let mut shown = codes
                .iter()
                .take(LISTED_AIRPORTS)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            if codes.len() > LISTED_AIRPORTS {
                shown.push_str(", ...");
            }
            format!("{} airport stand tables found: {}", codes.len(), shown)
        }
    }
}

fn section_title(section: &str) -> &'static str {
    match section {
        "airports" => "Stand tables",
        "engine" => "Allocation engine",
        "logging" => "Logging",
        "watch" => "Watch mode",
        _ => "",
    }
}

/// Every key grouped by section, marking values that differ from the default.
fn render_list(config: &ConfigFile) -> String {
    let mut out = String::new();
    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();
        if section != current_section {
            if !current_section.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]  {}\n", section, section_title(section)));
            current_section = section;
        }

        let value = key.get(config);
        let marker = if value == key.default_value() {
            ""
        } else {
            "  (changed)"
        };
        out.push_str(&format!("  {} = {}{}\n", key.key_name(), value, marker));
        out.push_str(&format!("      {}\n", key.description()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_rejects_invalid_value_without_touching_config() {
        let mut config = ConfigFile::default();
        let result = apply(&mut config, ConfigKey::WatchIntervalSecs, "0");

        assert!(matches!(result, Err(CliError::Config(_))));
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_unchanged_value_is_reported() {
        let mut config = ConfigFile::default();
        let change = apply(&mut config, ConfigKey::WatchIntervalSecs, "10").unwrap();

        assert_eq!(change_notes(&change, &config), vec!["Unchanged."]);
    }

    #[test]
    fn test_watch_interval_change_mentions_running_watch() {
        let mut config = ConfigFile::default();
        let change = apply(&mut config, ConfigKey::WatchIntervalSecs, "30").unwrap();

        let notes = change_notes(&change, &config);
        assert_eq!(change.new, "30");
        assert!(notes.iter().any(|n| n.contains("assign --watch")));
    }

    #[test]
    fn test_airports_directory_change_counts_stand_tables() {
        let dir = TempDir::new().unwrap();
        for icao in ["LFPG", "EDDF", "EGLL", "LEMD", "LIRF", "EHAM"] {
            std::fs::write(dir.path().join(format!("{}.json", icao)), "{}").unwrap();
        }
        let mut config = ConfigFile::default();
        let value = dir.path().to_string_lossy().to_string();
        let change = apply(&mut config, ConfigKey::AirportsDirectory, &value).unwrap();

        let notes = change_notes(&change, &config);
        assert_eq!(
            notes[0],
            "6 airport stand tables found: EDDF, EGLL, EHAM, LEMD, LFPG, ..."
        );
    }

    #[test]
    fn test_airports_directory_missing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nowhere");
        assert!(describe_airports(&missing).ends_with("does not exist yet."));
        assert!(describe_airports(dir.path()).starts_with("No <ICAO>.json"));
    }

    #[test]
    fn test_dump_toggle_notes() {
        let mut config = ConfigFile::default();
        let change = apply(&mut config, ConfigKey::EngineDumpEnabled, "false").unwrap();
        assert_eq!(
            change_notes(&change, &config)[0],
            "Flights without a stand will only be logged."
        );

        let change = apply(&mut config, ConfigKey::EngineDumpDirectory, "/tmp/traces").unwrap();
        assert!(change_notes(&change, &config)[0].starts_with("Dumps are disabled"));
    }

    #[test]
    fn test_render_list_groups_sections_and_marks_changes() {
        let mut config = ConfigFile::default();
        config.watch.interval_secs = 45;

        let listing = render_list(&config);
        assert!(listing.starts_with("[airports]  Stand tables\n"));
        assert!(listing.contains("[watch]  Watch mode\n  interval_secs = 45  (changed)\n"));
        assert!(listing.contains("  dump_enabled = true\n"));
        assert!(listing.contains(ConfigKey::LoggingFile.description()));
    }

    #[test]
    fn test_unknown_key_lists_known_keys() {
        let err = parse_key("cache.size").unwrap_err();
        assert!(err.to_string().contains("watch.interval_secs"));
    }
}
