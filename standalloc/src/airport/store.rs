//! Directory-backed airport configuration store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use super::config::AirportConfig;
use super::error::AirportConfigError;
use super::stand::StandDefinition;
use crate::log::{LogTags, Logger, NoOpLogger};
use crate::{log_debug, log_info, log_warn};

/// Source of airport stand configurations consumed by the allocation engine.
pub trait StandConfigSource: Send + Sync {
    /// Make sure the configuration of `icao` is loaded and return it.
    fn ensure_loaded(&self, icao: &str) -> Result<Arc<AirportConfig>, AirportConfigError>;
}

/// Normalize an ICAO code to upper case and reject anything that is not a
/// plain four-character code.
pub fn normalize_icao(icao: &str) -> Result<String, AirportConfigError> {
    let trimmed = icao.trim();
    let valid = trimmed.chars().count() == 4
        && trimmed.chars().all(|c| c.is_ascii_alphanumeric());
    if !valid {
        return Err(AirportConfigError::InvalidIcao(icao.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Airport configurations read from `<directory>/<ICAO>.json`.
///
/// Files are loaded on first use and cached. [`check_version`](Self::check_version)
/// re-reads a file and swaps the cached entry when its `version` changed.
pub struct AirportConfigStore {
    directory: PathBuf,
    cache: DashMap<String, Arc<AirportConfig>>,
    logger: Arc<dyn Logger>,
}

impl AirportConfigStore {
    /// Create a store reading from `directory`.
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self::with_logger(directory, Arc::new(NoOpLogger))
    }

    /// Create a store reporting loads and reloads to `logger`.
    pub fn with_logger<P: Into<PathBuf>>(directory: P, logger: Arc<dyn Logger>) -> Self {
        Self {
            directory: directory.into(),
            cache: DashMap::new(),
            logger,
        }
    }

    /// Directory the store reads from.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the configuration file of `icao`.
    pub fn path_for(&self, icao: &str) -> PathBuf {
        self.directory.join(format!("{}.json", icao))
    }

    /// Add or replace a configuration without touching the filesystem.
    pub fn insert(&self, config: AirportConfig) {
        self.cache
            .insert(config.icao().to_string(), Arc::new(config));
    }

    /// Cached configuration of `icao`, if loaded.
    pub fn get(&self, icao: &str) -> Option<Arc<AirportConfig>> {
        let icao = normalize_icao(icao).ok()?;
        self.cache.get(&icao).map(|entry| entry.value().clone())
    }

    /// Ordered stand table of `icao`, loading the airport if needed.
    ///
    /// `Ok(None)` means the document has no `Stands` section.
    pub fn stands(&self, icao: &str) -> Result<Option<Vec<StandDefinition>>, AirportConfigError> {
        let config = self.ensure_loaded(icao)?;
        Ok(config.stands().map(<[_]>::to_vec))
    }

    /// Number of cached airports.
    pub fn loaded_count(&self) -> usize {
        self.cache.len()
    }

    /// ICAO codes of every `*.json` file in the directory, sorted.
    pub fn airport_list(&self) -> Result<Vec<String>, AirportConfigError> {
        let mut codes: Vec<String> = std::fs::read_dir(&self.directory)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                let is_json = path.extension().is_some_and(|ext| ext == "json");
                if !is_json {
                    return None;
                }
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(|s| normalize_icao(s).ok())
            })
            .collect();
        codes.sort();
        codes.dedup();
        Ok(codes)
    }

    /// Re-read the file of `icao` and replace the cached entry when its
    /// version differs. Returns `true` when the cache was updated.
    ///
    /// An airport that was never loaded is loaded and reported as updated.
    pub fn check_version(&self, icao: &str) -> Result<bool, AirportConfigError> {
        let icao = normalize_icao(icao)?;
        let fresh = self.read_file(&icao)?;

        let cached_version = self
            .cache
            .get(&icao)
            .map(|entry| entry.version().map(str::to_string));

        match cached_version {
            Some(version) if version.as_deref() == fresh.version() => Ok(false),
            Some(version) => {
                log_info!(
                    self.logger,
                    tags = LogTags::config(&icao),
                    "Version mismatch for {}: file={}, cache={}. Updating cache.",
                    icao,
                    fresh.version().unwrap_or("none"),
                    version.as_deref().unwrap_or("none")
                );
                self.cache.insert(icao, Arc::new(fresh));
                Ok(true)
            }
            None => {
                self.cache.insert(icao, Arc::new(fresh));
                Ok(true)
            }
        }
    }

    /// Run [`check_version`](Self::check_version) for every cached airport.
    ///
    /// Failures are logged and skipped. Returns the codes that were updated.
    pub fn check_all_versions(&self) -> Vec<String> {
        let loaded: Vec<String> = self.cache.iter().map(|e| e.key().clone()).collect();
        let mut updated = Vec::new();

        for icao in loaded {
            match self.check_version(&icao) {
                Ok(true) => updated.push(icao),
                Ok(false) => {}
                Err(e) => {
                    log_warn!(
                        self.logger,
                        tags = LogTags::config(&icao),
                        "Version check error for {}: {}",
                        icao,
                        e
                    );
                }
            }
        }
        updated
    }

    fn read_file(&self, icao: &str) -> Result<AirportConfig, AirportConfigError> {
        let path = self.path_for(icao);
        log_debug!(
            self.logger,
            tags = LogTags::config(icao),
            "Reading airport config {}",
            path.display()
        );
        AirportConfig::from_path(icao, &path)
    }
}

impl StandConfigSource for AirportConfigStore {
    fn ensure_loaded(&self, icao: &str) -> Result<Arc<AirportConfig>, AirportConfigError> {
        let icao = normalize_icao(icao)?;

        if let Some(config) = self.cache.get(&icao) {
            return Ok(config.value().clone());
        }

        let config = Arc::new(self.read_file(&icao)?);
        let config = self
            .cache
            .entry(icao.clone())
            .or_insert(config)
            .value()
            .clone();

        log_info!(
            self.logger,
            tags = LogTags::config(&icao),
            "Loaded airport config for {} ({} stands)",
            icao,
            config.stands().map_or(0, <[_]>::len)
        );
        Ok(config)
    }
}

impl std::fmt::Debug for AirportConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirportConfigStore")
            .field("directory", &self.directory)
            .field("loaded", &self.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{LogFilter, LogLevel, MemoryLogger};
    use tempfile::TempDir;

    fn write_config(dir: &Path, icao: &str, body: &str) {
        std::fs::write(dir.join(format!("{}.json", icao)), body).unwrap();
    }

    #[test]
    fn test_normalize_icao() {
        assert_eq!(normalize_icao("lfpg").unwrap(), "LFPG");
        assert_eq!(normalize_icao(" EDDF ").unwrap(), "EDDF");
        assert!(normalize_icao("LFP").is_err());
        assert!(normalize_icao("../x").is_err());
        assert!(normalize_icao("LF/G").is_err());
    }

    #[test]
    fn test_ensure_loaded_reads_and_caches() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "LFBO", r#"{"Stands": {"10": {}}}"#);
        let store = AirportConfigStore::new(dir.path());

        let config = store.ensure_loaded("lfbo").unwrap();
        assert_eq!(config.stands().unwrap()[0].name, "10");
        assert_eq!(store.loaded_count(), 1);

        // Served from cache after the file is gone
        std::fs::remove_file(dir.path().join("LFBO.json")).unwrap();
        assert!(store.ensure_loaded("LFBO").is_ok());
    }

    #[test]
    fn test_ensure_loaded_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = AirportConfigStore::new(dir.path());
        assert!(matches!(
            store.ensure_loaded("KJFK"),
            Err(AirportConfigError::NotFound(_))
        ));
        assert!(matches!(
            store.ensure_loaded("K/FK"),
            Err(AirportConfigError::InvalidIcao(_))
        ));
    }

    #[test]
    fn test_insert_without_file() {
        let dir = TempDir::new().unwrap();
        let store = AirportConfigStore::new(dir.path());
        store.insert(AirportConfig::new("egll", vec![StandDefinition::new("501")]));

        assert!(store.ensure_loaded("EGLL").is_ok());
        assert!(store.get("egll").is_some());
        assert_eq!(store.stands("EGLL").unwrap().unwrap()[0].name, "501");
    }

    #[test]
    fn test_airport_list() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "lfpg", "{}");
        write_config(dir.path(), "EDDF", "{}");
        std::fs::write(dir.path().join("README.md"), "").unwrap();
        std::fs::write(dir.path().join("toolong.json"), "{}").unwrap();

        let store = AirportConfigStore::new(dir.path());
        assert_eq!(store.airport_list().unwrap(), vec!["EDDF", "LFPG"]);
    }

    #[test]
    fn test_check_version_swaps_on_change() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "LEMD", r#"{"version": 1, "Stands": {"A": {}}}"#);
        let logger = Arc::new(MemoryLogger::new());
        let store = AirportConfigStore::with_logger(dir.path(), logger.clone());

        store.ensure_loaded("LEMD").unwrap();
        assert!(!store.check_version("LEMD").unwrap());

        write_config(dir.path(), "LEMD", r#"{"version": 2, "Stands": {"A": {}, "B": {}}}"#);
        assert!(store.check_version("LEMD").unwrap());

        let config = store.ensure_loaded("LEMD").unwrap();
        assert_eq!(config.version(), Some("2"));
        assert_eq!(config.stands().unwrap().len(), 2);
        let loads = LogFilter::default().level(LogLevel::Info).icao("LEMD");
        assert_eq!(logger.count(&loads), 2);
    }

    #[test]
    fn test_check_all_versions_skips_failures() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "LIRF", r#"{"version": "a"}"#);
        let store = AirportConfigStore::new(dir.path());
        store.ensure_loaded("LIRF").unwrap();
        store.insert(AirportConfig::new("EHAM", vec![]));

        write_config(dir.path(), "LIRF", r#"{"version": "b"}"#);
        assert_eq!(store.check_all_versions(), vec!["LIRF"]);
    }
}
