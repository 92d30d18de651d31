//! Pilot list files.
//!
//! A pilot file is a JSON array of [`Pilot`] objects.

use std::path::{Path, PathBuf};

use super::directory::InMemoryPilotDirectory;
use super::model::Pilot;

#[derive(Debug, thiserror::Error)]
pub enum PilotFileError {
    #[error("Pilot file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read pilot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pilot file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a pilot list from `path`.
pub fn load_pilots<P: AsRef<Path>>(path: P) -> Result<Vec<Pilot>, PilotFileError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PilotFileError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

impl InMemoryPilotDirectory {
    /// Build a directory from a pilot list file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PilotFileError> {
        Ok(Self::from_pilots(load_pilots(path)?))
    }
}
