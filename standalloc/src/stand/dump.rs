//! Diagnostic dumps for flights left without a stand.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Filter trace of one failed assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpReport {
    pub callsign: String,
    pub icao: String,
    pub created: DateTime<Utc>,
    pub lines: Vec<String>,
}

impl DumpReport {
    pub fn new(callsign: &str, icao: &str, lines: Vec<String>) -> Self {
        Self {
            callsign: callsign.to_string(),
            icao: icao.to_string(),
            created: Utc::now(),
            lines,
        }
    }

    /// Render the report as the text written to disk.
    pub fn render(&self) -> String {
        let mut out = format!(
            "No suitable stand for {} at {} ({})\n",
            self.callsign,
            self.icao,
            self.created.to_rfc3339()
        );
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Sink for diagnostic dumps.
///
/// Called outside the engine lock. Errors are reported back to the engine,
/// which logs and drops them.
pub trait DiagnosticDump: Send + Sync {
    fn write(&self, report: &DumpReport) -> io::Result<()>;
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDump;

impl DiagnosticDump for NoDump {
    fn write(&self, _report: &DumpReport) -> io::Result<()> {
        Ok(())
    }
}

/// Writes each report to `<directory>/<CALLSIGN>_<ICAO>.log`, replacing any
/// previous dump of the same flight.
#[derive(Debug, Clone)]
pub struct FileDump {
    directory: PathBuf,
}

impl FileDump {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Destination file of a report.
    pub fn path_for(&self, callsign: &str, icao: &str) -> PathBuf {
        self.directory
            .join(format!("{}_{}.log", file_safe(callsign), file_safe(icao)))
    }
}

impl DiagnosticDump for FileDump {
    fn write(&self, report: &DumpReport) -> io::Result<()> {
        std::fs::create_dir_all(&self.directory)?;
        let mut file = std::fs::File::create(self.path_for(&report.callsign, &report.icao))?;
        file.write_all(report.render().as_bytes())?;
        file.flush()
    }
}

fn file_safe(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
