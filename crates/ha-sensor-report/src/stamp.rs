//! Run timestamp and artifact naming
//!
//! One instant is captured per run; every file name and every timestamp
//! written into the artifacts is derived from it.

use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};

/// The three files a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Csv,
    Json,
    Summary,
}

impl Artifact {
    fn prefix(&self) -> &'static str {
        match self {
            Artifact::Csv | Artifact::Json => "sensors_report",
            Artifact::Summary => "sensors_summary",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            Artifact::Csv => "csv",
            Artifact::Json => "json",
            Artifact::Summary => "md",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Artifact::Csv => "CSV report",
            Artifact::Json => "JSON report",
            Artifact::Summary => "summary",
        })
    }
}

/// The instant a run started, in local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStamp {
    at: DateTime<Local>,
}

impl RunStamp {
    pub fn now() -> Self {
        Self { at: Local::now() }
    }

    pub fn from_datetime(at: DateTime<Local>) -> Self {
        Self { at }
    }

    /// `YYYYMMDD_HHMMSS`, used in file names
    pub fn file_stamp(&self) -> String {
        self.at.format("%Y%m%d_%H%M%S").to_string()
    }

    /// ISO-8601 local time without offset
    ///
    /// Microseconds are printed only when non-zero.
    pub fn iso(&self) -> String {
        if self.at.timestamp_subsec_micros() == 0 {
            self.at.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            self.at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
        }
    }

    /// `YYYY-MM-DD HH:MM:SS`, shown in the summary header
    pub fn display(&self) -> String {
        self.at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn file_name(&self, artifact: Artifact) -> String {
        format!(
            "{}_{}.{}",
            artifact.prefix(),
            self.file_stamp(),
            artifact.extension()
        )
    }

    pub fn artifact_path(&self, dir: &Path, artifact: Artifact) -> PathBuf {
        dir.join(self.file_name(artifact))
    }
}
