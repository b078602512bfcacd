//! Markdown summary grouped by integration

use ha_core::is_unknown_or_unavailable;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ReportResult;
use crate::export::write_artifact;
use crate::record::SensorRecord;
use crate::stamp::{Artifact, RunStamp};

/// Rows listed per integration before the overflow row
pub const MAX_ROWS_PER_INTEGRATION: usize = 10;

/// Health badge shown for each listed entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Healthy,
    Issue,
}

impl Status {
    /// `Issue` only for the exact states "unknown" and "unavailable"
    pub fn of(record: &SensorRecord) -> Self {
        if is_unknown_or_unavailable(&record.state) {
            Status::Issue
        } else {
            Status::Healthy
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Status::Healthy => "✅ OK",
            Status::Issue => "❌ Issue",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.badge())
    }
}

/// The human-readable report; rendered through `Display`
pub struct SummaryReport<'a> {
    generated: String,
    sensors: &'a [SensorRecord],
    binary_sensors: &'a [SensorRecord],
}

impl<'a> SummaryReport<'a> {
    pub fn new(
        sensors: &'a [SensorRecord],
        binary_sensors: &'a [SensorRecord],
        stamp: &RunStamp,
    ) -> Self {
        Self {
            generated: stamp.display(),
            sensors,
            binary_sensors,
        }
    }

    /// Records keyed by integration, sorted by name
    ///
    /// Members keep arrival order: sensors first, then binary sensors.
    pub fn groups(&self) -> BTreeMap<&'a str, Vec<&'a SensorRecord>> {
        let mut groups: BTreeMap<&'a str, Vec<&'a SensorRecord>> = BTreeMap::new();
        for record in self.sensors.iter().chain(self.binary_sensors) {
            groups
                .entry(record.integration.as_str())
                .or_default()
                .push(record);
        }
        groups
    }

    fn write_group(
        f: &mut fmt::Formatter<'_>,
        integration: &str,
        members: &[&SensorRecord],
    ) -> fmt::Result {
        writeln!(f, "### {}", integration)?;
        writeln!(f, "**Count:** {}", members.len())?;
        writeln!(f)?;
        writeln!(f, "| Entity ID | Friendly Name | State | Unit | Status |")?;
        writeln!(f, "|-----------|---------------|-------|------|--------|")?;

        for record in members.iter().take(MAX_ROWS_PER_INTEGRATION) {
            writeln!(
                f,
                "| `{}` | {} | {} | {} | {} |",
                record.entity_id,
                record.friendly_name,
                record.state,
                record.unit,
                Status::of(record)
            )?;
        }

        if members.len() > MAX_ROWS_PER_INTEGRATION {
            writeln!(
                f,
                "| ... | *{} more entities* | ... | ... | ... |",
                members.len() - MAX_ROWS_PER_INTEGRATION
            )?;
        }

        writeln!(f)
    }
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Home Assistant Sensor Report")?;
        writeln!(f)?;
        writeln!(f, "**Generated:** {}", self.generated)?;
        writeln!(f)?;
        writeln!(f, "**Total Sensors:** {}", self.sensors.len())?;
        writeln!(f, "**Total Binary Sensors:** {}", self.binary_sensors.len())?;
        writeln!(
            f,
            "**Total Entities:** {}",
            self.sensors.len() + self.binary_sensors.len()
        )?;
        writeln!(f)?;
        writeln!(f, "## Sensors by Integration")?;
        writeln!(f)?;

        for (integration, members) in self.groups() {
            Self::write_group(f, integration, &members)?;
        }
        Ok(())
    }
}

/// Write `sensors_summary_<ts>.md` into `dir`
pub fn write_summary(
    dir: &Path,
    stamp: &RunStamp,
    sensors: &[SensorRecord],
    binary_sensors: &[SensorRecord],
) -> ReportResult<PathBuf> {
    let path = stamp.artifact_path(dir, Artifact::Summary);
    let report = SummaryReport::new(sensors, binary_sensors, stamp);

    write_artifact(Artifact::Summary, &path, |file| {
        write!(file, "{}", report)
    })?;

    info!("Wrote summary: {}", path.display());
    Ok(path)
}
