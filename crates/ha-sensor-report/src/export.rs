//! CSV and JSON export of the normalized records
//!
//! Neither writer uses a temporary file: an interrupted write leaves a
//! partial artifact behind.

use ha_config::CsvHeaderMode;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ReportError, ReportResult};
use crate::record::{SensorRecord, COLUMNS};
use crate::stamp::{Artifact, RunStamp};

/// Document written to `sensors_report_<ts>.json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub sensors: &'a [SensorRecord],
    pub binary_sensors: &'a [SensorRecord],
    pub generation_time: String,
    pub total_sensors: usize,
    pub total_binary_sensors: usize,
}

impl<'a> JsonReport<'a> {
    pub fn new(
        sensors: &'a [SensorRecord],
        binary_sensors: &'a [SensorRecord],
        stamp: &RunStamp,
    ) -> Self {
        Self {
            sensors,
            binary_sensors,
            generation_time: stamp.iso(),
            total_sensors: sensors.len(),
            total_binary_sensors: binary_sensors.len(),
        }
    }
}

/// Write the header and every sensor row, then every binary sensor row
pub fn write_csv_to<W: Write>(
    writer: W,
    sensors: &[SensorRecord],
    binary_sensors: &[SensorRecord],
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for record in sensors.iter().chain(binary_sensors) {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `sensors_report_<ts>.csv` into `dir`
///
/// In [`CsvHeaderMode::FirstRecord`] mode the header is taken to come from
/// the first sensor, so a run without sensors writes no CSV at all and
/// returns `Ok(None)`, even when binary sensors exist.
pub fn write_csv(
    dir: &Path,
    stamp: &RunStamp,
    sensors: &[SensorRecord],
    binary_sensors: &[SensorRecord],
    mode: CsvHeaderMode,
) -> ReportResult<Option<PathBuf>> {
    if sensors.is_empty() && mode == CsvHeaderMode::FirstRecord {
        info!(
            "No sensors found, skipping CSV report ({} binary sensors not exported to CSV)",
            binary_sensors.len()
        );
        return Ok(None);
    }

    let path = stamp.artifact_path(dir, Artifact::Csv);
    write_artifact(Artifact::Csv, &path, |file| {
        write_csv_to(file, sensors, binary_sensors).map_err(io::Error::from)
    })?;

    info!(
        "Wrote CSV report with {} rows: {}",
        sensors.len() + binary_sensors.len(),
        path.display()
    );
    Ok(Some(path))
}

/// Write the JSON document, pretty-printed with two-space indentation
pub fn write_json_to<W: Write>(writer: W, report: &JsonReport<'_>) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, report)
}

/// Write `sensors_report_<ts>.json` into `dir`; written even when empty
pub fn write_json(
    dir: &Path,
    stamp: &RunStamp,
    sensors: &[SensorRecord],
    binary_sensors: &[SensorRecord],
) -> ReportResult<PathBuf> {
    let path = stamp.artifact_path(dir, Artifact::Json);
    let report = JsonReport::new(sensors, binary_sensors, stamp);

    write_artifact(Artifact::Json, &path, |file| {
        write_json_to(file, &report).map_err(io::Error::from)
    })?;

    info!("Wrote JSON report: {}", path.display());
    Ok(path)
}

/// Create `path` and hand a buffered writer to `write`
pub(crate) fn write_artifact<F>(artifact: Artifact, path: &Path, write: F) -> ReportResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let to_error = |source| ReportError::WriteFailure {
        artifact,
        path: path.to_path_buf(),
        source,
    };

    debug!("Writing {} to {}", artifact, path.display());
    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).map_err(to_error)?;
    writer.flush().map_err(to_error)
}
