//! One report run: fetch, partition, normalize, write

use ha_client::{HaClient, StateSource};
use ha_config::ReportConfig;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{ReportError, ReportResult};
use crate::export::{write_csv, write_json};
use crate::filter::partition;
use crate::record::SensorRecord;
use crate::stamp::RunStamp;
use crate::summary::write_summary;

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub stamp: RunStamp,
    pub sensor_count: usize,
    pub binary_sensor_count: usize,
    /// `None` when the CSV was skipped for lack of sensors
    pub csv: Option<PathBuf>,
    pub json: PathBuf,
    pub summary: PathBuf,
}

/// Run the report against the state server described by `config`
pub async fn run_report(config: &ReportConfig) -> ReportResult<ReportOutcome> {
    let client = HaClient::new(config.base_url(), &config.token, config.timeout()).map_err(
        |e| ReportError::RemoteUnavailable {
            reason: "could not set up HTTP client".to_string(),
            source: Some(e),
        },
    )?;

    run_with_source(&client, config, RunStamp::now()).await
}

/// Run the report against any state source with a fixed run stamp
///
/// Stages run strictly in order. A fetch failure writes nothing; a write
/// failure stops the run but leaves earlier artifacts on disk.
pub async fn run_with_source(
    source: &dyn StateSource,
    config: &ReportConfig,
    stamp: RunStamp,
) -> ReportResult<ReportOutcome> {
    info!("Fetching entity states from {}", source.describe());
    let states = source
        .fetch_states()
        .await
        .map_err(|e| ReportError::RemoteUnavailable {
            reason: format!("could not fetch states from {}", source.describe()),
            source: Some(e),
        })?;

    if states.is_empty() {
        return Err(ReportError::RemoteUnavailable {
            reason: format!("{} returned no entities", source.describe()),
            source: None,
        });
    }
    debug!("Snapshot holds {} entities", states.len());

    let split = partition(&states);
    info!(
        "Found {} sensors and {} binary sensors",
        split.sensors.len(),
        split.binary_sensors.len()
    );

    let sensors = SensorRecord::from_states(split.sensors.iter().copied());
    let binary_sensors = SensorRecord::from_states(split.binary_sensors.iter().copied());

    let dir = config.output_dir.as_path();
    fs::create_dir_all(dir).map_err(|source| ReportError::OutputDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let csv = write_csv(dir, &stamp, &sensors, &binary_sensors, config.csv_header)?;
    let json = write_json(dir, &stamp, &sensors, &binary_sensors)?;
    let summary = write_summary(dir, &stamp, &sensors, &binary_sensors)?;

    Ok(ReportOutcome {
        stamp,
        sensor_count: sensors.len(),
        binary_sensor_count: binary_sensors.len(),
        csv,
        json,
        summary,
    })
}
