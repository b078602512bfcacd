//! End-to-end report runs against an in-memory state source

use async_trait::async_trait;
use chrono::{Local, TimeZone};
use ha_client::{ClientError, StateSource, StatusCode};
use ha_config::{CsvHeaderMode, ReportConfig};
use ha_core::State;
use ha_sensor_report::{run_with_source, Artifact, ReportError, RunStamp};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

enum FakeSource {
    States(Vec<State>),
    Fails(StatusCode),
}

#[async_trait]
impl StateSource for FakeSource {
    async fn fetch_states(&self) -> Result<Vec<State>, ClientError> {
        match self {
            FakeSource::States(states) => Ok(states.clone()),
            FakeSource::Fails(status) => Err(ClientError::Status {
                url: "http://fake/api/states".to_string(),
                status: *status,
            }),
        }
    }

    fn describe(&self) -> String {
        "fake".to_string()
    }
}

fn state(entity_id: &str, value: &str, attributes: Value) -> State {
    serde_json::from_value(json!({
        "entity_id": entity_id,
        "state": value,
        "attributes": attributes,
        "last_updated": "2026-01-07T10:00:00+00:00",
        "last_changed": "2026-01-07T09:00:00+00:00"
    }))
    .unwrap()
}

fn config(dir: &Path) -> ReportConfig {
    ReportConfig {
        endpoint: "http://fake:8123".to_string(),
        token: "token".to_string(),
        output_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

fn stamp() -> RunStamp {
    RunStamp::from_datetime(Local.with_ymd_and_hms(2026, 1, 7, 11, 22, 33).unwrap())
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_temp_and_door_example() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::States(vec![
        state("sensor.temp", "21.5", json!({"unit_of_measurement": "°C"})),
        state("binary_sensor.door", "unavailable", json!({"attribution": "hue"})),
    ]);

    let outcome = run_with_source(&source, &config(dir.path()), stamp())
        .await
        .unwrap();

    assert_eq!(outcome.sensor_count, 1);
    assert_eq!(outcome.binary_sensor_count, 1);
    assert!(outcome.csv.is_some());

    let report = read_json(&outcome.json);
    assert_eq!(report["total_sensors"], 1);
    assert_eq!(report["total_binary_sensors"], 1);
    assert_eq!(report["sensors"][0]["Unit"], "°C");
    assert_eq!(report["sensors"][0]["Integration"], "N/A");
    assert_eq!(report["binary_sensors"][0]["Integration"], "hue");

    let summary = std::fs::read_to_string(&outcome.summary).unwrap();
    let na_at = summary.find("### N/A").unwrap();
    let hue_at = summary.find("### hue").unwrap();
    assert!(na_at < hue_at);
    assert!(summary.contains("| `sensor.temp` | N/A | 21.5 | °C | ✅ OK |"));
    assert!(summary.contains("| `binary_sensor.door` | N/A | unavailable | N/A | ❌ Issue |"));

    let csv = std::fs::read_to_string(outcome.csv.unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("sensor.temp,"));
    assert!(lines[2].starts_with("binary_sensor.door,"));
}

#[tokio::test]
async fn test_artifacts_share_run_stamp() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::States(vec![state("sensor.a", "1", json!({}))]);

    let outcome = run_with_source(&source, &config(dir.path()), stamp())
        .await
        .unwrap();

    for artifact in [Artifact::Csv, Artifact::Json, Artifact::Summary] {
        assert!(stamp().artifact_path(dir.path(), artifact).exists());
    }
    assert_eq!(
        read_json(&outcome.json)["generation_time"],
        "2026-01-07T11:22:33"
    );
    assert!(std::fs::read_to_string(&outcome.summary)
        .unwrap()
        .contains("**Generated:** 2026-01-07 11:22:33"));
}

#[tokio::test]
async fn test_fetch_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("reports");
    let source = FakeSource::Fails(StatusCode::UNAUTHORIZED);

    let err = run_with_source(&source, &config(&output_dir), stamp())
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::RemoteUnavailable { .. }));
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn test_empty_snapshot_is_remote_unavailable() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("reports");
    let source = FakeSource::States(Vec::new());

    let err = run_with_source(&source, &config(&output_dir), stamp())
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::RemoteUnavailable { source: None, .. }));
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn test_binary_sensors_only_skips_csv() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::States(vec![
        state("binary_sensor.door", "off", json!({})),
        state("binary_sensor.window", "on", json!({})),
    ]);

    let outcome = run_with_source(&source, &config(dir.path()), stamp())
        .await
        .unwrap();

    assert!(outcome.csv.is_none());
    assert!(!stamp().artifact_path(dir.path(), Artifact::Csv).exists());
    assert!(outcome.json.exists());
    assert!(outcome.summary.exists());
    assert_eq!(read_json(&outcome.json)["total_binary_sensors"], 2);
}

#[tokio::test]
async fn test_binary_sensors_only_schema_mode_writes_csv() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::States(vec![state("binary_sensor.door", "off", json!({}))]);
    let mut config = config(dir.path());
    config.csv_header = CsvHeaderMode::Schema;

    let outcome = run_with_source(&source, &config, stamp()).await.unwrap();

    let csv = std::fs::read_to_string(outcome.csv.unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 2);
}

#[tokio::test]
async fn test_no_matching_entities_still_writes_json() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::States(vec![
        state("light.kitchen", "on", json!({})),
        state("switch.fan", "off", json!({})),
    ]);

    let outcome = run_with_source(&source, &config(dir.path()), stamp())
        .await
        .unwrap();

    let report = read_json(&outcome.json);
    assert_eq!(report["total_sensors"], 0);
    assert_eq!(report["total_binary_sensors"], 0);
    assert!(outcome.csv.is_none());
    assert!(outcome.summary.exists());
}

#[tokio::test]
async fn test_output_dir_is_created() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("nested").join("reports");
    let source = FakeSource::States(vec![state("sensor.a", "1", json!({}))]);

    run_with_source(&source, &config(&output_dir), stamp())
        .await
        .unwrap();

    assert!(output_dir.is_dir());
}

#[tokio::test]
async fn test_output_dir_failure() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();
    let source = FakeSource::States(vec![state("sensor.a", "1", json!({}))]);

    let err = run_with_source(&source, &config(&blocker), stamp())
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::OutputDirectory { .. }));
}

#[tokio::test]
async fn test_summary_failure_keeps_earlier_artifacts() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(stamp().artifact_path(dir.path(), Artifact::Summary)).unwrap();
    let source = FakeSource::States(vec![state("sensor.a", "1", json!({}))]);

    let err = run_with_source(&source, &config(dir.path()), stamp())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReportError::WriteFailure {
            artifact: Artifact::Summary,
            ..
        }
    ));
    assert!(stamp().artifact_path(dir.path(), Artifact::Csv).exists());
    assert!(stamp().artifact_path(dir.path(), Artifact::Json).exists());
}

#[tokio::test]
async fn test_ungrouped_ids_and_domains() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::States(vec![
        state("sensor.a", "1", json!({"attribution": "zigbee"})),
        state("sensor.b", "2", json!({"attribution": "Met.no"})),
        state("orphan", "3", json!({})),
    ]);

    let outcome = run_with_source(&source, &config(dir.path()), stamp())
        .await
        .unwrap();

    assert_eq!(outcome.sensor_count, 2);
    let report = read_json(&outcome.json);
    assert_eq!(report["sensors"][0]["Domain"], "sensor");

    let summary = std::fs::read_to_string(&outcome.summary).unwrap();
    assert!(summary.find("### Met.no").unwrap() < summary.find("### zigbee").unwrap());
    assert!(!summary.contains("orphan"));
}
