//! Home Assistant sensor report
//!
//! Pulls one state snapshot from a Home Assistant instance and writes the
//! CSV, JSON and Markdown sensor reports into the output directory.

use anyhow::{Context, Result};
use clap::Parser;
use ha_config::{ConfigOverrides, CsvHeaderMode, LogLevel, ReportConfig};
use ha_sensor_report::ReportOutcome;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Parser)]
#[command(name = "sensor-report")]
#[command(about = "Export Home Assistant sensors and binary sensors to CSV, JSON and Markdown")]
#[command(version)]
struct Cli {
    /// YAML config file; reads its `sensor_report:` section
    #[arg(short, long, env = "HA_REPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the Home Assistant instance
    #[arg(long, env = "HA_URL")]
    endpoint: Option<String>,

    /// Long-lived access token
    #[arg(long, env = "HA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Directory the reports are written into
    #[arg(short, long, env = "HA_REPORT_DIR")]
    output_dir: Option<PathBuf>,

    /// CSV header mode: first-record or schema
    #[arg(long)]
    csv_header: Option<CsvHeaderMode>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            token: self.token.clone(),
            output_dir: self.output_dir.clone(),
            csv_header: self.csv_header,
            log_level: self.verbose.then_some(LogLevel::Debug),
        }
    }

    /// File settings first, then flags and environment on top
    fn load_config(&self) -> Result<ReportConfig> {
        let base = match &self.config {
            Some(path) => ReportConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => ReportConfig::default(),
        };

        let config = base.with_overrides(self.overrides());
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    init_tracing(config.log_level)?;

    info!("Starting Home Assistant sensor report");
    info!(
        "Endpoint: {}, output directory: {}, CSV header: {}",
        config.base_url(),
        config.output_dir.display(),
        config.csv_header
    );

    let outcome = match ha_sensor_report::run_report(&config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Report failed: {}", e);
            return Err(e).context("sensor report run failed");
        }
    };

    print_outcome(&outcome);
    Ok(())
}

fn init_tracing(level: LogLevel) -> Result<()> {
    // RUST_LOG wins over the configured level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn print_outcome(outcome: &ReportOutcome) {
    println!(
        "Processed {} sensors and {} binary sensors",
        outcome.sensor_count, outcome.binary_sensor_count
    );
    println!("Reports generated:");
    match &outcome.csv {
        Some(path) => println!("  CSV: {}", path.display()),
        None => println!("  CSV: skipped (no sensors)"),
    }
    println!("  JSON: {}", outcome.json.display());
    println!("  Summary: {}", outcome.summary.display());
}
