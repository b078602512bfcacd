//! YAML configuration loading for the sensor report
//!
//! The report is configured from a YAML file that follows Home Assistant's
//! conventions, so the bearer token can live in `secrets.yaml` or in the
//! environment instead of the config file itself:
//!
//! - `!secret key` - Substitute from secrets.yaml next to the config file
//! - `!env_var VAR` - Environment variable substitution
//!
//! # Example
//!
//! ```ignore
//! use ha_config::ReportConfig;
//!
//! // sensor_report:
//! //   endpoint: http://homeassistant.local:8123
//! //   token: !secret ha_token
//! //   output_dir: /config/sensor_reports
//! let config = ReportConfig::load("/config/sensor_report.yaml")?;
//! config.validate()?;
//! ```

mod error;
mod loader;
mod report_config;
mod secrets;

pub use error::{ConfigError, ConfigResult};
pub use report_config::{ConfigOverrides, CsvHeaderMode, LogLevel, ReportConfig};
