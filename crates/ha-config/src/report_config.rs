//! Sensor report configuration
//!
//! Parses the `sensor_report:` section of the report's YAML file. A document
//! without that section is read as the section itself.

use serde::Deserialize;
use serde_yaml::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::loader::YamlLoader;

/// Name of the YAML section holding the report configuration
pub const SECTION: &str = "sensor_report";

/// How the CSV header is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CsvHeaderMode {
    /// Header comes from the first sensor record; no sensors means no CSV file
    #[default]
    FirstRecord,
    /// Header always comes from the fixed record schema
    Schema,
}

impl CsvHeaderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CsvHeaderMode::FirstRecord => "first-record",
            CsvHeaderMode::Schema => "schema",
        }
    }
}

impl FromStr for CsvHeaderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-record" => Ok(CsvHeaderMode::FirstRecord),
            "schema" => Ok(CsvHeaderMode::Schema),
            other => Err(format!(
                "unknown CSV header mode '{}' (expected 'first-record' or 'schema')",
                other
            )),
        }
    }
}

impl fmt::Display for CsvHeaderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log verbosity for the report binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Everything one report run needs, fixed at process start
#[derive(Clone, Deserialize)]
pub struct ReportConfig {
    /// Base URL of the Home Assistant instance (e.g. "http://192.168.1.30:8123")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Long-lived access token sent as a bearer credential
    #[serde(default)]
    pub token: String,

    /// Directory the report files are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub csv_header: CsvHeaderMode,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub log_level: LogLevel,
}

/// Values supplied on the command line or environment, applied over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub csv_header: Option<CsvHeaderMode>,
    pub log_level: Option<LogLevel>,
}

fn default_endpoint() -> String {
    "http://homeassistant.local:8123".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("sensor_reports")
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: String::new(),
            output_dir: default_output_dir(),
            csv_header: CsvHeaderMode::default(),
            timeout_secs: default_timeout_secs(),
            log_level: LogLevel::default(),
        }
    }
}

impl ReportConfig {
    /// Load the configuration from a YAML file
    ///
    /// `!secret` values are looked up in `secrets.yaml` beside the file. The
    /// result is not validated; overrides are applied first, then
    /// [`ReportConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let config_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let loader = YamlLoader::new(config_dir)?;
        let yaml = loader.load_file(path)?;
        Self::from_yaml(&yaml)
    }

    /// Parse the configuration from an already tag-processed YAML value
    pub fn from_yaml(yaml: &Value) -> ConfigResult<Self> {
        let section = match yaml {
            Value::Null => Value::Mapping(serde_yaml::Mapping::new()),
            Value::Mapping(map) => map
                .get(&Value::String(SECTION.to_string()))
                .cloned()
                .unwrap_or_else(|| yaml.clone()),
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "root".to_string(),
                    reason: "configuration must be a mapping".to_string(),
                })
            }
        };

        serde_yaml::from_value(section).map_err(|e| ConfigError::InvalidValue {
            key: SECTION.to_string(),
            reason: e.to_string(),
        })
    }

    /// Apply command line / environment overrides
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(token) = overrides.token {
            self.token = token;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(csv_header) = overrides.csv_header {
            self.csv_header = csv_header;
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
        self
    }

    /// Check that the configuration can drive a run
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed {
                message: format!(
                    "endpoint '{}' must start with http:// or https://",
                    self.endpoint
                ),
            });
        }
        if self.token.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                message: "token must not be empty".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Endpoint without trailing slashes
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for ReportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .field("output_dir", &self.output_dir)
            .field("csv_header", &self.csv_header)
            .field("timeout_secs", &self.timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
