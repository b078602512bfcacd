//! Secrets store backed by secrets.yaml
//!
//! The bearer token is usually kept here so the report config itself can be
//! shared without leaking credentials.

use crate::error::{ConfigError, ConfigResult};
use serde_yaml::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the config directory
pub const SECRETS_FILE: &str = "secrets.yaml";

/// Secrets loaded from secrets.yaml
#[derive(Clone)]
pub struct Secrets {
    values: HashMap<String, String>,
    path: PathBuf,
}

impl Secrets {
    /// Load secrets from `<config_dir>/secrets.yaml`
    ///
    /// A missing file yields an empty store; a present but unreadable or
    /// malformed file is an error.
    pub fn load(config_dir: &Path) -> ConfigResult<Self> {
        let path = config_dir.join(SECRETS_FILE);

        if !path.exists() {
            debug!("No secrets file at {:?}, using empty secrets", path);
            return Ok(Self {
                values: HashMap::new(),
                path,
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parse secrets from YAML text
    pub fn parse(content: &str, path: PathBuf) -> ConfigResult<Self> {
        let raw: Option<HashMap<String, Value>> =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
                path: path.clone(),
                source: e,
            })?;

        let values: HashMap<String, String> = raw
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k, scalar_to_string(v)))
            .collect();

        debug!("Loaded {} secrets from {:?}", values.len(), path);

        Ok(Self { values, path })
    }

    /// Get a secret by key
    pub fn get(&self, key: &str) -> ConfigResult<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::SecretNotFound {
                key: key.to_string(),
            })
    }
}

// Keys only; values never reach logs.
impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("Secrets")
            .field("keys", &keys)
            .field("path", &self.path)
            .finish()
    }
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(&other)
            .unwrap_or_default()
            .trim()
            .to_string(),
    }
}
