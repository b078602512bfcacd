//! YAML loader with custom tag support
//!
//! Supports the Home Assistant tags that make sense for a standalone config:
//! - `!secret key` - Substitute from secrets.yaml
//! - `!env_var VAR` - Environment variable substitution
//!
//! Any other tag is kept as-is with its inner value processed.

use crate::error::{ConfigError, ConfigResult};
use crate::secrets::Secrets;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// YAML loader that resolves `!secret` and `!env_var`
pub struct YamlLoader {
    /// Base directory for resolving relative paths
    config_dir: PathBuf,
    secrets: Secrets,
}

impl YamlLoader {
    /// Create a loader for the given config directory, loading its secrets
    pub fn new(config_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let config_dir = config_dir.into();
        let secrets = Secrets::load(&config_dir)?;

        Ok(Self {
            config_dir,
            secrets,
        })
    }

    /// Load and process a YAML file
    pub fn load_file(&self, path: impl AsRef<Path>) -> ConfigResult<Value> {
        let path = self.resolve_path(path.as_ref());
        debug!("Loading YAML file: {:?}", path);

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        self.load_string(&content, &path)
    }

    /// Load and process YAML from a string
    pub fn load_string(&self, content: &str, source_path: &Path) -> ConfigResult<Value> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
            path: source_path.to_path_buf(),
            source: e,
        })?;

        self.process_value(value)
    }

    fn process_value(&self, value: Value) -> ConfigResult<Value> {
        match value {
            Value::Tagged(tagged) => self.process_tagged(*tagged),
            Value::Mapping(map) => {
                let mut result = serde_yaml::Mapping::new();
                for (k, v) in map {
                    result.insert(self.process_value(k)?, self.process_value(v)?);
                }
                Ok(Value::Mapping(result))
            }
            Value::Sequence(seq) => {
                let result: ConfigResult<Vec<Value>> =
                    seq.into_iter().map(|v| self.process_value(v)).collect();
                Ok(Value::Sequence(result?))
            }
            _ => Ok(value),
        }
    }

    fn process_tagged(&self, tagged: serde_yaml::value::TaggedValue) -> ConfigResult<Value> {
        let tag = tagged.tag.to_string();
        trace!("Processing tag '{}'", tag);

        match tag.as_str() {
            "!secret" => self.process_secret(tagged.value),
            "!env_var" => self.process_env_var(tagged.value),
            _ => {
                let processed = self.process_value(tagged.value)?;
                Ok(Value::Tagged(Box::new(serde_yaml::value::TaggedValue {
                    tag: tagged.tag,
                    value: processed,
                })))
            }
        }
    }

    fn process_secret(&self, value: Value) -> ConfigResult<Value> {
        let key = tag_argument("!secret", value)?;
        let secret_value = self.secrets.get(&key)?;
        debug!("Substituted secret: {}", key);
        Ok(Value::String(secret_value.to_string()))
    }

    fn process_env_var(&self, value: Value) -> ConfigResult<Value> {
        let var_name = tag_argument("!env_var", value)?;
        let env_value = std::env::var(&var_name).map_err(|_| ConfigError::EnvVarNotFound {
            var: var_name.clone(),
        })?;

        debug!("Substituted env var: {}", var_name);
        Ok(Value::String(env_value))
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config_dir.join(path)
        }
    }
}

fn tag_argument(tag: &str, value: Value) -> ConfigResult<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ConfigError::InvalidValue {
            key: tag.to_string(),
            reason: format!("expected a string argument, got {:?}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn load_yaml(dir: &Path, file: &str) -> ConfigResult<Value> {
        YamlLoader::new(dir)?.load_file(file)
    }

    fn load_yaml_string(dir: &Path, content: &str, name: &str) -> ConfigResult<Value> {
        YamlLoader::new(dir)?.load_string(content, Path::new(name))
    }

    fn get<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
        value
            .as_mapping()
            .and_then(|m| m.get(&Value::String(key.to_string())))
    }

    #[test]
    fn test_load_simple_yaml() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "config.yaml",
            "endpoint: http://localhost:8123\noutput_dir: reports\n",
        );

        let value = load_yaml(dir.path(), "config.yaml").unwrap();
        assert_eq!(
            get(&value, "endpoint"),
            Some(&Value::String("http://localhost:8123".to_string()))
        );
    }

    #[test]
    fn test_secret() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "secrets.yaml", "ha_token: secret123\n");
        write_file(dir.path(), "config.yaml", "token: !secret ha_token\n");

        let value = load_yaml(dir.path(), "config.yaml").unwrap();
        assert_eq!(
            get(&value, "token"),
            Some(&Value::String("secret123".to_string()))
        );
    }

    #[test]
    fn test_secret_in_nested_section() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "secrets.yaml", "ha_token: nested\n");

        let value = load_yaml_string(
            dir.path(),
            "sensor_report:\n  token: !secret ha_token\n",
            "inline.yaml",
        )
        .unwrap();
        let section = get(&value, "sensor_report").unwrap();
        assert_eq!(
            get(section, "token"),
            Some(&Value::String("nested".to_string()))
        );
    }

    #[test]
    fn test_missing_secret() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "config.yaml", "token: !secret nope\n");

        let result = load_yaml(dir.path(), "config.yaml");
        assert!(matches!(result, Err(ConfigError::SecretNotFound { key }) if key == "nope"));
    }

    #[test]
    fn test_env_var() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("TEST_HA_REPORT_LOADER_VAR", "env_value");
        write_file(
            dir.path(),
            "config.yaml",
            "token: !env_var TEST_HA_REPORT_LOADER_VAR\n",
        );

        let value = load_yaml(dir.path(), "config.yaml").unwrap();
        assert_eq!(
            get(&value, "token"),
            Some(&Value::String("env_value".to_string()))
        );

        std::env::remove_var("TEST_HA_REPORT_LOADER_VAR");
    }

    #[test]
    fn test_missing_env_var() {
        let dir = TempDir::new().unwrap();
        let result = load_yaml_string(
            dir.path(),
            "token: !env_var TEST_HA_REPORT_DEFINITELY_UNSET\n",
            "inline.yaml",
        );
        assert!(matches!(result, Err(ConfigError::EnvVarNotFound { .. })));
    }

    #[test]
    fn test_non_string_tag_argument() {
        let dir = TempDir::new().unwrap();
        let result = load_yaml_string(dir.path(), "token: !secret [a, b]\n", "inline.yaml");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_unknown_tag_is_kept() {
        let dir = TempDir::new().unwrap();
        let value = load_yaml_string(dir.path(), "extra: !custom value\n", "inline.yaml").unwrap();
        assert!(matches!(get(&value, "extra"), Some(Value::Tagged(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_yaml(dir.path(), "absent.yaml");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }
}
