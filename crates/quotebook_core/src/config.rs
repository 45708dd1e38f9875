//! Runtime configuration.
//!
//! # Responsibility
//! - Load settings from an optional JSON file, then apply `QB_*` environment
//!   overrides.
//! - Reject values core cannot run with before anything is opened.
//!
//! ## Environment variables
//! - `QB_DB_PATH`: durable slot database file (default: `quotebook.sqlite3`)
//! - `QB_LOG_DIR`: absolute directory for rolling logs (default: unset, no file logs)
//! - `QB_LOG_LEVEL`: `trace|debug|info|warn|error` (default: build-mode dependent)
//! - `QB_SYNC_ENABLED`: `true|false` (default: `true`)
//! - `QB_SYNC_ENDPOINT`: remote collection URL
//! - `QB_SYNC_INTERVAL_SECS`: reconcile period (default: 60)
//! - `QB_SYNC_TIMEOUT_SECS`: HTTP request timeout (default: 10)

use crate::logging::{default_log_level, parse_level};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DB_FILE_NAME: &str = "quotebook.sqlite3";
pub const DEFAULT_SYNC_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// Configuration loading/validation error.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    InvalidValue {
        key: &'static str,
        value: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::InvalidValue { key, value } => write!(f, "invalid value for {key}: `{value}`"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

/// Remote reconciliation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub interval_secs: u64,
    pub timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_SYNC_ENDPOINT.to_string(),
            interval_secs: 60,
            timeout_secs: 10,
        }
    }
}

impl SyncConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level quotebook configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotebookConfig {
    pub db_path: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
    pub sync: SyncConfig,
}

impl Default for QuotebookConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_dir: None,
            log_level: default_log_level().to_string(),
            sync: SyncConfig::default(),
        }
    }
}

impl QuotebookConfig {
    /// Loads file (if any) plus process environment, then validates.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        let config = base.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses a JSON document; missing keys keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }

    /// Applies `QB_*` overrides read through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("QB_DB_PATH") {
            self.db_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("QB_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("QB_LOG_LEVEL") {
            self.log_level = value;
        }
        if let Some(value) = lookup("QB_SYNC_ENABLED") {
            self.sync.enabled = parse_bool("QB_SYNC_ENABLED", &value)?;
        }
        if let Some(value) = lookup("QB_SYNC_ENDPOINT") {
            self.sync.endpoint = value;
        }
        if let Some(value) = lookup("QB_SYNC_INTERVAL_SECS") {
            self.sync.interval_secs = parse_value("QB_SYNC_INTERVAL_SECS", &value)?;
        }
        if let Some(value) = lookup("QB_SYNC_TIMEOUT_SECS") {
            self.sync.timeout_secs = parse_value("QB_SYNC_TIMEOUT_SECS", &value)?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(invalid("db_path", ""));
        }
        if parse_level(&self.log_level).is_err() {
            return Err(invalid("log_level", &self.log_level));
        }
        if let Some(log_dir) = &self.log_dir {
            if !log_dir.is_absolute() {
                return Err(invalid("log_dir", &log_dir.display().to_string()));
            }
        }
        if self.sync.enabled && self.sync.endpoint.trim().is_empty() {
            return Err(invalid("sync.endpoint", &self.sync.endpoint));
        }
        if self.sync.interval_secs == 0 {
            return Err(invalid("sync.interval_secs", "0"));
        }
        if self.sync.timeout_secs == 0 {
            return Err(invalid("sync.timeout_secs", "0"));
        }
        Ok(())
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, QuotebookConfig, DEFAULT_SYNC_ENDPOINT};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = QuotebookConfig::default();
        config.validate().unwrap();
        assert_eq!(config.sync.interval_secs, 60);
        assert_eq!(config.sync.endpoint, DEFAULT_SYNC_ENDPOINT);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            QuotebookConfig::from_json_str(r#"{"db_path":"/tmp/q.db","sync":{"enabled":false}}"#)
                .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/q.db"));
        assert!(!config.sync.enabled);
        assert_eq!(config.sync.interval_secs, 60);
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let config = QuotebookConfig::default()
            .with_overrides(lookup(&[
                ("QB_SYNC_INTERVAL_SECS", "5"),
                ("QB_SYNC_ENABLED", "off"),
                ("QB_DB_PATH", "/var/lib/quotes.db"),
            ]))
            .unwrap();
        assert_eq!(config.sync.interval_secs, 5);
        assert!(!config.sync.enabled);
        assert_eq!(config.db_path, PathBuf::from("/var/lib/quotes.db"));
    }

    #[test]
    fn malformed_override_is_rejected() {
        let err = QuotebookConfig::default()
            .with_overrides(lookup(&[("QB_SYNC_INTERVAL_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "QB_SYNC_INTERVAL_SECS",
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_zero_interval_and_relative_log_dir() {
        let mut config = QuotebookConfig::default();
        config.sync.interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = QuotebookConfig::default();
        config.log_dir = Some(PathBuf::from("logs"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let config = QuotebookConfig::default()
            .with_overrides(lookup(&[("QB_LOG_LEVEL", "chatty")]))
            .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                key: "log_level",
                ..
            })
        ));
    }
}
