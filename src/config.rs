//! Configuration handling for the form

use crate::controller::{EmptyCityPolicy, FormPolicy};
use crate::sink::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the remote endpoint
pub const ENDPOINT_ENV: &str = "SIGNUP_FORM_ENDPOINT";

/// Which sink accepted submissions go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Local,
    Remote,
}

/// User configuration for the form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Sink used for accepted submissions
    pub sink: Option<SinkKind>,
    /// Remote collection base URL
    pub endpoint: Option<String>,
    /// Remote request timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Local store file, overriding the data directory default
    pub storage_path: Option<PathBuf>,
    /// Accept a city that sanitizes to nothing (default true)
    pub allow_empty_city: Option<bool>,
    /// Clear the form even when the sink fails
    pub reset_on_sink_failure: Option<bool>,
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "signup", "signup-form")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: FormConfig = serde_json::from_str(&content)?;
            tracing::debug!(path = %path.display(), "configuration loaded");
            return Ok(config);
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn sink_kind(&self) -> SinkKind {
        self.sink.unwrap_or_default()
    }

    /// Remote endpoint: environment, then file, then default
    pub fn endpoint(&self) -> String {
        std::env::var(ENDPOINT_ENV)
            .ok()
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn policy(&self) -> FormPolicy {
        FormPolicy {
            empty_city: if self.allow_empty_city.unwrap_or(true) {
                EmptyCityPolicy::Accept
            } else {
                EmptyCityPolicy::Reject
            },
            reset_on_sink_failure: self.reset_on_sink_failure.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert!(config.sink.is_none());
        assert!(config.endpoint.is_none());
        assert!(config.timeout_ms.is_none());
        assert!(config.storage_path.is_none());
        assert!(config.allow_empty_city.is_none());
        assert!(config.reset_on_sink_failure.is_none());
    }

    #[test]
    fn test_default_policy_accepts_empty_city_and_keeps_state() {
        let policy = FormConfig::default().policy();
        assert_eq!(policy, FormPolicy::default());
        assert_eq!(policy.empty_city, EmptyCityPolicy::Accept);
        assert!(!policy.reset_on_sink_failure);
    }

    #[test]
    fn test_policy_from_flags() {
        let config = FormConfig {
            allow_empty_city: Some(false),
            reset_on_sink_failure: Some(true),
            ..Default::default()
        };
        let policy = config.policy();
        assert_eq!(policy.empty_city, EmptyCityPolicy::Reject);
        assert!(policy.reset_on_sink_failure);
    }

    #[test]
    fn test_serialization() {
        let config = FormConfig {
            sink: Some(SinkKind::Remote),
            endpoint: Some("http://localhost:3000".to_string()),
            timeout_ms: Some(1500),
            storage_path: Some(PathBuf::from("/tmp/subs.json")),
            allow_empty_city: Some(true),
            reset_on_sink_failure: Some(false),
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"remote\""));
        let parsed: FormConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.sink, Some(SinkKind::Remote));
        assert_eq!(parsed.endpoint, Some("http://localhost:3000".to_string()));
        assert_eq!(parsed.timeout(), Duration::from_millis(1500));
        assert_eq!(parsed.storage_path, Some(PathBuf::from("/tmp/subs.json")));
        assert_eq!(parsed.allow_empty_city, Some(true));
        assert_eq!(parsed.reset_on_sink_failure, Some(false));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FormConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.sink_kind(), SinkKind::Local);
        assert_eq!(parsed.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"sink": "remote", "unknown_field": "value"}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.sink_kind(), SinkKind::Remote);
    }

    #[test]
    fn test_endpoint_falls_back_to_file_value() {
        if std::env::var(ENDPOINT_ENV).is_ok() {
            return;
        }
        let config = FormConfig {
            endpoint: Some("http://localhost:3000".to_string()),
            ..Default::default()
        };
        assert_eq!(config.endpoint(), "http://localhost:3000");
        assert_eq!(FormConfig::default().endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = FormConfig {
            allow_empty_city: Some(true),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = FormConfig::load_from(&path).unwrap();
        assert_eq!(loaded.allow_empty_city, Some(true));
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempdir().unwrap();
        let loaded = FormConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.sink.is_none());
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(FormConfig::load_from(&path).is_err());
    }
}
