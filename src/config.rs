//! Application configuration

use auth_client::AuthClientConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the account service base URL
pub const API_URL_ENV: &str = "STORYTIME_API_URL";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "STORYTIME_LOG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration for the app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Account service client settings
    pub api: AuthClientConfig,
    /// `tracing` filter directive (e.g. "info", "app_core=debug")
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: AuthClientConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a JSON configuration document; missing keys take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with process environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(filter) = lookup(LOG_FILTER_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    /// Check that the values can be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be an http(s) URL, got {:?}",
                self.api.base_url
            )));
        }
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.log_filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = AppConfig::from_json_str(
            r#"{"api": {"base_url": "http://192.168.1.20:3000"}, "log_filter": "debug"}"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://192.168.1.20:3000");
        assert_eq!(config.api.sign_in_path, "/api/user/login");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_from_json_rejects_bad_url() {
        let err = AppConfig::from_json_str(r#"{"api": {"base_url": "localhost"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = AppConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default().with_overrides(|key| match key {
            API_URL_ENV => Some("https://api.storytime.app".to_string()),
            LOG_FILTER_ENV => Some("".to_string()),
            _ => None,
        });
        assert_eq!(config.api.base_url, "https://api.storytime.app");
        assert_eq!(config.log_filter, "info");
    }
}
