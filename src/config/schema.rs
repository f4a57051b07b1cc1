//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `mytracker.toml`.

use crate::config::{secret_string, SecretString};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production host of the MyTracker export API
pub const DEFAULT_BASE_URL: &str = "https://tracker.my.com";

/// Main MyTracker configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyTrackerConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// API credentials and transport settings
    pub api: ApiConfig,

    /// Polling behaviour for export jobs
    #[serde(default)]
    pub polling: PollingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MyTrackerConfig {
    /// Builds a configuration with defaults around the given credentials
    pub fn with_credentials(account_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            application: ApplicationConfig::default(),
            api: ApiConfig::with_credentials(account_id, secret_key),
            polling: PollingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.polling.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// API credentials and transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme and host the endpoint paths are joined to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account (API user) identifier placed in the Authorization header
    pub account_id: String,

    /// Secret key used to sign requests
    /// Stored securely in memory and automatically zeroized on drop
    pub secret_key: SecretString,

    /// Timeout for API calls in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Timeout for each result file download in seconds
    #[serde(default = "default_download_timeout_seconds")]
    pub download_timeout_seconds: u64,
}

impl ApiConfig {
    /// Builds an API configuration with default transport settings
    pub fn with_credentials(account_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            account_id: account_id.into(),
            secret_key: secret_string(secret_key.into()),
            timeout_seconds: default_timeout_seconds(),
            download_timeout_seconds: default_download_timeout_seconds(),
        }
    }

    /// API call timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Per-file download timeout
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_seconds)
    }

    fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("api.base_url '{}' is not a valid URL: {e}", self.base_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        if self.account_id.trim().is_empty() {
            return Err("api.account_id cannot be empty".to_string());
        }

        if self.secret_key.expose_secret().is_empty() {
            return Err("api.secret_key cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be > 0".to_string());
        }

        if self.download_timeout_seconds == 0 {
            return Err("api.download_timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

/// Polling configuration for export jobs
///
/// `max_polls` bounds the total number of status requests for a job and is
/// unbounded by default, since long raw exports legitimately stay
/// "In progress" for a long time. `max_error_retries` bounds consecutive
/// "Error occurred" answers for the kinds that retry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between two status requests in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Maximum number of status requests per job (None = unbounded)
    #[serde(default)]
    pub max_polls: Option<u32>,

    /// Maximum consecutive "Error occurred" retries; `0` or absent from code
    /// (`None`) disables the bound
    #[serde(default = "default_max_error_retries")]
    pub max_error_retries: Option<u32>,
}

impl PollingConfig {
    /// Delay between two status requests
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Effective bound on consecutive "Error occurred" retries
    pub fn error_retry_limit(&self) -> Option<u32> {
        self.max_error_retries.filter(|&max| max > 0)
    }

    fn validate(&self) -> Result<(), String> {
        if self.interval_ms == 0 {
            return Err("polling.interval_ms must be > 0".to_string());
        }
        if self.max_polls == Some(0) {
            return Err("polling.max_polls must be > 0 when set".to_string());
        }
        Ok(())
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_polls: None,
            max_error_retries: default_max_error_retries(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rolling files in `local_path`
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_download_timeout_seconds() -> u64 {
    10
}

fn default_interval_ms() -> u64 {
    3000
}

fn default_max_error_retries() -> Option<u32> {
    Some(20)
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> MyTrackerConfig {
        MyTrackerConfig::with_credentials("12345", "secret")
    }

    #[test]
    fn test_default_values() {
        let config = valid_config();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.api.base_url, "https://tracker.my.com");
        assert_eq!(config.api.download_timeout(), Duration::from_secs(10));
        assert_eq!(config.polling.interval(), Duration::from_secs(3));
        assert_eq!(config.polling.max_polls, None);
        assert_eq!(config.polling.max_error_retries, Some(20));
        assert!(!config.logging.local_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_config_validation() {
        let mut config = ApiConfig::with_credentials("12345", "secret");
        assert!(config.validate().is_ok());

        config.base_url = "ftp://tracker.my.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "http://127.0.0.1:8080".to_string();
        assert!(config.validate().is_ok());

        config.account_id = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_config_rejects_empty_secret() {
        let config = ApiConfig::with_credentials("12345", "");
        let err = config.validate().unwrap_err();
        assert!(err.contains("secret_key"));
    }

    #[test]
    fn test_polling_config_validation() {
        let mut config = PollingConfig::default();
        assert!(config.validate().is_ok());

        config.interval_ms = 0;
        assert!(config.validate().is_err());

        config.interval_ms = 500;
        config.max_polls = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_error_retries_means_unbounded() {
        let mut config = PollingConfig::default();
        assert_eq!(config.error_retry_limit(), Some(20));

        config.max_error_retries = Some(0);
        assert!(config.validate().is_ok());
        assert_eq!(config.error_retry_limit(), None);

        config.max_error_retries = None;
        assert_eq!(config.error_retry_limit(), None);
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_secret_not_in_debug_output() {
        let config = valid_config();
        let debug = format!("{config:?}");
        assert!(!debug.contains("\"secret\""));
    }
}
