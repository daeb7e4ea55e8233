//! Configuration schema types
//!
//! Root structure mapping to the TOML configuration file.

use crate::config::secret::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Main doajsync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoajSyncConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// DOAJ API settings
    pub doaj: DoajApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DoajSyncConfig {
    /// Validates the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.doaj.validate()?;
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

    /// Dry run mode: compute and log payloads without sending them
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
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

/// DOAJ API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoajApiConfig {
    /// Base URL of the DOAJ API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version segment of the request path
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// API token, passed as the api_key query parameter on every call
    pub api_token: SecretString,

    /// Connect timeout per request
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// Read timeout per request
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Search page size
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Sleep between paginated fetches and between batch operations
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    /// Whether push-on-publish is enabled
    #[serde(default = "default_push_enabled")]
    pub push_enabled: bool,

    /// On a 403 immutable-field rejection, delete the remote record and
    /// retry as a fresh create once (the error is still surfaced)
    #[serde(default)]
    pub recreate_on_immutable_change: bool,

    /// Retry policy for timed-out requests
    #[serde(default)]
    pub retry: RetryConfig,
}

impl DoajApiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("doaj.base_url must not be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "doaj.base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }
        if self.api_token.expose_secret().is_empty() {
            return Err("doaj.api_token must not be empty".to_string());
        }
        if self.page_size == 0 {
            return Err("doaj.page_size must be greater than zero".to_string());
        }
        if self.timeout_seconds == 0 || self.connect_timeout_seconds == 0 {
            return Err("doaj timeouts must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Retry configuration for the HTTP layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts for a timed-out request
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Fixed backoff between attempts, in milliseconds
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a rotating file in addition to the console
    #[serde(default)]
    pub file_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub file_path: String,

    /// Rotation policy: "daily" or "hourly"
    #[serde(default = "default_rotation")]
    pub file_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_enabled: false,
            file_path: default_log_path(),
            file_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.file_enabled && self.file_path.is_empty() {
            return Err("logging.file_path must be set when logging.file_enabled".to_string());
        }
        match self.file_rotation.as_str() {
            "daily" | "hourly" => Ok(()),
            other => Err(format!(
                "Invalid logging.file_rotation '{other}'. Must be 'daily' or 'hourly'"
            )),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://doaj.org/api".to_string()
}

fn default_api_version() -> String {
    "v2".to_string()
}

fn default_connect_timeout_seconds() -> u64 {
    5
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_page_size() -> u32 {
    50
}

fn default_throttle_ms() -> u64 {
    250
}

fn default_push_enabled() -> bool {
    true
}

fn default_max_attempts() -> usize {
    3
}

fn default_backoff_ms() -> u64 {
    200
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret::secret_string;

    fn config() -> DoajSyncConfig {
        DoajSyncConfig {
            application: ApplicationConfig::default(),
            doaj: DoajApiConfig {
                base_url: default_base_url(),
                api_version: default_api_version(),
                api_token: secret_string("token".to_string()),
                connect_timeout_seconds: 5,
                timeout_seconds: 10,
                page_size: 50,
                throttle_ms: 250,
                push_enabled: true,
                recreate_on_immutable_change: false,
                retry: RetryConfig::default(),
            },
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut c = config();
        c.application.log_level = "verbose".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut c = config();
        c.doaj.api_token = secret_string(String::new());
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut c = config();
        c.doaj.base_url = "doaj.org/api".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_defaults_from_minimal_toml() {
        let c: DoajSyncConfig = toml::from_str(
            r#"
[doaj]
api_token = "tok"
"#,
        )
        .unwrap();
        assert_eq!(c.doaj.base_url, "https://doaj.org/api");
        assert_eq!(c.doaj.api_version, "v2");
        assert_eq!(c.doaj.page_size, 50);
        assert_eq!(c.doaj.throttle_ms, 250);
        assert_eq!(c.doaj.retry.max_attempts, 3);
        assert!(!c.application.dry_run);
    }
}
