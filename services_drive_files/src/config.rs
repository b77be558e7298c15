//! Service configuration
//!
//! Configuration is plain JSON. Every field has a default, so an empty
//! object (or no file at all) yields the standard retry policy.

use retry_policy::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("retry_interval_secs must be a non-negative number of seconds, got {0}")]
    InvalidInterval(f64),
}

/// Retry settings as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retries per remote call
    pub max_retry: u32,
    /// Delay between retries, in seconds
    pub retry_interval_secs: f64,
}

impl RetryConfig {
    /// Validates the settings and converts them to a policy
    pub fn to_policy(&self) -> Result<RetryPolicy, ConfigError> {
        let interval = Duration::try_from_secs_f64(self.retry_interval_secs)
            .map_err(|_| ConfigError::InvalidInterval(self.retry_interval_secs))?;
        Ok(RetryPolicy::new(self.max_retry, interval))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_retry: policy.max_retry,
            retry_interval_secs: policy.retry_interval.as_secs_f64(),
        }
    }
}

impl From<RetryPolicy> for RetryConfig {
    fn from(policy: RetryPolicy) -> Self {
        Self {
            max_retry: policy.max_retry,
            retry_interval_secs: policy.retry_interval.as_secs_f64(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Retry policy applied to sessions built from this config
    pub retry: RetryConfig,
}

impl DriveConfig {
    /// Parses configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.retry.to_policy()?;
        Ok(config)
    }

    /// Loads configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the configuration as pretty JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The retry policy described by this configuration
    pub fn retry_policy(&self) -> Result<RetryPolicy, ConfigError> {
        self.retry.to_policy()
    }
}
