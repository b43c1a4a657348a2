//! Configuration management for the homework bot
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. Secrets are expected to come from the environment
//! (optionally via a `.env` file loaded by the binary).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::utils::error::ConfigError;

/// Default status API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default Telegram Bot API base URL
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Default poll cadence in seconds
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Required secrets
    pub credentials: Credentials,

    /// Status API configuration
    pub api: ApiConfig,

    /// Telegram configuration
    pub telegram: TelegramConfig,

    /// Poll loop configuration
    pub poller: PollerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// The three secrets the bot cannot run without
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Status API OAuth token
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Destination chat identifier
    pub telegram_chat_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() {
                "<unset>"
            } else {
                "<redacted>"
            }
        }

        f.debug_struct("Credentials")
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Status API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint URL
    pub endpoint: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Telegram configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot API base URL
    pub api_url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Poll loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Seconds to sleep between cycles, also used after errors
    pub retry_period_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            retry_period_secs: DEFAULT_RETRY_PERIOD_SECS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("debug"),
            format: String::from("text"),
        }
    }
}

impl Credentials {
    /// Names of the environment variables whose values are empty
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl Config {
    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override fields with values from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Override fields with values returned by `lookup`
    ///
    /// Unparseable numeric values are ignored and the current value is kept.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("PRACTICUM_TOKEN") {
            self.credentials.practicum_token = v;
        }
        if let Some(v) = lookup("TELEGRAM_TOKEN") {
            self.credentials.telegram_token = v;
        }
        if let Some(v) = lookup("TELEGRAM_CHAT_ID") {
            self.credentials.telegram_chat_id = v;
        }
        if let Some(v) = lookup("HOMEWORK_ENDPOINT") {
            self.api.endpoint = v;
        }
        if let Some(v) = lookup("HOMEWORK_REQUEST_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.api.request_timeout_secs = v;
            self.telegram.request_timeout_secs = v;
        }
        if let Some(v) = lookup("HOMEWORK_RETRY_PERIOD").and_then(|v| v.parse().ok()) {
            self.poller.retry_period_secs = v;
        }
        if let Some(v) = lookup("TELEGRAM_API_URL") {
            self.telegram.api_url = v;
        }
        if let Some(v) = lookup("HOMEWORK_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("HOMEWORK_LOG_FORMAT") {
            self.logging.format = v;
        }
    }

    /// Check that all secrets are present
    pub fn check_tokens(&self) -> Result<(), ConfigError> {
        tracing::debug!("Checking required environment variables");
        let missing = self.credentials.missing();
        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }
        tracing::debug!("All required environment variables are set");
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_tokens()?;

        for (field, value) in [
            ("api.endpoint", &self.api.endpoint),
            ("telegram.api_url", &self.telegram.api_url),
        ] {
            let parsed = url::Url::parse(value)
                .map_err(|e| ConfigError::invalid(field, format!("'{value}': {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::invalid(field, "must use http or https"));
            }
        }

        if self.poller.retry_period_secs == 0 {
            return Err(ConfigError::invalid(
                "poller.retry_period_secs",
                "must be greater than 0",
            ));
        }

        if self.api.request_timeout_secs == 0 || self.telegram.request_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "request_timeout_secs",
                "must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Get poll cadence as Duration
    #[must_use]
    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.poller.retry_period_secs)
    }

    /// Get status API request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }
}
