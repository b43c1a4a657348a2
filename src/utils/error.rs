//! Error types for the homework bot
//!
//! This module defines the per-stage error types used throughout the application.
//! Each poll stage fails with its own enum so the poller can tell a fetch
//! failure apart from a malformed payload or an unknown review status.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving configuration at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more required secrets are absent or empty
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    /// A configuration value is out of range or malformed
    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::config::Config`]
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors that can occur while querying the status API
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connect, DNS, TLS, timeout, body read)
    #[error("Endpoint {endpoint} is unreachable: {source}")]
    Unreachable {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response status
    #[error("Unexpected response status: {0}")]
    BadStatus(u16),

    /// 2xx response whose body is not JSON
    #[error("Response body is not valid JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),
}

/// Errors raised when the API payload does not match the documented shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Top-level payload is not a JSON object
    #[error("Response is not a JSON object")]
    NotAMapping,

    /// Expected keys are absent from the payload
    #[error("Response is missing expected keys: {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),

    /// A field holds the wrong JSON type
    #[error("Response field '{field}' has an unexpected type")]
    WrongFieldType { field: &'static str },
}

/// Errors raised while turning a homework entry into a message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// Entry has no `homework_name`
    #[error("Homework entry has no homework_name")]
    MissingName,

    /// `status` is absent or not a known review status
    #[error("Unexpected homework status: {0}")]
    UnknownStatus(String),
}

impl ConfigError {
    /// Create an invalid-value error
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
