//! HTTP fetcher for the homework status API
//!
//! This module provides the client that queries the status endpoint with an
//! OAuth token and a `from_date` cursor. It performs exactly one request per
//! call; retry cadence is owned by the poller.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client,
};
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::utils::error::{ConfigError, FetchError};

/// Source of raw status payloads
///
/// The poller depends on this trait rather than on [`PracticumClient`]
/// directly so that cycles can be driven with scripted payloads.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch status updates newer than `cursor` (Unix seconds)
    async fn fetch(&self, cursor: i64) -> Result<Value, FetchError>;
}

/// Status API client
pub struct PracticumClient {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Full endpoint URL
    endpoint: String,

    /// `OAuth <token>` header value, marked sensitive
    authorization: HeaderValue,
}

impl PracticumClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the token cannot be sent as a header
    /// or the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::with_endpoint(
            &config.api.endpoint,
            &config.credentials.practicum_token,
            config.request_timeout(),
        )
    }

    /// Create a client for a specific endpoint
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Status endpoint URL
    /// * `token` - OAuth token
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the token cannot be sent as a header
    /// or the HTTP client cannot be created
    pub fn with_endpoint(
        endpoint: &str,
        token: &str,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let mut authorization = HeaderValue::from_str(&format!("OAuth {token}")).map_err(|_| {
            ConfigError::invalid(
                "credentials.practicum_token",
                "contains characters not allowed in an HTTP header",
            )
        })?;
        authorization.set_sensitive(true);

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| ConfigError::invalid("api", format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            authorization,
        })
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build request headers
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers
    }

    fn unreachable(&self, source: reqwest::Error) -> FetchError {
        FetchError::Unreachable {
            endpoint: self.endpoint.clone(),
            source,
        }
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, cursor: i64) -> Result<Value, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, from_date = cursor, "Sending status API request");

        let response = self
            .client
            .get(&self.endpoint)
            .headers(self.build_headers())
            .query(&[("from_date", cursor)])
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| self.unreachable(e))?;
        let payload = serde_json::from_slice(&bytes).map_err(FetchError::MalformedBody)?;

        tracing::debug!(status = %status, "Status API response received");
        Ok(payload)
    }
}
