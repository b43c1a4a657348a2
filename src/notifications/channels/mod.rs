//! Notification channels for delivering messages
//!
//! This module provides the channel abstraction the [`Notifier`] sends
//! through, and the Telegram implementation used in production.
//!
//! [`Notifier`]: crate::notifications::Notifier

pub mod telegram;

use async_trait::async_trait;
use std::fmt;

use crate::notifications::Notification;

/// Result type for channel operations
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Errors that can occur during channel operations
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// HTTP request failed; the URL is stripped since it may carry a token
    #[error("HTTP request failed: {0}")]
    HttpError(#[source] reqwest::Error),

    /// Provider rejected the request
    #[error("Provider error (HTTP {status}): {description}")]
    Api { status: u16, description: String },

    /// Invalid channel configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error
    #[error("Channel error: {0}")]
    Other(String),
}

/// Response from sending a notification
#[derive(Debug, Clone)]
pub struct DeliveryStatus {
    /// Channel that delivered the notification
    pub channel: String,
    /// Optional message about the delivery
    pub message: Option<String>,
}

impl DeliveryStatus {
    /// Create a delivery status
    pub fn success(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            message: None,
        }
    }

    /// Create a delivery status with a message
    pub fn success_with_message(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            message: Some(message.into()),
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[DELIVERED] {}", self.channel)?;
        if let Some(msg) = &self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

/// Trait for notification channels
///
/// A channel makes exactly one delivery attempt per `send` call.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Get the channel name
    fn name(&self) -> &str;

    /// Send a notification through this channel
    async fn send(&self, notification: &Notification) -> ChannelResult<DeliveryStatus>;
}
