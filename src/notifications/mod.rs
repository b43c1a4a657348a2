//! Notification delivery
//!
//! This module wraps a single [`Channel`] behind the [`Notifier`], which
//! makes one delivery attempt per call and reports failures as
//! [`NotifyError`]. Whether to retry is left to the caller.
//!
//! ```text
//!   HomeworkPoller ──► Notifier ──► Channel (Telegram)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use homework_bot::notifications::{Notifier, TelegramChannel};
//!
//! let notifier = Notifier::new(Box::new(TelegramChannel::new(channel_config)?));
//! notifier.notify("Изменился статус проверки работы").await?;
//! ```

pub mod channels;

use std::fmt;

// Re-exports
pub use channels::telegram::{TelegramChannel, TelegramChannelConfig};
pub use channels::{Channel, ChannelError, DeliveryStatus};

/// Errors surfaced by the notifier
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The channel failed to deliver the message
    #[error("Message delivery failed: {0}")]
    DeliveryFailed(#[source] ChannelError),
}

/// Immutable message bound for the configured chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    text: String,
}

impl Notification {
    /// Create a notification
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Message text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Delivers notifications to the single configured channel
pub struct Notifier {
    channel: Box<dyn Channel>,
}

impl Notifier {
    /// Create a notifier for a channel
    pub fn new(channel: Box<dyn Channel>) -> Self {
        Self { channel }
    }

    /// Name of the underlying channel
    pub fn channel_name(&self) -> &str {
        self.channel.name()
    }

    /// Send `text`, attempting delivery exactly once
    ///
    /// Failures are logged at error level before being returned.
    pub async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        tracing::debug!(channel = self.channel.name(), "Sending message to chat");
        let notification = Notification::new(text);

        match self.channel.send(&notification).await {
            Ok(status) => {
                tracing::debug!(%status, message = %notification, "Message delivered");
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    channel = self.channel.name(),
                    error = %e,
                    "Failed to send message to chat"
                );
                Err(NotifyError::DeliveryFailed(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct StubChannel {
        fail: bool,
        sent: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Channel for StubChannel {
        fn name(&self) -> &str {
            "stub"
        }

        async fn send(
            &self,
            notification: &Notification,
        ) -> channels::ChannelResult<DeliveryStatus> {
            self.sent.lock().unwrap().push(notification.text().to_string());
            if self.fail {
                Err(ChannelError::Other("chat unavailable".to_string()))
            } else {
                Ok(DeliveryStatus::success("stub"))
            }
        }
    }

    #[tokio::test]
    async fn test_notify_success() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let notifier = Notifier::new(Box::new(StubChannel {
            fail: false,
            sent: sent.clone(),
        }));

        notifier.notify("hello").await.unwrap();
        assert_eq!(*sent.lock().unwrap(), vec!["hello".to_string()]);
        assert_eq!(notifier.channel_name(), "stub");
    }

    #[tokio::test]
    async fn test_notify_failure_is_wrapped_and_single_attempt() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let notifier = Notifier::new(Box::new(StubChannel {
            fail: true,
            sent: sent.clone(),
        }));

        let err = notifier.notify("hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::DeliveryFailed(ChannelError::Other(_))));
        assert_eq!(sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_notification_text() {
        let notification = Notification::new("text");
        assert_eq!(notification.text(), "text");
        assert_eq!(notification.to_string(), "text");
    }
}
