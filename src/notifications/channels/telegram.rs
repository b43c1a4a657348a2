//! Telegram notification channel
//!
//! Sends messages through the Bot API `sendMessage` method.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Channel, ChannelError, ChannelResult, DeliveryStatus};
use crate::config::Config;
use crate::notifications::Notification;
use crate::utils::truncate_chars;

/// Maximum message length accepted by the Bot API
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Telegram channel configuration
#[derive(Clone)]
pub struct TelegramChannelConfig {
    /// Bot API base URL
    pub api_url: String,
    /// Bot token
    pub token: String,
    /// Destination chat identifier
    pub chat_id: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for TelegramChannelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramChannelConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl TelegramChannelConfig {
    /// Build channel configuration from the bot configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_url: config.telegram.api_url.clone(),
            token: config.credentials.telegram_token.clone(),
            chat_id: config.credentials.telegram_chat_id.clone(),
            timeout_secs: config.telegram.request_timeout_secs,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.token.is_empty() {
            return Err("Telegram token cannot be empty".to_string());
        }
        if self.chat_id.is_empty() {
            return Err("Telegram chat id cannot be empty".to_string());
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err("Telegram API URL must start with http:// or https://".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<SentMessage>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

/// Telegram notification channel
///
/// # Example
///
/// ```rust,ignore
/// use homework_bot::notifications::channels::telegram::{TelegramChannel, TelegramChannelConfig};
///
/// let channel = TelegramChannel::new(TelegramChannelConfig::from_config(&config))?;
/// channel.send(&Notification::new("hello")).await?;
/// ```
pub struct TelegramChannel {
    config: TelegramChannelConfig,
    client: Client,
}

impl TelegramChannel {
    /// Create a new Telegram channel
    pub fn new(config: TelegramChannelConfig) -> ChannelResult<Self> {
        config.validate().map_err(ChannelError::InvalidConfig)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChannelError::Other(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Get the destination chat identifier
    pub fn chat_id(&self) -> &str {
        &self.config.chat_id
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_url.trim_end_matches('/'),
            self.config.token
        )
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, notification: &Notification) -> ChannelResult<DeliveryStatus> {
        let text = truncate_chars(notification.text(), MAX_MESSAGE_CHARS);
        let request = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text: &text,
        };

        // The request URL embeds the bot token, so it is stripped from transport errors.
        let response = self
            .client
            .post(self.send_message_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ChannelError::HttpError(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChannelError::HttpError(e.without_url()))?;
        let parsed: Option<BotApiResponse> = serde_json::from_str(&body).ok();

        match parsed {
            Some(reply) if status.is_success() && reply.ok => Ok(match reply.result {
                Some(sent) => DeliveryStatus::success_with_message(
                    "telegram",
                    format!("message_id={}", sent.message_id),
                ),
                None => DeliveryStatus::success("telegram"),
            }),
            Some(reply) => Err(ChannelError::Api {
                status: status.as_u16(),
                description: reply
                    .description
                    .unwrap_or_else(|| "request was not accepted".to_string()),
            }),
            None => Err(ChannelError::Api {
                status: status.as_u16(),
                description: truncate_chars(&body, 200),
            }),
        }
    }
}
