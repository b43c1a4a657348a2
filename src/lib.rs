//! homework-bot - homework review status notifier
//!
//! Polls the homework status API on a fixed interval and forwards review
//! status changes to a single Telegram chat, deduplicating repeated messages
//! and reporting failures without stopping the loop.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and the startup credential check
//! - [`api`] - Status fetching, response validation and status translation
//! - [`models`] - Core data structures and types
//! - [`notifications`] - Notifier and delivery channels
//! - [`poller`] - The supervising poll loop
//! - [`error`] - Unified error type
//! - [`utils`] - Common utilities and stage errors
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use homework_bot::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let source = PracticumClient::from_config(&config)?;
//!     let channel = TelegramChannel::new(TelegramChannelConfig::from_config(&config))?;
//!     let mut poller = HomeworkPoller::new(
//!         Box::new(source),
//!         Notifier::new(Box::new(channel)),
//!         Arc::new(SystemClock),
//!         config.retry_period(),
//!     );
//!     poller.run().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod notifications;
pub mod poller;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{PracticumClient, StatusSource};
    pub use crate::config::Config;
    pub use crate::error::{BotErrorTrait, Error, ErrorCategory, Result};
    pub use crate::models::{HomeworkStatus, StatusResponse};
    pub use crate::notifications::{
        Channel, Notification, Notifier, TelegramChannel, TelegramChannelConfig,
    };
    pub use crate::poller::{Clock, CycleOutcome, HomeworkPoller, PollState, SystemClock};
}

// Direct re-exports for convenience
pub use models::{HomeworkStatus, StatusResponse};
