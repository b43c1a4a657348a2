//! Poll loop supervising fetch, validation, translation and delivery
//!
//! # Cycle
//!
//! ```text
//!   fetch(cursor) ─► check_response ─► parse_status(first) ─► notify ─► sleep
//!        │                 │                  │                  │
//!        └─────────────────┴──────────────────┘                  │
//!                          │                                     │
//!                  failure diagnostic ─► notify (deduplicated)   │
//!                          └─────────────────────────────────────┘
//! ```
//!
//! The poller is the only owner of [`PollState`]. A cycle never aborts the
//! loop: every error other than a startup configuration error is turned into
//! a chat diagnostic, deduplicated against the last message, and the loop
//! sleeps for the fixed retry period before trying again. A cycle that finds
//! no new statuses sleeps the retry period twice.

pub mod clock;

use std::sync::Arc;
use std::time::Duration;

use crate::api::{check_response, parse_status, StatusSource};
use crate::error::{BotErrorTrait, Error, Result};
use crate::notifications::Notifier;

pub use clock::{Clock, SystemClock};

/// Prefix of the diagnostic sent when a cycle fails
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Mutable loop state, held in memory only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound sent as `from_date` on the next request
    pub timestamp: i64,

    /// Last message sent or attempted, used for deduplication
    pub last_message: String,
}

impl PollState {
    /// Fresh state starting at `now`
    pub fn new(now: i64) -> Self {
        Self {
            timestamp: now,
            last_message: String::new(),
        }
    }

    /// Whether `message` repeats the last one
    pub fn is_duplicate(&self, message: &str) -> bool {
        self.last_message == message
    }
}

/// Result of a single poll cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status was translated; `notified` is false when it repeated the last message
    Success { notified: bool },

    /// The API returned no new statuses
    Idle,

    /// A status was translated but its delivery failed
    NotifyFailure,

    /// The cycle failed; `reported` tells whether a diagnostic was sent to the chat
    RecoverableError { reported: bool },
}

/// Supervisor driving the poll loop
pub struct HomeworkPoller {
    source: Box<dyn StatusSource>,
    notifier: Notifier,
    clock: Arc<dyn Clock>,
    retry_period: Duration,
    state: PollState,
}

impl HomeworkPoller {
    /// Create a poller with its cursor at `clock.now()`
    pub fn new(
        source: Box<dyn StatusSource>,
        notifier: Notifier,
        clock: Arc<dyn Clock>,
        retry_period: Duration,
    ) -> Self {
        let state = PollState::new(clock.now());
        Self {
            source,
            notifier,
            clock,
            retry_period,
            state,
        }
    }

    /// Read-only view of the loop state
    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Fixed interval between cycles
    pub fn retry_period(&self) -> Duration {
        self.retry_period
    }

    /// Run cycles forever
    pub async fn run(&mut self) {
        tracing::info!(
            channel = self.notifier.channel_name(),
            retry_period_secs = self.retry_period.as_secs(),
            cursor = self.state.timestamp,
            "Homework poller started"
        );
        loop {
            self.tick().await;
        }
    }

    /// Run one cycle followed by the fixed sleep
    ///
    /// An idle cycle waits one extra retry period before the regular sleep.
    pub async fn tick(&mut self) -> CycleOutcome {
        let outcome = self.poll_once().await;
        tracing::debug!(?outcome, "Poll cycle finished");
        if outcome == CycleOutcome::Idle {
            self.clock.sleep(self.retry_period).await;
        }
        self.clock.sleep(self.retry_period).await;
        outcome
    }

    /// Run one cycle without sleeping
    pub async fn poll_once(&mut self) -> CycleOutcome {
        match self.check_statuses().await {
            Ok(outcome) => outcome,
            Err(err) => self.report_failure(err).await,
        }
    }

    async fn check_statuses(&mut self) -> Result<CycleOutcome> {
        let payload = self.source.fetch(self.state.timestamp).await?;
        let response = check_response(payload)?;

        let Some(homework) = response.latest() else {
            tracing::debug!(cursor = self.state.timestamp, "No new statuses in response");
            return Ok(CycleOutcome::Idle);
        };

        let message = parse_status(homework)?;
        tracing::debug!("Homework status extracted");

        let outcome = if self.state.is_duplicate(&message) {
            tracing::debug!("Status unchanged since last message, skipping delivery");
            CycleOutcome::Success { notified: false }
        } else {
            match self.notifier.notify(&message).await {
                Ok(()) => {
                    self.state.last_message = message;
                    CycleOutcome::Success { notified: true }
                }
                Err(e) => {
                    // The cursor still advances below, so this status is not re-fetched.
                    tracing::error!(error = %e, "Status update not delivered");
                    CycleOutcome::NotifyFailure
                }
            }
        };

        self.state.timestamp = self.clock.now();
        Ok(outcome)
    }

    async fn report_failure(&mut self, err: Error) -> CycleOutcome {
        let message = format!("{FAILURE_PREFIX}: {}", err.localized_desc());
        tracing::error!(
            category = err.category().localized_desc(),
            error = %err,
            "{message}"
        );

        if self.state.is_duplicate(&message) {
            return CycleOutcome::RecoverableError { reported: false };
        }

        let reported = match self.notifier.notify(&message).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Failure diagnostic not delivered");
                false
            }
        };
        self.state.last_message = message;
        CycleOutcome::RecoverableError { reported }
    }
}
