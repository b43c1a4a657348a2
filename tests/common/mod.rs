//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use homework_bot::api::StatusSource;
use homework_bot::error::FetchError;
use homework_bot::notifications::channels::ChannelResult;
use homework_bot::notifications::{Channel, ChannelError, DeliveryStatus, Notification, Notifier};
use homework_bot::poller::{Clock, HomeworkPoller};

pub const START_TIME: i64 = 1_000;
pub const RETRY_PERIOD: Duration = Duration::from_secs(600);

/// Build a status payload with a single homework entry
pub fn payload_with(name: &str, status: &str) -> Value {
    json!({
        "homeworks": [{"homework_name": name, "status": status}],
        "current_date": 1000
    })
}

/// Status payload with no homework entries
pub fn empty_payload() -> Value {
    json!({"homeworks": [], "current_date": 1000})
}

/// One scripted answer of the fake status API
#[derive(Debug, Clone)]
pub enum Step {
    Payload(Value),
    BadStatus(u16),
    Malformed,
}

impl Step {
    fn to_result(&self) -> Result<Value, FetchError> {
        match self {
            Self::Payload(value) => Ok(value.clone()),
            Self::BadStatus(code) => Err(FetchError::BadStatus(*code)),
            Self::Malformed => Err(FetchError::MalformedBody(
                serde_json::from_str::<Value>("{not json").unwrap_err(),
            )),
        }
    }
}

/// Status source answering from a script; the last step repeats forever
#[derive(Clone, Default)]
pub struct ScriptedSource {
    steps: Arc<Mutex<VecDeque<Step>>>,
    cursors: Arc<Mutex<Vec<i64>>>,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Arc::new(Mutex::new(steps.into_iter().collect())),
            cursors: Arc::default(),
        }
    }

    /// Cursors received by `fetch`, in call order
    pub fn cursors(&self) -> Vec<i64> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch(&self, cursor: i64) -> Result<Value, FetchError> {
        self.cursors.lock().unwrap().push(cursor);
        let mut steps = self.steps.lock().unwrap();
        let step = if steps.len() > 1 {
            steps.pop_front()
        } else {
            steps.front().cloned()
        };
        step.unwrap_or(Step::Payload(empty_payload())).to_result()
    }
}

/// Channel recording every delivery attempt
#[derive(Clone, Default)]
pub struct RecordingChannel {
    attempts: Arc<Mutex<Vec<String>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Texts of every send attempt, including failed ones
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, notification: &Notification) -> ChannelResult<DeliveryStatus> {
        self.attempts
            .lock()
            .unwrap()
            .push(notification.text().to_string());
        if self.failing.load(Ordering::SeqCst) {
            Err(ChannelError::Other("chat unavailable".to_string()))
        } else {
            Ok(DeliveryStatus::success("recording"))
        }
    }
}

/// Clock whose sleep advances time instantly
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start)),
            sleeps: Arc::default(),
        }
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }

    async fn sleep(&self, period: Duration) {
        self.sleeps.lock().unwrap().push(period);
        self.advance(period.as_secs() as i64);
        tokio::task::yield_now().await;
    }
}

/// Poller wired to test doubles, with handles to inspect them
pub struct Harness {
    pub poller: HomeworkPoller,
    pub source: ScriptedSource,
    pub channel: RecordingChannel,
    pub clock: ManualClock,
}

pub fn harness(steps: impl IntoIterator<Item = Step>) -> Harness {
    let source = ScriptedSource::new(steps);
    harness_with_source(source.clone(), source)
}

pub fn harness_with_source(
    boxed: impl StatusSource + 'static,
    source: ScriptedSource,
) -> Harness {
    let channel = RecordingChannel::new();
    let clock = ManualClock::new(START_TIME);
    let poller = HomeworkPoller::new(
        Box::new(boxed),
        Notifier::new(Box::new(channel.clone())),
        Arc::new(clock.clone()),
        RETRY_PERIOD,
    );
    Harness {
        poller,
        source,
        channel,
        clock,
    }
}
