//! Time source for the poll loop

use async_trait::async_trait;
use std::time::Duration;

/// Wall clock and sleep used by the poller
///
/// Injected so that poll cycles can run without real delays.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current time as Unix seconds
    fn now(&self) -> i64;

    /// Suspend the caller for `period`
    async fn sleep(&self, period: Duration);
}

/// Clock backed by the system time and tokio timers
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    async fn sleep(&self, period: Duration) {
        tokio::time::sleep(period).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_now() {
        let now = SystemClock.now();
        // 2020-01-01T00:00:00Z
        assert!(now > 1_577_836_800);
    }

    #[tokio::test(start_paused = true)]
    async fn test_system_clock_sleep_uses_tokio_time() {
        let start = tokio::time::Instant::now();
        SystemClock.sleep(Duration::from_secs(600)).await;
        assert!(start.elapsed() >= Duration::from_secs(600));
    }
}
