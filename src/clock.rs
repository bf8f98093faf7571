//! Time source for simulator runners and toast expiry.
//!
//! Runners never call `tokio::time` directly. They go through a [`Clock`] so
//! that a headless context (no local wall clock) renders placeholders, and so
//! that tests can run on tokio's paused clock without real time passing.

use async_trait::async_trait;
use chrono::{Local, NaiveTime, Timelike};
use std::time::Duration;

/// Placeholder rendered for a full timestamp when no wall clock is available.
pub const TIME_PLACEHOLDER: &str = "--:--:--";

/// Placeholder rendered for a short timestamp when no wall clock is available.
pub const TIME_SHORT_PLACEHOLDER: &str = "--:--";

/// Suspension and wall-clock capability injected into runners.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Suspend the calling task for `duration`.
    async fn sleep(&self, duration: Duration);

    /// The caller's local time of day, or `None` when this execution context
    /// has no client clock.
    fn local_time(&self) -> Option<NaiveTime>;
}

/// Real clock: tokio timers plus the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn local_time(&self) -> Option<NaiveTime> {
        Some(Local::now().time())
    }
}

/// Clock for contexts that can suspend but must not read the wall clock.
///
/// Timestamps produced under this clock are placeholders, which keeps
/// snapshots identical between a pre-rendered view and its first live
/// render.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessClock;

#[async_trait]
impl Clock for HeadlessClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn local_time(&self) -> Option<NaiveTime> {
        None
    }
}

/// Clock that always reports the same time of day. Sleeps still go through
/// tokio, so it pairs with a paused runtime in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

#[async_trait]
impl Clock for FixedClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn local_time(&self) -> Option<NaiveTime> {
        Some(self.0)
    }
}

/// Formats `HH:MM:SS`, or [`TIME_PLACEHOLDER`] without a clock reading.
pub fn format_time(time: Option<NaiveTime>) -> String {
    match time {
        Some(t) => format!("{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second()),
        None => TIME_PLACEHOLDER.to_string(),
    }
}

/// Formats `HH:MM`, or [`TIME_SHORT_PLACEHOLDER`] without a clock reading.
pub fn format_time_short(time: Option<NaiveTime>) -> String {
    match time {
        Some(t) => format!("{:02}:{:02}", t.hour(), t.minute()),
        None => TIME_SHORT_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_and_without_clock() {
        let t = NaiveTime::from_hms_opt(9, 5, 7).unwrap();
        assert_eq!(format_time(Some(t)), "09:05:07");
        assert_eq!(format_time_short(Some(t)), "09:05");
        assert_eq!(format_time(None), TIME_PLACEHOLDER);
        assert_eq!(format_time_short(None), TIME_SHORT_PLACEHOLDER);
    }

    #[test]
    fn test_headless_clock_has_no_local_time() {
        assert!(HeadlessClock.local_time().is_none());
        assert!(SystemClock.local_time().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_advances_paused_time() {
        let start = tokio::time::Instant::now();
        FixedClock(NaiveTime::MIN).sleep(Duration::from_millis(1500)).await;
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
