//! Sliding-window bookkeeping.

use crate::config::ThrottleConfig;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// The admission times of the most recent calls, oldest first.
///
/// The window never holds more than the configured call limit once
/// [`record`](Self::record) returns, and timestamps are kept in insertion
/// order, which is also chronological order on a monotonic clock.
///
/// `RateWindow` does no locking of its own; [`Throttle`](crate::Throttle)
/// owns one and only touches it while holding its lock.
#[derive(Debug, Clone)]
pub struct RateWindow {
    call_limit: usize,
    window: Duration,
    calls: VecDeque<Instant>,
}

impl RateWindow {
    /// Create an empty window for the given limits.
    pub fn new(config: ThrottleConfig) -> Self {
        let call_limit = config.call_limit() as usize;
        Self {
            call_limit,
            window: config.window(),
            calls: VecDeque::new(),
        }
    }

    /// How long a call arriving at `now` must wait before it may start.
    ///
    /// A window that is not yet full never delays. Otherwise the delay is the
    /// time left until the oldest recorded call is a full window old, computed
    /// in whole milliseconds as `window_ms - round(elapsed_ms)`, with halves
    /// rounded to even.
    pub fn admission_delay(&self, now: Instant) -> Option<Duration> {
        if self.calls.len() < self.call_limit {
            return None;
        }
        let oldest = *self.calls.front()?;
        let elapsed = now.saturating_duration_since(oldest);
        if elapsed >= self.window {
            return None;
        }

        let window_ms = self.window.as_millis() as u64;
        let elapsed_ms = (elapsed.as_secs_f64() * 1000.0).round_ties_even() as u64;
        Some(Duration::from_millis(window_ms.saturating_sub(elapsed_ms)))
    }

    /// Record a call admitted at `now`.
    ///
    /// The timestamp is appended first and the oldest entry dropped afterwards
    /// if the window grew past the limit.
    pub fn record(&mut self, now: Instant) {
        self.calls.push_back(now);
        if self.calls.len() > self.call_limit {
            self.calls.pop_front();
        }
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether no call has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// The oldest recorded admission time.
    pub fn oldest(&self) -> Option<Instant> {
        self.calls.front().copied()
    }

    /// Recorded admission times, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Instant> {
        self.calls.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn window(call_limit: u32, window_seconds: u64) -> RateWindow {
        RateWindow::new(ThrottleConfig::new(call_limit, window_seconds).unwrap())
    }

    #[test]
    fn test_partial_window_never_delays() {
        let start = Instant::now();
        let mut rate_window = window(3, 1);

        rate_window.record(start);
        rate_window.record(start);

        assert_eq!(rate_window.admission_delay(start), None);
    }

    #[test]
    fn test_full_window_waits_for_oldest_to_expire() {
        let start = Instant::now();
        let mut rate_window = window(2, 1);

        rate_window.record(start);
        rate_window.record(start + Duration::from_millis(100));

        assert_eq!(
            rate_window.admission_delay(start + Duration::from_millis(250)),
            Some(Duration::from_millis(750))
        );
    }

    #[test]
    fn test_elapsed_is_rounded_to_whole_milliseconds() {
        let start = Instant::now();
        let mut rate_window = window(1, 1);

        rate_window.record(start);

        // 400.6ms rounds to 401ms
        assert_eq!(
            rate_window.admission_delay(start + Duration::from_micros(400_600)),
            Some(Duration::from_millis(599))
        );
        // 400.4ms rounds to 400ms
        assert_eq!(
            rate_window.admission_delay(start + Duration::from_micros(400_400)),
            Some(Duration::from_millis(600))
        );
        // Halves round to even: 400.5ms -> 400ms, 401.5ms -> 402ms
        assert_eq!(
            rate_window.admission_delay(start + Duration::from_micros(400_500)),
            Some(Duration::from_millis(600))
        );
        assert_eq!(
            rate_window.admission_delay(start + Duration::from_micros(401_500)),
            Some(Duration::from_millis(598))
        );
    }

    #[test]
    fn test_huge_call_limit_does_not_preallocate() {
        let start = Instant::now();
        let mut rate_window = window(u32::MAX, 60);

        rate_window.record(start);

        assert_eq!(rate_window.len(), 1);
        assert_eq!(rate_window.admission_delay(start), None);
    }

    #[test]
    fn test_expired_window_does_not_delay() {
        let start = Instant::now();
        let mut rate_window = window(1, 1);

        rate_window.record(start);

        assert_eq!(rate_window.admission_delay(start + Duration::from_secs(1)), None);
        assert_eq!(rate_window.admission_delay(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_record_trims_oldest() {
        let start = Instant::now();
        let mut rate_window = window(2, 60);

        rate_window.record(start);
        rate_window.record(start + Duration::from_secs(1));
        rate_window.record(start + Duration::from_secs(2));

        assert_eq!(rate_window.len(), 2);
        assert_eq!(rate_window.oldest(), Some(start + Duration::from_secs(1)));
    }

    proptest! {
        /// Property: the window never exceeds its limit and stays chronological.
        #[test]
        fn prop_window_bounded_and_ordered(
            call_limit in 1u32..20,
            gaps in prop::collection::vec(0u64..2_000, 0..100),
        ) {
            let mut rate_window = window(call_limit, 60);
            let mut now = Instant::now();

            for gap in gaps {
                now += Duration::from_millis(gap);
                rate_window.record(now);

                prop_assert!(rate_window.len() <= call_limit as usize);
                let times: Vec<_> = rate_window.iter().copied().collect();
                prop_assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));
            }
        }

        /// Property: a delay never exceeds the window length.
        #[test]
        fn prop_delay_within_window(
            call_limit in 1u32..10,
            window_seconds in 1u64..120,
            offset_ms in 0u64..200_000,
        ) {
            let start = Instant::now();
            let mut rate_window = window(call_limit, window_seconds);
            for _ in 0..call_limit {
                rate_window.record(start);
            }

            if let Some(delay) = rate_window.admission_delay(start + Duration::from_millis(offset_ms)) {
                prop_assert!(delay <= Duration::from_secs(window_seconds));
                prop_assert_eq!(
                    delay.as_millis() as u64 + offset_ms,
                    window_seconds * 1000
                );
            } else {
                prop_assert!(offset_ms >= window_seconds * 1000);
            }
        }
    }
}
