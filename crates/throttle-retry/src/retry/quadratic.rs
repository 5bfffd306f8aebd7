//! Quadratic backoff.

use super::strategy::BackoffStrategy;
use crate::config::RetryConfig;
use std::num::NonZeroU32;
use std::time::Duration;

/// Backoff whose delay grows with the square of the attempt number.
///
/// # Mathematical Formula
///
/// For attempt `k` (1-indexed):
/// ```text
/// delay(1) = 0
/// delay(k) = interval_ms * (k + 1)^2    for k >= 2
/// ```
///
/// With the default 1000ms interval the waits are 9s before attempt 2 and 16s
/// before attempt 3, 25s in total for the default three attempts. Arithmetic
/// saturates instead of overflowing for very large attempt budgets.
///
/// # Examples
///
/// ```rust
/// use throttle_retry::{BackoffStrategy, QuadraticBackoff, RetryConfig};
/// use std::time::Duration;
///
/// let backoff = QuadraticBackoff::new(RetryConfig::default());
///
/// assert_eq!(backoff.delay_before(1), Duration::ZERO);
/// assert_eq!(backoff.delay_before(2), Duration::from_secs(9));
/// assert_eq!(backoff.delay_before(3), Duration::from_secs(16));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadraticBackoff {
    interval_ms: u64,
    max_attempts: NonZeroU32,
}

impl QuadraticBackoff {
    /// Create a backoff schedule from a validated retry configuration.
    pub fn new(config: RetryConfig) -> Self {
        Self {
            interval_ms: config.interval_ms(),
            max_attempts: config.attempts(),
        }
    }

    /// Base interval in milliseconds.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Sum of every delay the schedule can incur when all attempts fail.
    pub fn total_delay(&self) -> Duration {
        (1..=self.max_attempts.get())
            .map(|attempt| self.delay_before(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl Default for QuadraticBackoff {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl From<RetryConfig> for QuadraticBackoff {
    fn from(config: RetryConfig) -> Self {
        Self::new(config)
    }
}

impl BackoffStrategy for QuadraticBackoff {
    fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let factor = u64::from(attempt) + 1;
        Duration::from_millis(self.interval_ms.saturating_mul(factor.saturating_mul(factor)))
    }

    fn max_attempts(&self) -> NonZeroU32 {
        self.max_attempts
    }
}
