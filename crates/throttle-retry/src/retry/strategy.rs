//! Backoff strategy abstraction.

use std::num::NonZeroU32;
use std::time::Duration;

/// A schedule of delays between attempts of a retried operation.
///
/// Implementations decide how long to wait before each attempt and how many
/// attempts are made in total. The [`Retry`](crate::Retry) executor owns the
/// loop; strategies are plain, synchronous policy objects.
///
/// Attempts are numbered from 1. The executor never waits before attempt 1,
/// whatever [`delay_before`](Self::delay_before) returns for it.
///
/// # Examples
///
/// A fixed delay between attempts:
///
/// ```rust
/// use throttle_retry::{BackoffStrategy, Retry};
/// use std::num::NonZeroU32;
/// use std::time::Duration;
///
/// struct FixedDelay {
///     delay: Duration,
///     attempts: NonZeroU32,
/// }
///
/// impl BackoffStrategy for FixedDelay {
///     fn delay_before(&self, _attempt: u32) -> Duration {
///         self.delay
///     }
///
///     fn max_attempts(&self) -> NonZeroU32 {
///         self.attempts
///     }
/// }
///
/// let retry = Retry::with_strategy(FixedDelay {
///     delay: Duration::from_millis(50),
///     attempts: NonZeroU32::new(5).unwrap(),
/// });
/// ```
pub trait BackoffStrategy: Send + Sync {
    /// Delay before attempt number `attempt` (1-indexed).
    fn delay_before(&self, attempt: u32) -> Duration;

    /// Total number of attempts, including the first.
    fn max_attempts(&self) -> NonZeroU32;
}
