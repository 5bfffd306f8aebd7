//! The retry loop.

use super::quadratic::QuadraticBackoff;
use super::strategy::BackoffStrategy;
use crate::config::RetryConfig;
use crate::error::AggregateError;
use std::future::Future;

/// Runs an operation until it succeeds or the attempt budget is spent.
///
/// Every failure is captured in attempt order. The caller sees either the
/// first successful value or an [`AggregateError`] holding one failure per
/// attempt; a single attempt's failure is never returned on its own.
///
/// # Examples
///
/// ```rust
/// use throttle_retry::{Retry, RetryConfig};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let retry = Retry::new(RetryConfig::new(10, 3)?);
///
/// let attempts = Arc::new(AtomicU32::new(0));
/// let value = retry
///     .run(|| {
///         let attempts = Arc::clone(&attempts);
///         async move {
///             if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
///                 Err(std::io::Error::other("connection reset"))
///             } else {
///                 Ok("invoices")
///             }
///         }
///     })
///     .await?;
///
/// assert_eq!(value, "invoices");
/// assert_eq!(attempts.load(Ordering::SeqCst), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Retry<S = QuadraticBackoff> {
    strategy: S,
}

impl Retry {
    /// Create an executor using the quadratic schedule for `config`.
    pub fn new(config: RetryConfig) -> Self {
        Self {
            strategy: QuadraticBackoff::new(config),
        }
    }
}

impl Default for Retry {
    /// 1000ms interval, 3 attempts.
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl<S: BackoffStrategy> Retry<S> {
    /// Create an executor with a custom backoff strategy.
    pub fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// The backoff strategy in use.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Run `operation` with retries.
    ///
    /// Attempt 1 starts immediately. Before each later attempt the executor
    /// sleeps for the strategy's delay. The first `Ok` is returned at once and
    /// no further attempts are made.
    ///
    /// Operations that produce no meaningful value use `T = ()`.
    ///
    /// # Returns
    /// - `Ok(T)`: the value of the first successful attempt
    /// - `Err(AggregateError<E>)`: every attempt failed; holds exactly
    ///   `max_attempts` failures in attempt order
    pub async fn run<F, Fut, T, E>(&self, operation: F) -> Result<T, AggregateError<E>>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.strategy.max_attempts().get();
        let mut failures = Vec::new();

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                let delay = self.strategy.delay_before(attempt);
                tracing::debug!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "backing off before retry"
                );
                tokio::time::sleep(delay).await;
            }

            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::warn!(attempt, max_attempts, "attempt failed");
                    failures.push(err);
                }
            }
        }

        tracing::warn!(max_attempts, "all attempts failed");
        Err(AggregateError::new(failures))
    }
}
