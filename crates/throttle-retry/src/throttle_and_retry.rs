//! Throttled retries.
//!
//! Combines a [`Throttle`] with a [`Retry`] executor so that every attempt,
//! including each retry, passes through the throttle's admission check. A
//! burst of retries against a limited endpoint is rate-limited like any other
//! traffic.

use crate::error::AggregateError;
use crate::retry::{BackoffStrategy, QuadraticBackoff, Retry};
use crate::throttle::{Throttle, registry};
use std::future::Future;
use std::sync::Arc;

/// A retry executor whose attempts are gated by a throttle.
///
/// # Examples
///
/// ```rust
/// use throttle_retry::{Retry, RetryConfig, Throttle, ThrottleConfig, ThrottledRetry};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let throttle = Arc::new(Throttle::new(ThrottleConfig::new(10, 1)?));
/// let client = ThrottledRetry::new(throttle, Retry::new(RetryConfig::new(50, 3)?));
///
/// let contacts = client
///     .run(|| async { Ok::<_, std::io::Error>(vec!["Acme Ltd"]) })
///     .await?;
/// assert_eq!(contacts, vec!["Acme Ltd"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ThrottledRetry<S = QuadraticBackoff> {
    throttle: Arc<Throttle>,
    retry: Retry<S>,
}

impl<S: BackoffStrategy> ThrottledRetry<S> {
    /// Combine a throttle, possibly shared with other callers, with a retry
    /// executor.
    pub fn new(throttle: Arc<Throttle>, retry: Retry<S>) -> Self {
        Self { throttle, retry }
    }

    /// The throttle gating each attempt.
    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// The retry executor.
    pub fn retry(&self) -> &Retry<S> {
        &self.retry
    }

    /// Run `operation` with retries, admitting every attempt through the
    /// throttle.
    pub async fn run<F, Fut, T, E>(&self, operation: F) -> Result<T, AggregateError<E>>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        run_gated(&self.throttle, &self.retry, operation).await
    }
}

/// Run `operation` through the shared throttle with the default retry
/// settings.
///
/// Equivalent to retrying `throttle::run(operation)` with `retry::run`.
pub async fn run<F, Fut, T, E>(operation: F) -> Result<T, AggregateError<E>>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    run_gated(registry::shared(), &Retry::default(), operation).await
}

async fn run_gated<S, F, Fut, T, E>(
    throttle: &Throttle,
    retry: &Retry<S>,
    operation: F,
) -> Result<T, AggregateError<E>>
where
    S: BackoffStrategy,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let operation = &operation;
    retry.run(move || throttle.run(operation)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RetryConfig, ThrottleConfig};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    fn throttled_retry(call_limit: u32, window_seconds: u64, max_attempts: u32) -> ThrottledRetry {
        ThrottledRetry::new(
            Arc::new(Throttle::new(
                ThrottleConfig::new(call_limit, window_seconds).unwrap(),
            )),
            Retry::new(RetryConfig::new(1, max_attempts).unwrap()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_runs_once() {
        let client = throttled_retry(5, 1, 3);
        let calls = AtomicU32::new(0);

        let result = client
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, String>("done") }
            })
            .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.throttle().recorded_calls().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_attempt_is_admitted() {
        let client = throttled_retry(10, 60, 4);

        let result = client.run(|| async { Err::<(), _>("down") }).await;

        assert_eq!(result.unwrap_err().len(), 4);
        assert_eq!(client.throttle().recorded_calls().await, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_are_throttled() {
        // One call per 60s dominates the 1ms-based backoff.
        let client = throttled_retry(1, 60, 2);
        let start = Instant::now();

        let result = client.run(|| async { Err::<(), _>("down") }).await;

        assert_eq!(result.unwrap_err().len(), 2);
        assert!(start.elapsed() >= Duration::from_secs(60));
    }
}
