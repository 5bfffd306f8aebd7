//! Sliding-window call throttling.
//!
//! A [`Throttle`] admits at most `call_limit` call starts in any rolling
//! `window_seconds` window. Callers queue on the admission lock; once a call
//! is admitted the lock is released and the operation runs concurrently with
//! any other admitted operations.
//!
//! # Key Types
//!
//! - [`Throttle`] - The admission gate
//! - [`RateWindow`] - Admission timestamps of the most recent calls
//! - [`registry`] - The process-wide shared throttle (60 calls / 60 seconds)
//!
//! # Examples
//!
//! ```rust
//! use throttle_retry::{Throttle, ThrottleConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let throttle = Throttle::new(ThrottleConfig::new(2, 1)?);
//!
//! assert_eq!(throttle.run(|| async { 1 }).await, 1);
//! assert_eq!(throttle.run(|| async { 2 }).await, 2);
//! // A third call would wait until the first is one second old.
//! # Ok(())
//! # }
//! ```

pub mod registry;
mod window;

pub use window::RateWindow;

use crate::config::ThrottleConfig;
use std::future::Future;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Limits how often operations may start.
///
/// The throttle never retries and never inspects what the operation returns:
/// the output, including any error, is handed back unchanged.
#[derive(Debug)]
pub struct Throttle {
    config: ThrottleConfig,
    window: Mutex<RateWindow>,
}

impl Throttle {
    /// Create a throttle with an empty window.
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            window: Mutex::new(RateWindow::new(config)),
        }
    }

    /// The limits this throttle enforces.
    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Run `operation` once the throttle admits it.
    ///
    /// Admission waits, if the window is full, until the oldest recorded call
    /// is a full window old. Waiting callers hold the admission lock, so
    /// callers are admitted in the order they reached the lock. The lock is
    /// released before `operation` is called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use throttle_retry::{Throttle, ThrottleConfig};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let throttle = Throttle::new(ThrottleConfig::default());
    ///
    /// let result = throttle
    ///     .run(|| async { Err::<(), _>(std::io::Error::other("rejected")) })
    ///     .await;
    /// assert!(result.is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, Fut>(&self, operation: F) -> Fut::Output
    where
        F: FnOnce() -> Fut,
        Fut: Future,
    {
        self.admit().await;
        operation().await
    }

    /// Number of admissions currently recorded in the window.
    pub async fn recorded_calls(&self) -> usize {
        self.window.lock().await.len()
    }

    async fn admit(&self) {
        let mut window = self.window.lock().await;

        if let Some(delay) = window.admission_delay(Instant::now()) {
            tracing::debug!(
                delay_ms = delay.as_millis() as u64,
                call_limit = self.config.call_limit(),
                window_seconds = self.config.window_seconds(),
                "call limit reached, delaying admission"
            );
            tokio::time::sleep(delay).await;
        }

        window.record(Instant::now());
        tracing::debug!(recorded = window.len(), "call admitted");
    }
}

/// Run `operation` through the shared throttle.
///
/// The shared instance is created on first use with the default limits
/// (60 calls in 60 seconds). See [`registry`].
pub async fn run<F, Fut>(operation: F) -> Fut::Output
where
    F: FnOnce() -> Fut,
    Fut: Future,
{
    registry::shared().run(operation).await
}
