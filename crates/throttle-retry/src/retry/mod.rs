//! Retry with backoff.
//!
//! This module provides the retry executor and the backoff schedule it
//! follows. Failures are never classified: any `Err` the operation returns is
//! retried, and the caller decides what counts as a failure by returning one.
//!
//! # Key Types
//!
//! - [`Retry`] - The retry loop, collecting failures into an [`AggregateError`]
//! - [`BackoffStrategy`] - Core trait for backoff schedules
//! - [`QuadraticBackoff`] - `interval * (attempt + 1)^2` schedule
//!
//! # Examples
//!
//! ```rust
//! use throttle_retry::{RetryConfig, retry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RetryConfig::new(10, 3)?;
//!
//! let result = retry::run_with(|| async {
//!     // Your operation here
//!     Ok::<_, std::io::Error>(42)
//! }, config).await?;
//! # Ok(())
//! # }
//! ```

mod executor;
mod quadratic;
mod strategy;

pub use executor::Retry;
pub use quadratic::QuadraticBackoff;
pub use strategy::BackoffStrategy;

use crate::config::RetryConfig;
use crate::error::AggregateError;
use std::future::Future;

/// Run `operation` with the default retry settings (1000ms interval,
/// 3 attempts).
pub async fn run<F, Fut, T, E>(operation: F) -> Result<T, AggregateError<E>>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    Retry::default().run(operation).await
}

/// Run `operation` with retries configured by `config`.
pub async fn run_with<F, Fut, T, E>(
    operation: F,
    config: RetryConfig,
) -> Result<T, AggregateError<E>>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    Retry::new(config).run(operation).await
}
