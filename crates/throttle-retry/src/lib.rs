#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Resilience primitives for callers of a rate-limited remote API.
//!
//! This crate provides two composable building blocks and a combinator:
//!
//! - **Sliding-window throttling** via [`Throttle`]
//!   - At most N call starts in any rolling T-second window
//!   - Admission is serialized, execution is not
//!   - A process-wide shared instance (60 calls / 60 seconds) in [`throttle::registry`]
//! - **Bounded retry with backoff** via [`Retry`]
//!   - Quadratic backoff schedule through the [`BackoffStrategy`] trait
//!   - Every attempt failure is collected into an [`AggregateError`]
//! - **Throttle-then-retry** via [`ThrottledRetry`], where every retry attempt
//!   passes back through the throttle
//!
//! # Examples
//!
//! Using the prelude for convenient imports:
//!
//! ```rust
//! use throttle_retry::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let retry = Retry::new(RetryConfig::new(10, 3)?);
//!
//! let value = retry
//!     .run(|| async { Ok::<_, std::io::Error>(42) })
//!     .await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```
//!
//! The zero-configuration entry points use the shared throttle and the default
//! retry settings (1000ms interval, 3 attempts):
//!
//! ```rust,no_run
//! # async fn fetch_invoices() -> Result<Vec<String>, std::io::Error> { Ok(vec![]) }
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let invoices = throttle_retry::throttle_and_retry::run(|| fetch_invoices()).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod retry;
pub mod throttle;
pub mod throttle_and_retry;

pub use config::{RetryConfig, ThrottleConfig};
pub use error::{AggregateError, ConfigError, Result};
pub use retry::{BackoffStrategy, QuadraticBackoff, Retry};
pub use throttle::{RateWindow, Throttle};
pub use throttle_and_retry::ThrottledRetry;

/// Convenient re-exports of commonly used items.
///
/// Import all core abstractions with:
///
/// ```rust
/// use throttle_retry::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{RetryConfig, ThrottleConfig};
    pub use crate::error::{AggregateError, ConfigError};
    pub use crate::retry::{BackoffStrategy, QuadraticBackoff, Retry};
    pub use crate::throttle::{Throttle, registry};
    pub use crate::throttle_and_retry::ThrottledRetry;
}
