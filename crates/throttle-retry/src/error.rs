//! Error types for throttling and retry.
//!
//! Two kinds of failure originate in this crate:
//!
//! - [`ConfigError`]: invalid throttle or retry parameters, rejected when the
//!   configuration is built rather than on first use.
//! - [`AggregateError`]: every attempt of a retried operation failed. It carries
//!   each attempt's failure in attempt order.
//!
//! Failures raised by the caller's own operation are never inspected; the
//! throttle passes them through unchanged and the retry executor only collects
//! them.

use std::error::Error;
use std::fmt;

/// Result type for configuration entry points.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Invalid throttle or retry configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The throttle call limit must be at least 1.
    #[error("call limit must be a positive integer, got {0}")]
    InvalidCallLimit(u32),

    /// The throttle window must be at least 1 second.
    #[error("window must be a positive number of seconds, got {0}")]
    InvalidWindow(u64),

    /// The retry interval must be at least 1 millisecond.
    #[error("retry interval must be a positive number of milliseconds, got {0}")]
    InvalidInterval(u64),

    /// The retry budget must allow at least one attempt.
    #[error("maximum attempts must be at least 1, got {0}")]
    InvalidAttempts(u32),

    /// An environment variable holds a value that is not a number.
    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidEnvVar {
        /// Variable name
        name: &'static str,
        /// Raw value found in the environment
        value: String,
    },

    /// The shared throttle was already constructed, so it can no longer be
    /// installed with a custom configuration.
    #[error("shared throttle is already initialized")]
    SharedThrottleInitialized,
}

/// Every attempt of a retried operation failed.
///
/// Holds one failure per attempt, in attempt order (attempt 1 first). Identical
/// failures are kept, so [`len`](Self::len) always equals the number of
/// attempts that were made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateError<E> {
    failures: Vec<E>,
}

impl<E> AggregateError<E> {
    pub(crate) fn new(failures: Vec<E>) -> Self {
        Self { failures }
    }

    /// The captured failures, in attempt order.
    pub fn failures(&self) -> &[E] {
        &self.failures
    }

    /// Consume the error and return the captured failures.
    pub fn into_failures(self) -> Vec<E> {
        self.failures
    }

    /// Number of failed attempts.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Always `false` for errors produced by [`Retry`](crate::Retry), which
    /// makes at least one attempt.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// The failure of the final attempt.
    pub fn last(&self) -> Option<&E> {
        self.failures.last()
    }
}

impl<E> IntoIterator for AggregateError<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl<E: fmt::Display> fmt::Display for AggregateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation failed after {} attempt(s)", self.failures.len())?;
        for (index, failure) in self.failures.iter().enumerate() {
            let separator = if index == 0 { ": " } else { "; " };
            write!(f, "{}[{}] {}", separator, index + 1, failure)?;
        }
        Ok(())
    }
}

impl<E: Error + 'static> Error for AggregateError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.failures.last().map(|failure| failure as &(dyn Error + 'static))
    }
}
