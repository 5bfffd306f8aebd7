//! Configuration for the throttle and the retry executor.
//!
//! Both configurations are validated when they are built. A zero call limit,
//! window, interval, or attempt budget is rejected with a [`ConfigError`]
//! instead of surfacing on first use.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

/// Default number of calls admitted per window.
pub const DEFAULT_CALL_LIMIT: u32 = 60;

/// Default window length in seconds.
pub const DEFAULT_WINDOW_SECONDS: u64 = 60;

/// Default base interval for the retry backoff, in milliseconds.
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 1000;

/// Default number of attempts, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Sliding-window throttle limits: at most `call_limit` call starts in any
/// rolling `window_seconds` window.
///
/// The defaults (60 calls in 60 seconds) match the per-minute limit of the
/// remote accounting API this crate was written against.
///
/// # Examples
///
/// ```rust
/// use throttle_retry::ThrottleConfig;
/// use std::time::Duration;
///
/// let config = ThrottleConfig::new(2, 1)?;
/// assert_eq!(config.call_limit(), 2);
/// assert_eq!(config.window(), Duration::from_secs(1));
///
/// assert!(ThrottleConfig::new(0, 60).is_err());
/// # Ok::<(), throttle_retry::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ThrottleConfigFile")]
pub struct ThrottleConfig {
    call_limit: u32,
    window_seconds: u64,
}

impl ThrottleConfig {
    /// Create a validated throttle configuration.
    pub fn new(call_limit: u32, window_seconds: u64) -> Result<Self> {
        if call_limit == 0 {
            return Err(ConfigError::InvalidCallLimit(call_limit));
        }
        if window_seconds == 0 {
            return Err(ConfigError::InvalidWindow(window_seconds));
        }
        Ok(Self {
            call_limit,
            window_seconds,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `THROTTLE_CALL_LIMIT` for the number of calls per window
    /// - `THROTTLE_WINDOW_SECONDS` for the window length
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let call_limit = env_var("THROTTLE_CALL_LIMIT")?.unwrap_or(DEFAULT_CALL_LIMIT);
        let window_seconds = env_var("THROTTLE_WINDOW_SECONDS")?.unwrap_or(DEFAULT_WINDOW_SECONDS);
        Self::new(call_limit, window_seconds)
    }

    /// Maximum number of calls admitted per window.
    pub fn call_limit(&self) -> u32 {
        self.call_limit
    }

    /// Window length in whole seconds.
    pub fn window_seconds(&self) -> u64 {
        self.window_seconds
    }

    /// Window length.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            call_limit: DEFAULT_CALL_LIMIT,
            window_seconds: DEFAULT_WINDOW_SECONDS,
        }
    }
}

#[derive(Deserialize)]
struct ThrottleConfigFile {
    #[serde(default = "default_call_limit")]
    call_limit: u32,
    #[serde(default = "default_window_seconds")]
    window_seconds: u64,
}

impl TryFrom<ThrottleConfigFile> for ThrottleConfig {
    type Error = ConfigError;

    fn try_from(file: ThrottleConfigFile) -> Result<Self> {
        Self::new(file.call_limit, file.window_seconds)
    }
}

/// Retry executor settings.
///
/// `interval_ms` is the base of the backoff schedule; see
/// [`QuadraticBackoff`](crate::QuadraticBackoff) for how it grows.
/// `max_attempts` counts the first attempt, so `max_attempts == 1` means the
/// operation is never retried.
///
/// # Examples
///
/// ```rust
/// use throttle_retry::RetryConfig;
///
/// let config = RetryConfig::default();
/// assert_eq!(config.interval_ms(), 1000);
/// assert_eq!(config.max_attempts(), 3);
///
/// assert!(RetryConfig::new(1000, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RetryConfigFile")]
pub struct RetryConfig {
    interval_ms: u64,
    max_attempts: NonZeroU32,
}

impl RetryConfig {
    /// Create a validated retry configuration.
    pub fn new(interval_ms: u64, max_attempts: u32) -> Result<Self> {
        if interval_ms == 0 {
            return Err(ConfigError::InvalidInterval(interval_ms));
        }
        let Some(max_attempts) = NonZeroU32::new(max_attempts) else {
            return Err(ConfigError::InvalidAttempts(max_attempts));
        };
        Ok(Self {
            interval_ms,
            max_attempts,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `RETRY_INTERVAL_MS` for the backoff base interval
    /// - `RETRY_MAX_ATTEMPTS` for the attempt budget
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let interval_ms = env_var("RETRY_INTERVAL_MS")?.unwrap_or(DEFAULT_RETRY_INTERVAL_MS);
        let max_attempts = env_var("RETRY_MAX_ATTEMPTS")?.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        Self::new(interval_ms, max_attempts)
    }

    /// Base backoff interval in milliseconds.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Total number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.get()
    }

    /// Total number of attempts, as a type that cannot be zero.
    pub fn attempts(&self) -> NonZeroU32 {
        self.max_attempts
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_RETRY_INTERVAL_MS,
            max_attempts: NonZeroU32::MIN.saturating_add(DEFAULT_MAX_ATTEMPTS - 1),
        }
    }
}

#[derive(Deserialize)]
struct RetryConfigFile {
    #[serde(default = "default_interval_ms")]
    interval_ms: u64,
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
}

impl TryFrom<RetryConfigFile> for RetryConfig {
    type Error = ConfigError;

    fn try_from(file: RetryConfigFile) -> Result<Self> {
        Self::new(file.interval_ms, file.max_attempts)
    }
}

fn default_call_limit() -> u32 {
    DEFAULT_CALL_LIMIT
}

fn default_window_seconds() -> u64 {
    DEFAULT_WINDOW_SECONDS
}

fn default_interval_ms() -> u64 {
    DEFAULT_RETRY_INTERVAL_MS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn env_var<T: FromStr>(name: &'static str) -> Result<Option<T>> {
    let Ok(value) = env::var(name) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(ConfigError::InvalidEnvVar { name, value }),
    }
}
