//! The process-wide shared throttle.
//!
//! Every caller of the zero-configuration entry points
//! ([`throttle::run`](crate::throttle::run) and
//! [`throttle_and_retry::run`](crate::throttle_and_retry::run)) shares one
//! [`Throttle`], so the limit applies to the whole process rather than to a
//! single call site.
//!
//! The instance is constructed at most once, even under concurrent first use,
//! and lives for the rest of the process. It uses
//! [`ThrottleConfig::default`] (60 calls in 60 seconds) unless
//! [`install`] is called before anything touches it.

use super::Throttle;
use crate::config::ThrottleConfig;
use crate::error::{ConfigError, Result};
use std::sync::OnceLock;

static SHARED: OnceLock<Throttle> = OnceLock::new();

/// Get the shared throttle, constructing it with the default limits on first
/// access.
///
/// # Examples
///
/// ```rust
/// use throttle_retry::throttle::registry;
///
/// let throttle = registry::shared();
/// assert!(registry::is_initialized());
/// assert!(std::ptr::eq(throttle, registry::shared()));
/// ```
pub fn shared() -> &'static Throttle {
    SHARED.get_or_init(|| build(ThrottleConfig::default()))
}

/// Construct the shared throttle with `config`.
///
/// Must run before the first call to [`shared`] (directly or through the
/// module-level `run` functions). Once the instance exists its limits are
/// fixed, and this returns [`ConfigError::SharedThrottleInitialized`].
///
/// # Examples
///
/// ```rust,no_run
/// use throttle_retry::ThrottleConfig;
/// use throttle_retry::throttle::registry;
///
/// # fn main() -> Result<(), throttle_retry::ConfigError> {
/// let throttle = registry::install(ThrottleConfig::new(30, 60)?)?;
/// assert_eq!(throttle.config().call_limit(), 30);
///
/// // Later installs are rejected.
/// assert!(registry::install(ThrottleConfig::default()).is_err());
/// # Ok(())
/// # }
/// ```
pub fn install(config: ThrottleConfig) -> Result<&'static Throttle> {
    let mut constructed = false;
    let throttle = SHARED.get_or_init(|| {
        constructed = true;
        build(config)
    });

    if constructed {
        Ok(throttle)
    } else {
        Err(ConfigError::SharedThrottleInitialized)
    }
}

/// Whether the shared throttle has been constructed.
pub fn is_initialized() -> bool {
    SHARED.get().is_some()
}

fn build(config: ThrottleConfig) -> Throttle {
    tracing::debug!(
        call_limit = config.call_limit(),
        window_seconds = config.window_seconds(),
        "initializing shared throttle"
    );
    Throttle::new(config)
}
