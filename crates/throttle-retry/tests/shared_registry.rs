//! Installing a custom shared throttle
//!
//! Lives in its own test binary: the shared throttle is process-wide and can
//! only be configured before anything else touches it.

use std::time::Duration;
use throttle_retry::throttle::{self, registry};
use throttle_retry::{ConfigError, ThrottleConfig};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_installed_config_governs_module_level_run() {
    assert!(!registry::is_initialized());

    let installed = registry::install(ThrottleConfig::new(1, 2).unwrap()).unwrap();
    assert_eq!(installed.config().call_limit(), 1);
    assert!(registry::is_initialized());

    assert_eq!(
        registry::install(ThrottleConfig::default()).unwrap_err(),
        ConfigError::SharedThrottleInitialized
    );

    let start = Instant::now();
    throttle::run(|| async {}).await;
    throttle::run(|| async {}).await;

    assert!(start.elapsed() >= Duration::from_secs(2));
}
