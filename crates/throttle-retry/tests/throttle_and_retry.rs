//! Integration tests for the throttle-then-retry combinator
//!
//! Throttle and retry are covered by their own tests, so these only check that
//! the two are combined correctly.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use throttle_retry::throttle_and_retry;
use throttle_retry::{Retry, RetryConfig, Throttle, ThrottleConfig, ThrottledRetry};
use tokio_test::assert_ok;

#[tokio::test(start_paused = true)]
async fn test_execute_was_called() {
    let called = AtomicU32::new(0);

    let result = throttle_and_retry::run(|| {
        called.fetch_add(1, Ordering::SeqCst);
        async { Ok::<(), std::io::Error>(()) }
    })
    .await;

    assert_ok!(result);
    assert_eq!(called.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_result_returned() {
    let result = throttle_and_retry::run(|| async { Ok::<_, std::io::Error>(123) }).await;

    assert_eq!(assert_ok!(result), 123);
}

#[tokio::test(start_paused = true)]
async fn test_shared_throttle_counts_every_attempt() {
    let throttle = Arc::new(Throttle::new(ThrottleConfig::new(100, 60).unwrap()));
    let first = ThrottledRetry::new(
        Arc::clone(&throttle),
        Retry::new(RetryConfig::new(1, 3).unwrap()),
    );
    let second = ThrottledRetry::new(
        Arc::clone(&throttle),
        Retry::new(RetryConfig::new(1, 2).unwrap()),
    );

    let failed = first.run(|| async { Err::<(), _>("down") }).await;
    let succeeded = second.run(|| async { Ok::<_, &str>(1) }).await;

    assert_eq!(failed.unwrap_err().len(), 3);
    assert_eq!(succeeded, Ok(1));
    assert_eq!(throttle.recorded_calls().await, 4);
}
