//! Example: Throttling bursts and retrying through the throttle
//!
//! This example demonstrates:
//! 1. A burst of calls held to 3 per second
//! 2. Retries that pass back through the same throttle
//!
//! Run with:
//! ```bash
//! cargo run -p throttle-retry --example throttle_example
//! ```

use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;
use throttle_retry::prelude::*;

/// Example 1: A burst of calls
async fn example_burst() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 1: Burst of 7 Calls at 3 per Second ===\n");

    let throttle = Throttle::new(ThrottleConfig::new(3, 1)?);
    let start = Instant::now();

    for call in 1..=7 {
        throttle
            .run(|| async move {
                println!("  Call {} started at {:?}", call, start.elapsed());
            })
            .await;
    }

    println!("\nTotal time: {:?}", start.elapsed());
    println!("Expected: calls 4-6 wait ~1s, call 7 waits ~2s");

    Ok(())
}

/// Example 2: Retries share the throttle with other traffic
async fn example_throttled_retry() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 2: Throttled Retries ===\n");

    let throttle = Arc::new(Throttle::new(ThrottleConfig::new(2, 1)?));
    let client = ThrottledRetry::new(Arc::clone(&throttle), Retry::new(RetryConfig::new(10, 3)?));

    let attempts = AtomicU32::new(0);
    let start = Instant::now();

    let result = client
        .run(|| {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                println!("  Attempt {} at {:?}", attempt, start.elapsed());
                if attempt < 3 {
                    Err(std::io::Error::other("service unavailable"))
                } else {
                    Ok("report generated")
                }
            }
        })
        .await?;

    println!("\nResult: {}", result);
    println!("Calls recorded by the throttle: {}", throttle.recorded_calls().await);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    example_burst().await?;
    example_throttled_retry().await?;

    println!("\n=== All examples completed ===\n");
    Ok(())
}
