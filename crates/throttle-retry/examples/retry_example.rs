//! Example: Retrying a flaky API call with quadratic backoff
//!
//! This example demonstrates:
//! 1. A call that fails twice before succeeding
//! 2. A call that never succeeds and surfaces every failure
//!
//! Run with:
//! ```bash
//! cargo run -p throttle-retry --example retry_example
//! ```

use std::error::Error;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;
use throttle_retry::prelude::*;

/// A simulated API that fails the first few times
struct UnreliableApi {
    attempts: AtomicU32,
    fail_count: u32,
}

impl UnreliableApi {
    fn new(fail_count: u32) -> Self {
        Self {
            attempts: AtomicU32::new(0),
            fail_count,
        }
    }

    async fn call(&self) -> Result<String, std::io::Error> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);

        if attempt < self.fail_count {
            println!(
                "  Attempt {}: FAILED (simulating transient error)",
                attempt + 1
            );
            Err(std::io::Error::other(format!(
                "Transient error on attempt {}",
                attempt + 1
            )))
        } else {
            println!("  Attempt {}: SUCCESS", attempt + 1);
            Ok("API response data".to_string())
        }
    }

    fn total_attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

/// Example 1: Recovering after two failures
async fn example_recovery() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 1: Recovering After Two Failures ===\n");

    let retry = Retry::new(RetryConfig::new(20, 3)?);
    let api = UnreliableApi::new(2);

    println!("Calling unreliable API (will fail 2 times before succeeding)...");
    let start = Instant::now();

    let result = retry
        .run(|| {
            let api = &api;
            async move { api.call().await }
        })
        .await?;

    println!("\nResult: {}", result);
    println!("Total attempts: {}", api.total_attempts());
    println!("Total time: {:?}", start.elapsed());
    println!("Expected delays: 0ms (attempt 1) + 180ms + 320ms = ~500ms");

    Ok(())
}

/// Example 2: Exhausting every attempt
async fn example_exhausted() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 2: Exhausting Every Attempt ===\n");

    let retry = Retry::new(RetryConfig::new(5, 3)?);
    let api = UnreliableApi::new(u32::MAX);

    let result = retry
        .run(|| {
            let api = &api;
            async move { api.call().await }
        })
        .await;

    match result {
        Ok(_) => println!("Unexpected success"),
        Err(err) => {
            println!("\nGave up: {}", err);
            for (index, failure) in err.failures().iter().enumerate() {
                println!("  Failure {}: {}", index + 1, failure);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    example_recovery().await?;
    example_exhausted().await?;

    println!("\n=== All examples completed ===\n");
    Ok(())
}
