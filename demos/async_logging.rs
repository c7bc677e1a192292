//! Async logging example
//!
//! Demonstrates background dispatch with multiple producer threads, overflow
//! handling and orderly shutdown.
//!
//! Run with: cargo run --example async_logging

use rust_category_logger::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Category Logger - Async Logging Example ===\n");

    // Bounded queue of 1000 events; overflow is reported and dropped
    let logger: Logger = Logger::builder()
        .async_mode(1000)
        .overflow_policy(OverflowPolicy::AlertAndDrop)
        .on_overflow(Arc::new(|dropped| eprintln!("   overflow: {} events dropped", dropped)))
        .destination(ConsoleDestination::new())
        .destination(FileDestination::new("async_test.log"))
        .build();

    println!("1. High-performance async logging:");

    for i in 0..100 {
        logger.info_with(|| format!("Message #{}", i));
    }

    println!("   Logged 100 messages asynchronously");

    println!("\n2. Multi-threaded logging:");

    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..5)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..20 {
                    logger.info_with(|| format!("Thread {} - Message {}", thread_id, i));
                    thread::sleep(Duration::from_millis(10));
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("   a producer thread panicked");
        }
    }

    println!("   5 threads logged 20 messages each");

    // Wait for the worker to write everything queued so far
    logger.flush()?;

    let metrics = logger.metrics();
    println!("\n3. Metrics:");
    println!("   hits: {}", logger.hits());
    println!("   dropped: {}", metrics.dropped_count());
    println!("   failed writes: {}", metrics.failed_writes());

    if !logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT) {
        eprintln!("   worker did not stop in time");
    }

    println!("\n=== Example completed successfully! ===");
    println!("Check 'async_test.log' for file output");

    Ok(())
}
