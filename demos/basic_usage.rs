//! Basic logger usage example
//!
//! Demonstrates synchronous logging to the console with levels, categories
//! and per-call overrides.
//!
//! Run with: cargo run --example basic_usage

use rust_category_logger::prelude::*;
use rust_category_logger::{info, warning};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Subsystem {
    Network,
    Storage,
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn main() -> Result<()> {
    println!("=== Rust Category Logger - Basic Usage Example ===\n");

    // Create a synchronous logger writing to the console
    let logger: Logger<Subsystem> = Logger::builder()
        .synchronous()
        .level(Level::Verbose)
        .destination(ConsoleDestination::new())
        .build();

    // Log messages at different levels
    println!("1. Logging at different levels:");
    logger.verbose("This is a verbose message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.severe("This is a severe message");

    println!("\n2. Logging with a different global level:");
    logger.set_level(Level::Info);
    println!("   Level set to Info - verbose and debug won't show:");
    logger.verbose("Verbose message (hidden)");
    logger.debug("Debug message (hidden)");
    logger.info("Info message (visible)");
    logger.warning("Warning message (visible)");

    println!("\n3. Per-category levels:");
    logger.set_category_level(Subsystem::Network, Level::Verbose);
    logger.set_category_level(Subsystem::Storage, Level::Error);
    logger.debug_in(Subsystem::Network, "Network debug (visible)");
    logger.warning_in(Subsystem::Storage, "Storage warning (hidden)");
    logger.error_in(Subsystem::Storage, "Storage error (visible)");

    println!("\n4. Overrides and lazy messages:");
    logger.with_override(Level::Verbose).verbose("Forced through by an override");
    logger.verbose_with(|| format!("Never built: {:?}", expensive_state()));
    info!(logger, category: Subsystem::Network, "Connected to {}:{}", "localhost", 8080);
    warning!(logger, overriding: Level::Warning, "Retrying in {}ms", 250);

    println!("\n5. Hit and miss counters:");
    println!("   hits: {}, misses: {}", logger.hits(), logger.misses());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

fn expensive_state() -> Vec<u64> {
    (0..1_000).collect()
}
