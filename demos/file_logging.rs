//! File logging example
//!
//! Demonstrates logging to the console and to structured files at the same
//! time, each destination choosing its own format.
//!
//! Run with: cargo run --example file_logging

use rust_category_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Category Logger - File Logging Example ===\n");

    let logger: Logger<String> = Logger::builder()
        .synchronous()
        .level(Level::Debug)
        .details(Detail::ALL.to_vec())
        .destination(ConsoleDestination::new())
        .destination(FileDestination::new("application.log"))
        .destination(FileDestination::csv("application.csv"))
        .destination(FileDestination::json("application.json"))
        .build();

    // Timestamped XML file in a directory of its own
    logger.add_destination(Box::new(FileDestination::in_directory("logs", XmlGenerator::new())?));

    println!("1. Logging to the console and four files:");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.info_in("config".to_string(), "Configuration loaded successfully");
    logger.warning_in("config".to_string(), "Using default settings for some options");
    logger.info_in("db".to_string(), "Database connection established");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info_with(|| format!("Processing item {}/5", i));
        if i == 3 {
            logger.warning("Item 3 took longer than expected");
        }
    }

    logger.info("All operations completed");

    // Closing the destinations writes the CSV/JSON/XML footers
    logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

    println!("\n=== Example completed successfully! ===");
    println!("Check application.log, application.csv, application.json and logs/ for output");

    Ok(())
}
