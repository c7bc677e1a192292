//! # Rust Category Logger
//!
//! A structured logging library with per-category levels, per-call level
//! overrides and pluggable output formats, dispatched through a single
//! background worker.
//!
//! ## Features
//!
//! - **Cheap disabled sites**: admission is one comparison on the caller's
//!   thread; messages are closures evaluated only when admitted
//! - **Categories**: any `Eq + Hash + Display` type can carry its own level
//! - **Overrides**: force a single call through (or silence it) regardless
//!   of the configured levels
//! - **Formats**: plain text, CSV, TSV, JSON and XML generators
//! - **Destinations**: console, in-memory and file, or your own
//!
//! ## Example
//!
//! ```
//! use rust_category_logger::prelude::*;
//!
//! let logger = Logger::new();
//! logger.add_destination(Box::new(ConsoleDestination::new()));
//!
//! logger.info("Application started");
//! logger.debug_with(|| format!("state: {:?}", vec![1, 2, 3]));
//! logger.with_override(Level::Verbose).verbose("traced regardless of level");
//! ```

pub mod core;
pub mod destinations;
pub mod generators;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        CallSite, Category, Color, ColorMap, ColorSpec, Decorator, Destination, Detail, Generator,
        Level, LogEvent, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        NoCategory, OverflowCallback, OverflowPolicy, Result, TextGenerator, TimestampFormat,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::destinations::{ConsoleDestination, FileDestination, MemoryBuffer, MemoryDestination};
    pub use crate::generators::{CsvGenerator, JsonGenerator, TsvGenerator, XmlGenerator};
}

pub use core::{
    CallSite, Category, Color, ColorMap, ColorSpec, Decorator, Destination, Detail, Generator, Level,
    LogEvent, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, NoCategory,
    OverflowCallback, OverflowPolicy, OverrideScope, Result, TextGenerator, TimestampFormat,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use destinations::{ConsoleDestination, FileDestination, MemoryBuffer, MemoryDestination};
