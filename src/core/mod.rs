//! Core logger types and traits

pub mod category;
pub mod color;
pub mod config;
pub mod decorator;
pub mod destination;
pub mod detail;
mod dispatch;
pub mod error;
pub mod generator;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod timestamp;

pub use category::{Category, NoCategory};
pub use color::{default_color_map, Color, ColorMap, ColorSpec};
pub use config::{LoggerConfig, DEFAULT_QUEUE_CAPACITY};
#[cfg(feature = "console")]
pub use decorator::ColoredDecorator;
pub use decorator::{AnsiDecorator, Decorator};
pub use destination::{Destination, DestinationConfig};
pub use detail::Detail;
pub use error::{LoggerError, Result};
pub use generator::{generate, DetailValue, EventFilter, Filtered, Generator, TextGenerator};
pub use log_event::{CallSite, LogEvent};
pub use log_level::Level;
pub use logger::{Logger, LoggerBuilder, OverrideScope, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use overflow_policy::{OverflowCallback, OverflowPolicy};
pub use timestamp::TimestampFormat;
