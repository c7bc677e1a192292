//! Console destination implementation

use crate::core::destination::{destination_setters, forward_config};
use crate::core::{default_color_map, Destination, DestinationConfig, Level, Result};
use std::io::Write;

/// Writes one line per event to stdout, or stderr for `Severe` and `Error`.
///
/// Colored by level with [`default_color_map`] unless colors are disabled.
///
/// ```
/// use rust_category_logger::destinations::ConsoleDestination;
/// use rust_category_logger::generators::JsonGenerator;
///
/// let plain = ConsoleDestination::with_colors(false).with_generator(JsonGenerator::new());
/// ```
pub struct ConsoleDestination {
    name: String,
    config: DestinationConfig,
}

impl ConsoleDestination {
    pub fn new() -> Self {
        Self::with_colors(true)
    }

    pub fn with_colors(use_colors: bool) -> Self {
        let mut config = DestinationConfig::new();
        if use_colors {
            config.color_map = Some(default_color_map());
            config.decorator = Some(Self::default_decorator());
        }
        Self {
            name: "console".to_string(),
            config,
        }
    }

    #[cfg(feature = "console")]
    fn default_decorator() -> std::sync::Arc<dyn crate::core::Decorator> {
        std::sync::Arc::new(crate::core::ColoredDecorator)
    }

    #[cfg(not(feature = "console"))]
    fn default_decorator() -> std::sync::Arc<dyn crate::core::Decorator> {
        std::sync::Arc::new(crate::core::AnsiDecorator)
    }
}

impl Default for ConsoleDestination {
    fn default() -> Self {
        Self::new()
    }
}

destination_setters!(ConsoleDestination);

impl Destination for ConsoleDestination {
    forward_config!();

    fn log_string(&mut self, rendered: &str, level: Level) -> Result<()> {
        let line = self.config.decorate(rendered, level);

        // Route Severe and Error to stderr, others to stdout
        match level {
            Level::Severe | Level::Error => writeln!(std::io::stderr().lock(), "{}", line)?,
            _ => writeln!(std::io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
