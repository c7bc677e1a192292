//! Destination trait for log output sinks

use super::color::ColorMap;
use super::decorator::Decorator;
use super::detail::Detail;
use super::error::Result;
use super::generator::Generator;
use super::log_level::Level;
use std::borrow::Cow;
use std::sync::Arc;

/// A sink for rendered log lines.
///
/// The logger renders each event with [`Destination::generator`] (or its
/// own default generator when `None`) using [`Destination::details`] (or
/// its own default sequence when `None`), then calls
/// [`Destination::log_string`]. All calls come from one thread at a time.
///
/// # Example
///
/// ```
/// use rust_category_logger::core::{Destination, Level, Result};
///
/// struct Stdout;
///
/// impl Destination for Stdout {
///     fn log_string(&mut self, rendered: &str, _level: Level) -> Result<()> {
///         println!("{}", rendered);
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "stdout"
///     }
/// }
/// ```
pub trait Destination: Send + Sync {
    fn generator(&self) -> Option<&dyn Generator> {
        None
    }

    fn details(&self) -> Option<&[Detail]> {
        None
    }

    fn color_map(&self) -> Option<&ColorMap> {
        None
    }

    fn decorator(&self) -> Option<&dyn Decorator> {
        None
    }

    /// Write one rendered line. `level` is the site level of the event.
    fn log_string(&mut self, rendered: &str, level: Level) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Release the backing resource; called once on logger shutdown.
    fn close(&mut self) -> Result<()> {
        self.flush()
    }

    fn name(&self) -> &str;
}

/// Optional per-destination settings shared by the built-in destinations.
#[derive(Clone, Default)]
pub struct DestinationConfig {
    pub generator: Option<Arc<dyn Generator>>,
    pub details: Option<Vec<Detail>>,
    pub color_map: Option<ColorMap>,
    pub decorator: Option<Arc<dyn Decorator>>,
}

impl DestinationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the decorator when both it and a color for `level` exist.
    pub fn decorate<'a>(&self, rendered: &'a str, level: Level) -> Cow<'a, str> {
        match (&self.decorator, self.color_map.as_ref().and_then(|m| m.get(&level))) {
            (Some(decorator), Some(spec)) => Cow::Owned(decorator.decorate(rendered, spec)),
            _ => Cow::Borrowed(rendered),
        }
    }
}

impl std::fmt::Debug for DestinationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestinationConfig")
            .field("generator", &self.generator.as_ref().map(|g| g.name().to_string()))
            .field("details", &self.details)
            .field("color_map", &self.color_map.as_ref().map(|m| m.len()))
            .field("decorator", &self.decorator.is_some())
            .finish()
    }
}

/// Builder-style setters shared by the built-in destinations.
///
/// The type needs `name: String` and `config: DestinationConfig` fields.
macro_rules! destination_setters {
    ($ty:ty) => {
        impl $ty {
            /// Name used by [`Logger::remove_destination`](crate::core::Logger::remove_destination)
            /// and in failure reports
            #[must_use]
            pub fn with_name(mut self, name: impl Into<String>) -> Self {
                self.name = name.into();
                self
            }

            /// Render with this generator instead of the logger's default
            #[must_use]
            pub fn with_generator<G: $crate::core::Generator + 'static>(mut self, generator: G) -> Self {
                self.config.generator = Some(std::sync::Arc::new(generator));
                self
            }

            /// Render these details instead of the logger's sequence
            #[must_use]
            pub fn with_details(mut self, details: Vec<$crate::core::Detail>) -> Self {
                self.config.details = Some(details);
                self
            }

            #[must_use]
            pub fn with_color_map(mut self, color_map: $crate::core::ColorMap) -> Self {
                self.config.color_map = Some(color_map);
                self
            }

            #[must_use]
            pub fn with_decorator<D: $crate::core::Decorator + 'static>(mut self, decorator: D) -> Self {
                self.config.decorator = Some(std::sync::Arc::new(decorator));
                self
            }
        }
    };
}

pub(crate) use destination_setters;

/// Forwards the optional accessors of [`Destination`] to a `config` field.
macro_rules! forward_config {
    () => {
        fn generator(&self) -> Option<&dyn $crate::core::Generator> {
            self.config.generator.as_deref()
        }

        fn details(&self) -> Option<&[$crate::core::Detail]> {
            self.config.details.as_deref()
        }

        fn color_map(&self) -> Option<&$crate::core::ColorMap> {
            self.config.color_map.as_ref()
        }

        fn decorator(&self) -> Option<&dyn $crate::core::Decorator> {
            self.config.decorator.as_deref()
        }
    };
}

pub(crate) use forward_config;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::{Color, ColorSpec};
    use crate::core::decorator::AnsiDecorator;

    #[test]
    fn test_decorate_requires_decorator_and_color() {
        let mut config = DestinationConfig::new();
        assert_eq!(config.decorate("x", Level::Error), "x");

        let mut map = ColorMap::new();
        map.insert(Level::Error, ColorSpec::fg(Color::new(1.0, 0.0, 0.0)));
        config.color_map = Some(map);
        assert_eq!(config.decorate("x", Level::Error), "x");

        config.decorator = Some(Arc::new(AnsiDecorator));
        assert_ne!(config.decorate("x", Level::Error), "x");
        // no color for Info
        assert_eq!(config.decorate("x", Level::Info), "x");
    }
}
