//! Generators render a [`LogEvent`] into one output format
//!
//! A generator only decides *how* one field is written. *Which* fields are
//! written, and in what order, comes from the `[Detail]` sequence handed to
//! [`generate`], which drives the emit hooks once per detail:
//!
//! ```text
//! emit_begin, emit(d0), emit_delimiter, emit(d1), ..., emit_end
//! ```
//!
//! [`generate`] is a free function rather than a trait method so
//! implementations cannot change the order of the hooks.

use super::detail::Detail;
use super::log_event::LogEvent;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Value of one detail, passed to [`Generator::emit`].
#[derive(Debug, Clone, Copy)]
pub enum DetailValue<'a> {
    /// The override flag
    Bool(bool),
    /// The line number
    Int(i64),
    /// Free text; `escape` marks content that may contain format-breaking
    /// characters (file, function, category and message)
    Str { value: &'a str, escape: bool },
    Timestamp(&'a DateTime<Utc>),
}

/// Output format strategy.
///
/// The framing methods (`file_header` and friends) are only used by file
/// destinations; console and memory destinations write bare records.
pub trait Generator: Send + Sync {
    fn name(&self) -> &str;

    /// Format used for [`DetailValue::Timestamp`]
    fn timestamp_format(&self) -> &TimestampFormat;

    /// Returning `false` makes [`generate`] yield no output for the event,
    /// which skips the destination's write.
    fn accepts(&self, _event: &LogEvent) -> bool {
        true
    }

    fn emit_begin(&self, _out: &mut String, _event: &LogEvent) {}

    fn emit(&self, out: &mut String, detail: Detail, value: DetailValue<'_>);

    fn emit_delimiter(&self, out: &mut String);

    fn emit_end(&self, _out: &mut String) {}

    /// Written once when a file is opened
    fn file_header(&self, _details: &[Detail]) -> Option<String> {
        None
    }

    /// Written between two records of the same file
    fn record_separator(&self) -> &str {
        ""
    }

    /// Written after every record
    fn record_terminator(&self) -> &str {
        "\n"
    }

    /// Written once when a file is closed
    fn file_footer(&self) -> Option<String> {
        None
    }

    fn file_extension(&self) -> &str {
        "txt"
    }

    fn format_timestamp(&self, timestamp: &DateTime<Utc>) -> String {
        self.timestamp_format().format(timestamp)
    }
}

/// Render `event` with `generator`, emitting `details` in order.
///
/// Returns `None` when the generator does not accept the event.
pub fn generate<G>(generator: &G, event: &LogEvent, details: &[Detail]) -> Option<String>
where
    G: Generator + ?Sized,
{
    if !generator.accepts(event) {
        return None;
    }

    let mut out = String::with_capacity(128 + event.message.len());
    generator.emit_begin(&mut out, event);

    for (idx, detail) in details.iter().copied().enumerate() {
        if idx > 0 {
            generator.emit_delimiter(&mut out);
        }

        let value = match detail {
            Detail::Override => DetailValue::Bool(event.is_override()),
            Detail::Date => DetailValue::Timestamp(&event.timestamp),
            Detail::File => DetailValue::Str {
                value: event.site.file_name(),
                escape: true,
            },
            Detail::Line => DetailValue::Int(i64::from(event.site.line)),
            Detail::Function => DetailValue::Str {
                value: event.site.function,
                escape: true,
            },
            Detail::Category => DetailValue::Str {
                value: event.category.as_deref().unwrap_or(""),
                escape: true,
            },
            Detail::Level => DetailValue::Str {
                value: event.level.as_str(),
                escape: false,
            },
            Detail::Message => DetailValue::Str {
                value: &event.message,
                escape: true,
            },
        };
        generator.emit(&mut out, detail, value);
    }

    generator.emit_end(&mut out);
    Some(out)
}

/// The default log4j-style plain-text generator.
///
/// ```text
/// - [2025-01-08 10:30:45.123 +0000] server.rs (42) accept [Net] Info: connected
/// ```
///
/// Every line starts with `*` for override calls and `-` otherwise, whether
/// or not [`Detail::Override`] is in the sequence.
#[derive(Debug, Clone, Default)]
pub struct TextGenerator {
    timestamp_format: TimestampFormat,
}

impl TextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn marker(is_override: bool) -> &'static str {
        if is_override {
            "*"
        } else {
            "-"
        }
    }
}

impl Generator for TextGenerator {
    fn name(&self) -> &str {
        "text"
    }

    fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    fn emit_begin(&self, out: &mut String, event: &LogEvent) {
        out.push_str(Self::marker(event.is_override()));
        out.push(' ');
    }

    fn emit(&self, out: &mut String, detail: Detail, value: DetailValue<'_>) {
        match value {
            DetailValue::Bool(flag) => out.push_str(Self::marker(flag)),
            DetailValue::Int(n) if detail == Detail::Line => {
                out.push('(');
                out.push_str(&n.to_string());
                out.push(')');
            }
            DetailValue::Int(n) => out.push_str(&n.to_string()),
            DetailValue::Str { value, .. } => match detail {
                Detail::Category => {
                    out.push('[');
                    out.push_str(value);
                    out.push(']');
                }
                Detail::Message => {
                    // "Info: message", not "Info : message"
                    if out.ends_with(' ') {
                        out.pop();
                    }
                    out.push_str(": ");
                    out.push_str(value);
                }
                _ => out.push_str(value),
            },
            DetailValue::Timestamp(ts) => {
                out.push('[');
                out.push_str(&self.format_timestamp(ts));
                out.push(']');
            }
        }
    }

    fn emit_delimiter(&self, out: &mut String) {
        out.push(' ');
    }
}

/// Predicate type for [`Filtered`]
pub type EventFilter = Arc<dyn Fn(&LogEvent) -> bool + Send + Sync>;

/// Wraps a generator and yields no output for events the filter rejects.
///
/// ```
/// use rust_category_logger::core::{Filtered, Level, LogEvent, TextGenerator};
/// use std::sync::Arc;
///
/// // Only errors and worse reach the destination using this generator.
/// let generator = Filtered::new(
///     TextGenerator::new(),
///     Arc::new(|e: &LogEvent| e.level <= Level::Error),
/// );
/// ```
pub struct Filtered<G> {
    inner: G,
    filter: EventFilter,
}

impl<G: Generator> Filtered<G> {
    pub fn new(inner: G, filter: EventFilter) -> Self {
        Self { inner, filter }
    }
}

impl<G: fmt::Debug> fmt::Debug for Filtered<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filtered").field("inner", &self.inner).finish_non_exhaustive()
    }
}

impl<G: Generator> Generator for Filtered<G> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn timestamp_format(&self) -> &TimestampFormat {
        self.inner.timestamp_format()
    }

    fn accepts(&self, event: &LogEvent) -> bool {
        (self.filter)(event) && self.inner.accepts(event)
    }

    fn emit_begin(&self, out: &mut String, event: &LogEvent) {
        self.inner.emit_begin(out, event);
    }

    fn emit(&self, out: &mut String, detail: Detail, value: DetailValue<'_>) {
        self.inner.emit(out, detail, value);
    }

    fn emit_delimiter(&self, out: &mut String) {
        self.inner.emit_delimiter(out);
    }

    fn emit_end(&self, out: &mut String) {
        self.inner.emit_end(out);
    }

    fn file_header(&self, details: &[Detail]) -> Option<String> {
        self.inner.file_header(details)
    }

    fn record_separator(&self) -> &str {
        self.inner.record_separator()
    }

    fn record_terminator(&self) -> &str {
        self.inner.record_terminator()
    }

    fn file_footer(&self) -> Option<String> {
        self.inner.file_footer()
    }

    fn file_extension(&self) -> &str {
        self.inner.file_extension()
    }
}
