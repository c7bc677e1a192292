//! Comma-separated values

use crate::core::{Detail, DetailValue, Generator, TimestampFormat};

/// One CSV row per event.
///
/// Escape-hinted strings and dates are quoted with internal `"` doubled;
/// the level, booleans and line numbers are written bare.
#[derive(Debug, Clone, Default)]
pub struct CsvGenerator {
    timestamp_format: TimestampFormat,
}

impl CsvGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn push_quoted(out: &mut String, value: &str) {
        out.push('"');
        out.push_str(&value.replace('"', "\"\""));
        out.push('"');
    }
}

impl Generator for CsvGenerator {
    fn name(&self) -> &str {
        "csv"
    }

    fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    fn emit(&self, out: &mut String, _detail: Detail, value: DetailValue<'_>) {
        match value {
            DetailValue::Bool(flag) => out.push_str(if flag { "true" } else { "false" }),
            DetailValue::Int(n) => out.push_str(&n.to_string()),
            DetailValue::Str { value, escape: true } => Self::push_quoted(out, value),
            DetailValue::Str { value, escape: false } => out.push_str(value),
            DetailValue::Timestamp(ts) => Self::push_quoted(out, &self.format_timestamp(ts)),
        }
    }

    fn emit_delimiter(&self, out: &mut String) {
        out.push(',');
    }

    fn file_header(&self, details: &[Detail]) -> Option<String> {
        let names: Vec<&str> = details.iter().map(Detail::name).collect();
        Some(format!("{}\n", names.join(",")))
    }

    fn file_extension(&self) -> &str {
        "csv"
    }
}
