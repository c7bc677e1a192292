//! JSON records
//!
//! Each event becomes one object keyed by detail name. File destinations
//! wrap the records in a top-level array, so a closed file parses as
//! `[{...},{...}]`.

use crate::core::{Detail, DetailValue, Generator, TimestampFormat};

#[derive(Debug, Clone, Default)]
pub struct JsonGenerator {
    timestamp_format: TimestampFormat,
}

impl JsonGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn push_key(out: &mut String, detail: Detail) {
        Self::push_string(out, detail.name());
        out.push(':');
    }

    fn push_string(out: &mut String, value: &str) {
        out.push_str(&serde_json::Value::String(value.to_string()).to_string());
    }
}

impl Generator for JsonGenerator {
    fn name(&self) -> &str {
        "json"
    }

    fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    fn emit_begin(&self, out: &mut String, _event: &crate::core::LogEvent) {
        out.push('{');
    }

    fn emit(&self, out: &mut String, detail: Detail, value: DetailValue<'_>) {
        Self::push_key(out, detail);
        match value {
            DetailValue::Bool(flag) => out.push_str(if flag { "true" } else { "false" }),
            DetailValue::Int(n) => out.push_str(&n.to_string()),
            DetailValue::Str { value, .. } => Self::push_string(out, value),
            DetailValue::Timestamp(ts) => {
                let formatted = self.format_timestamp(ts);
                if self.timestamp_format.is_numeric() {
                    out.push_str(&formatted);
                } else {
                    Self::push_string(out, &formatted);
                }
            }
        }
    }

    fn emit_delimiter(&self, out: &mut String) {
        out.push(',');
    }

    fn emit_end(&self, out: &mut String) {
        out.push('}');
    }

    fn file_header(&self, _details: &[Detail]) -> Option<String> {
        Some("[\n".to_string())
    }

    fn record_separator(&self) -> &str {
        ",\n"
    }

    fn record_terminator(&self) -> &str {
        ""
    }

    fn file_footer(&self) -> Option<String> {
        Some("\n]\n".to_string())
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{generate, CallSite, Level, LogEvent};

    #[test]
    fn test_object_shape() {
        let event = LogEvent::new(Level::Error, "disk full".to_string(), CallSite::new("save", "io.rs", 9))
            .with_override(Level::Verbose);
        let out = generate(
            &JsonGenerator::new(),
            &event,
            &[Detail::Override, Detail::Line, Detail::Level, Detail::Message],
        )
        .unwrap();
        assert_eq!(
            out,
            r#"{"override":true,"line":9,"level":"Error","message":"disk full"}"#
        );
    }

    #[test]
    fn test_escaping_parses_back() {
        let message = "say \"hi\"\\ then\nnewline\ttab";
        let event = LogEvent::new(Level::Info, message.to_string(), CallSite::new("f", "x.rs", 1))
            .with_category("a\"b");
        let out = generate(
            &JsonGenerator::new(),
            &event,
            &[Detail::Category, Detail::Message, Detail::Date],
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["message"], message);
        assert_eq!(parsed["category"], "a\"b");
        assert!(parsed["date"].is_string());
    }

    #[test]
    fn test_control_characters_escaped() {
        let event = LogEvent::new(Level::Info, "bell\u{7}nul\u{0}".to_string(), CallSite::new("f", "x.rs", 1));
        let out = generate(&JsonGenerator::new(), &event, &[Detail::Message]).unwrap();
        assert_eq!(out, r#"{"message":"bell\u0007nul\u0000"}"#);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["message"], "bell\u{7}nul\u{0}");
    }

    #[test]
    fn test_numeric_timestamp_is_bare() {
        let event = LogEvent::new(Level::Info, "m".to_string(), CallSite::new("f", "x.rs", 1));
        let generator = JsonGenerator::new().with_timestamp_format(TimestampFormat::UnixMillis);
        let out = generate(&generator, &event, &[Detail::Date]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["date"].as_i64(), Some(event.timestamp.timestamp_millis()));
    }
}
