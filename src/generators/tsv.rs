//! Tab-separated values

use crate::core::{Detail, DetailValue, Generator, TimestampFormat};

/// One TSV row per event; tabs inside values become single spaces.
#[derive(Debug, Clone, Default)]
pub struct TsvGenerator {
    timestamp_format: TimestampFormat,
}

impl TsvGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Generator for TsvGenerator {
    fn name(&self) -> &str {
        "tsv"
    }

    fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    fn emit(&self, out: &mut String, _detail: Detail, value: DetailValue<'_>) {
        match value {
            DetailValue::Bool(flag) => out.push_str(if flag { "true" } else { "false" }),
            DetailValue::Int(n) => out.push_str(&n.to_string()),
            DetailValue::Str { value, escape: true } => out.push_str(&value.replace('\t', " ")),
            DetailValue::Str { value, escape: false } => out.push_str(value),
            DetailValue::Timestamp(ts) => {
                out.push_str(&self.format_timestamp(ts).replace('\t', " "));
            }
        }
    }

    fn emit_delimiter(&self, out: &mut String) {
        out.push('\t');
    }

    fn file_header(&self, details: &[Detail]) -> Option<String> {
        let names: Vec<&str> = details.iter().map(Detail::name).collect();
        Some(format!("{}\n", names.join("\t")))
    }

    fn file_extension(&self) -> &str {
        "tsv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{generate, CallSite, Level, LogEvent};

    #[test]
    fn test_tabs_replaced_no_quoting() {
        let event = LogEvent::new(
            Level::Info,
            "col1\tcol2 \"q\"".to_string(),
            CallSite::new("main", "main.rs", 3),
        );
        let out = generate(
            &TsvGenerator::new(),
            &event,
            &[Detail::Line, Detail::Level, Detail::Message],
        )
        .unwrap();
        assert_eq!(out, "3\tInfo\tcol1 col2 \"q\"");
        assert_eq!(out.split('\t').count(), 3);
    }

    #[test]
    fn test_header() {
        let header = TsvGenerator::new().file_header(&[Detail::File, Detail::Line]).unwrap();
        assert_eq!(header, "file\tline\n");
    }
}
