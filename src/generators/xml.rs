//! XML records
//!
//! ```text
//! <entry><level>Info</level><message><![CDATA[ready]]></message></entry>
//! ```

use crate::core::{Detail, DetailValue, Generator, LogEvent, TimestampFormat};

#[derive(Debug, Clone, Default)]
pub struct XmlGenerator {
    timestamp_format: TimestampFormat,
}

impl XmlGenerator {
    pub const PROLOGUE: &'static str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\" ?>\n";

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn push_element(out: &mut String, detail: Detail, body: &str) {
        out.push('<');
        out.push_str(detail.name());
        out.push('>');
        out.push_str(body);
        out.push_str("</");
        out.push_str(detail.name());
        out.push('>');
    }

    /// Characters XML 1.0 cannot carry at all become U+FFFD.
    fn legal(c: char) -> char {
        match c {
            '\t' | '\n' | '\r' => c,
            c if c < ' ' => char::REPLACEMENT_CHARACTER,
            '\u{FFFE}' | '\u{FFFF}' => char::REPLACEMENT_CHARACTER,
            c => c,
        }
    }

    /// `]]>` cannot appear inside a CDATA section; split it across two.
    /// A carriage return is written as `&#13;` between sections, since
    /// parsers normalise a raw one to `\n`.
    fn cdata(value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 12);
        out.push_str("<![CDATA[");
        let mut rest = value;
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix("]]>") {
                out.push_str("]]]]><![CDATA[>");
                rest = after;
                continue;
            }
            let mut chars = rest.chars();
            match chars.next().map(Self::legal) {
                Some('\r') => out.push_str("]]>&#13;<![CDATA["),
                Some(c) => out.push(c),
                None => break,
            }
            rest = chars.as_str();
        }
        out.push_str("]]>");
        out
    }

    fn text(value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for c in value.chars().map(Self::legal) {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '\r' => out.push_str("&#13;"),
                c => out.push(c),
            }
        }
        out
    }
}

impl Generator for XmlGenerator {
    fn name(&self) -> &str {
        "xml"
    }

    fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    fn emit_begin(&self, out: &mut String, _event: &LogEvent) {
        out.push_str("<entry>");
    }

    fn emit(&self, out: &mut String, detail: Detail, value: DetailValue<'_>) {
        let body = match value {
            DetailValue::Bool(flag) => flag.to_string(),
            DetailValue::Int(n) => n.to_string(),
            DetailValue::Str { value, escape: true } => Self::cdata(value),
            DetailValue::Str { value, escape: false } => Self::text(value),
            DetailValue::Timestamp(ts) => Self::text(&self.format_timestamp(ts)),
        };
        Self::push_element(out, detail, &body);
    }

    fn emit_delimiter(&self, _out: &mut String) {}

    fn emit_end(&self, out: &mut String) {
        out.push_str("</entry>");
    }

    fn file_header(&self, _details: &[Detail]) -> Option<String> {
        Some(format!("{}<log>\n", Self::PROLOGUE))
    }

    fn file_footer(&self) -> Option<String> {
        Some("</log>\n".to_string())
    }

    fn file_extension(&self) -> &str {
        "xml"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{generate, CallSite, Level};

    #[test]
    fn test_entry_shape() {
        let event = LogEvent::new(Level::Info, "a < b & c".to_string(), CallSite::new("run", "src/x.rs", 12));
        let out = generate(
            &XmlGenerator::new(),
            &event,
            &[Detail::Override, Detail::File, Detail::Line, Detail::Level, Detail::Message],
        )
        .unwrap();
        assert_eq!(
            out,
            "<entry><override>false</override><file><![CDATA[x.rs]]></file><line>12</line>\
             <level>Info</level><message><![CDATA[a < b & c]]></message></entry>"
        );
    }

    #[test]
    fn test_illegal_characters_replaced() {
        let event = LogEvent::new(Level::Info, "ctl\u{1}char\r\n".to_string(), CallSite::new("f", "x.rs", 1))
            .with_category("a\u{1b}b");
        let out = generate(&XmlGenerator::new(), &event, &[Detail::Category, Detail::Message]).unwrap();
        assert_eq!(
            out,
            "<entry><category><![CDATA[a\u{FFFD}b]]></category>\
             <message><![CDATA[ctl\u{FFFD}char]]>&#13;<![CDATA[\n]]></message></entry>"
        );

        let doc = roxmltree::Document::parse(&out).unwrap();
        let message = doc.descendants().find(|n| n.has_tag_name("message")).unwrap();
        let text: String = message.children().filter_map(|n| n.text()).collect();
        assert_eq!(text, "ctl\u{FFFD}char\r\n");
    }

    #[test]
    fn test_cdata_terminator_is_split() {
        let event = LogEvent::new(Level::Info, "x]]>y".to_string(), CallSite::new("f", "x.rs", 1));
        let out = generate(&XmlGenerator::new(), &event, &[Detail::Message]).unwrap();
        assert_eq!(
            out,
            "<entry><message><![CDATA[x]]]]><![CDATA[>y]]></message></entry>"
        );
    }
}
