//! Selectable metadata fields for rendered log lines

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One field a generator may emit for an event.
///
/// Renderings are configured with an ordered `Vec<Detail>`; order is
/// preserved and duplicates are emitted as many times as they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    Override,
    Date,
    File,
    Line,
    Function,
    Category,
    Level,
    Message,
}

impl Detail {
    /// Every detail in declaration order
    pub const ALL: [Detail; 8] = [
        Detail::Override,
        Detail::Date,
        Detail::File,
        Detail::Line,
        Detail::Function,
        Detail::Category,
        Detail::Level,
        Detail::Message,
    ];

    /// Field name used for CSV/TSV headers, JSON keys and XML elements
    pub fn name(&self) -> &'static str {
        match self {
            Detail::Override => "override",
            Detail::Date => "date",
            Detail::File => "file",
            Detail::Line => "line",
            Detail::Function => "function",
            Detail::Category => "category",
            Detail::Level => "level",
            Detail::Message => "message",
        }
    }

    /// The logger's default sequence for plain-text output
    pub fn default_sequence() -> Vec<Detail> {
        vec![
            Detail::Date,
            Detail::File,
            Detail::Line,
            Detail::Function,
            Detail::Category,
            Detail::Level,
            Detail::Message,
        ]
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Detail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Detail::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid detail: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for detail in Detail::ALL {
            assert_eq!(detail.name().parse::<Detail>(), Ok(detail));
        }
        assert_eq!("MESSAGE".parse::<Detail>(), Ok(Detail::Message));
        assert!("thread".parse::<Detail>().is_err());
    }

    #[test]
    fn test_default_sequence_has_no_override() {
        let seq = Detail::default_sequence();
        assert!(!seq.contains(&Detail::Override));
        assert_eq!(seq.last(), Some(&Detail::Message));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&vec![Detail::Date, Detail::Message]).unwrap();
        assert_eq!(json, r#"["date","message"]"#);
    }
}
