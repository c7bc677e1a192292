//! Timestamp formatting for the `Date` detail
//!
//! Generators hold a [`TimestampFormat`] and use it for every
//! [`Detail::Date`](crate::core::Detail::Date) they emit.

use super::error::LoggerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_category_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Human-readable with milliseconds and offset: `2025-01-08 10:30:45.123 +0000`
    ///
    /// The default for every built-in generator.
    #[default]
    Standard,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// ```
    /// use rust_category_logger::core::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// strftime template behind [`TimestampFormat::Standard`]
    pub const STANDARD_TEMPLATE: &'static str = "%Y-%m-%d %H:%M:%S%.3f %z";

    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Standard => datetime.format(Self::STANDARD_TEMPLATE).to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}

/// Parses the variant names case-insensitively; anything containing a `%`
/// is taken as a custom strftime template.
impl FromStr for TimestampFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('%') {
            return Ok(TimestampFormat::Custom(s.to_string()));
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(TimestampFormat::Standard),
            "iso8601" => Ok(TimestampFormat::Iso8601),
            "iso8601micros" => Ok(TimestampFormat::Iso8601Micros),
            "rfc3339" => Ok(TimestampFormat::Rfc3339),
            "unix" => Ok(TimestampFormat::Unix),
            "unixmillis" => Ok(TimestampFormat::UnixMillis),
            other => Err(LoggerError::config(
                "timestamp_format",
                format!("unknown timestamp format '{}'", other),
            )),
        }
    }
}
