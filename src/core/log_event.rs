//! Log event structure

use super::log_level::Level;
use chrono::{DateTime, Utc};
use std::panic::Location;

/// Where a logging call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub function: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    /// Placeholder used when the enclosing function is not known
    pub const UNKNOWN_FUNCTION: &'static str = "<unknown>";

    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            function,
            file,
            line,
        }
    }

    /// Capture the file and line of the calling code.
    ///
    /// Rust has no caller-function intrinsic, so `function` is
    /// [`CallSite::UNKNOWN_FUNCTION`]; the logging macros fill it in.
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            function: Self::UNKNOWN_FUNCTION,
            file: location.file(),
            line: location.line(),
        }
    }

    /// Last path component of `file`
    pub fn file_name(&self) -> &'static str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }
}

/// An admitted logging call, captured once and rendered per destination.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub message: String,
    /// Display form of the call's category, if any
    pub category: Option<String>,
    pub override_level: Option<Level>,
    /// Level implied by the logging method that was called
    pub level: Level,
    /// Captured at admission, not at render time
    pub timestamp: DateTime<Utc>,
    pub site: CallSite,
}

impl LogEvent {
    pub fn new(level: Level, message: String, site: CallSite) -> Self {
        Self {
            message,
            category: None,
            override_level: None,
            level,
            timestamp: Utc::now(),
            site,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_override(mut self, level: Level) -> Self {
        self.override_level = Some(level);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// True when the call carried an override level
    #[inline]
    pub fn is_override(&self) -> bool {
        self.override_level.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_last_component() {
        let site = CallSite::new("run", "src/net/server.rs", 10);
        assert_eq!(site.file_name(), "server.rs");

        let site = CallSite::new("run", "C:\\work\\main.rs", 3);
        assert_eq!(site.file_name(), "main.rs");

        let site = CallSite::new("run", "lib.rs", 1);
        assert_eq!(site.file_name(), "lib.rs");
    }

    #[test]
    fn test_caller_captures_this_file() {
        let site = CallSite::caller();
        assert_eq!(site.file_name(), "log_event.rs");
        assert_eq!(site.function, CallSite::UNKNOWN_FUNCTION);
        assert!(site.line > 0);
    }

    #[test]
    fn test_builder_fields() {
        let event = LogEvent::new(Level::Debug, "hi".to_string(), CallSite::caller())
            .with_category("net")
            .with_override(Level::Verbose);
        assert!(event.is_override());
        assert_eq!(event.category.as_deref(), Some("net"));
        assert_eq!(event.level, Level::Debug);
    }
}
