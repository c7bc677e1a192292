//! Serializable logger settings
//!
//! ```json
//! {
//!   "level": "Debug",
//!   "details": ["date", "level", "message"],
//!   "async_buffer": 4096,
//!   "overflow_policy": "Block"
//! }
//! ```
//!
//! Every field is optional; missing fields keep their defaults.

use super::detail::Detail;
use super::error::{LoggerError, Result};
use super::log_level::Level;
use super::overflow_policy::OverflowPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Queue capacity used when async mode is not given an explicit size
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Global level
    pub level: Level,

    /// Default detail sequence for destinations without their own
    pub details: Vec<Detail>,

    /// Capacity of the async queue; `None` selects synchronous dispatch
    pub async_buffer: Option<usize>,

    pub overflow_policy: OverflowPolicy,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            details: Detail::default_sequence(),
            async_buffer: Some(DEFAULT_QUEUE_CAPACITY),
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("read config", path.display().to_string(), e)
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.async_buffer == Some(0) {
            return Err(LoggerError::config(
                "async_buffer",
                "queue capacity must be greater than zero",
            ));
        }
        Ok(())
    }
}
