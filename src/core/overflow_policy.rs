//! What to do with an admitted event when the async queue is full

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Overflow handling for loggers built with
/// [`LoggerBuilder::async_mode`](crate::core::LoggerBuilder::async_mode).
///
/// Every policy counts the full queue in
/// [`LoggerMetrics::queue_full_events`](crate::core::LoggerMetrics::queue_full_events);
/// events that end up discarded also count as dropped (they were already
/// counted as hits).
///
/// ```
/// use rust_category_logger::OverflowPolicy;
/// use std::time::Duration;
///
/// assert_eq!("block".parse::<OverflowPolicy>().unwrap(), OverflowPolicy::Block);
/// assert!(OverflowPolicy::BlockWithTimeout(Duration::from_millis(10)).may_block());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Discard the event; only the metrics notice
    DropNewest,

    /// Wait for the worker to make room. Nothing is lost, callers stall.
    Block,

    /// Wait up to the given time, then discard and alert like `AlertAndDrop`
    BlockWithTimeout(Duration),

    /// Discard the event and report on stderr and through the overflow
    /// callback, on the first drop and every 1000th after that
    #[default]
    AlertAndDrop,
}

impl OverflowPolicy {
    /// Whether a logging call can wait on the worker under this policy
    pub fn may_block(&self) -> bool {
        matches!(self, OverflowPolicy::Block | OverflowPolicy::BlockWithTimeout(_))
    }

    /// Whether drops under this policy are reported
    pub fn alerts(&self) -> bool {
        matches!(self, OverflowPolicy::AlertAndDrop | OverflowPolicy::BlockWithTimeout(_))
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::DropNewest => f.write_str("DropNewest"),
            OverflowPolicy::Block => f.write_str("Block"),
            OverflowPolicy::BlockWithTimeout(timeout) => {
                write!(f, "BlockWithTimeout({}ms)", timeout.as_millis())
            }
            OverflowPolicy::AlertAndDrop => f.write_str("AlertAndDrop"),
        }
    }
}

/// Accepts the variant names case-insensitively, with or without
/// underscores, and `BlockWithTimeout(<n>ms)` as printed by `Display`.
impl FromStr for OverflowPolicy {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "").to_ascii_lowercase();
        let invalid = || LoggerError::config("overflow_policy", format!("unknown policy '{}'", s));

        if let Some(rest) = normalized.strip_prefix("blockwithtimeout(") {
            let millis = rest
                .strip_suffix("ms)")
                .and_then(|n| n.parse::<u64>().ok())
                .ok_or_else(invalid)?;
            return Ok(OverflowPolicy::BlockWithTimeout(Duration::from_millis(millis)));
        }

        match normalized.as_str() {
            "dropnewest" | "drop" => Ok(OverflowPolicy::DropNewest),
            "block" => Ok(OverflowPolicy::Block),
            "alertanddrop" | "alert" => Ok(OverflowPolicy::AlertAndDrop),
            _ => Err(invalid()),
        }
    }
}

/// Receives the total number of dropped events whenever a drop alert fires.
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;
