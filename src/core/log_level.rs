//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logging threshold and site level.
///
/// Levels are ordered by how terse they are: a site at level `a` is logged
/// under a threshold `b` when `a <= b`. `Off` is the lowest rank and never
/// logs, even when it is the effective threshold of an override.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[repr(u8)]
pub enum Level {
    Off = 0,
    Severe = 1,
    Error = 2,
    Warning = 3,
    #[default]
    Info = 4,
    Debug = 5,
    Verbose = 6,
}

impl Level {
    /// Every level in rank order, `Off` first
    pub const ALL: [Level; 7] = [
        Level::Off,
        Level::Severe,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
        Level::Verbose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Off => "Off",
            Level::Severe => "Severe",
            Level::Error => "Error",
            Level::Warning => "Warning",
            Level::Info => "Info",
            Level::Debug => "Debug",
            Level::Verbose => "Verbose",
        }
    }

    /// Whether a site at `self` passes the threshold `effective`
    #[inline]
    pub fn passes(self, effective: Level) -> bool {
        effective != Level::Off && self <= effective
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" | "NONE" => Ok(Level::Off),
            "SEVERE" | "FATAL" => Ok(Level::Severe),
            "ERROR" => Ok(Level::Error),
            "WARN" | "WARNING" => Ok(Level::Warning),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "VERBOSE" | "TRACE" => Ok(Level::Verbose),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
