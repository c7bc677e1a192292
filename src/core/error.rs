//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A color string that is not six hex digits
    #[error("Invalid color '{input}': expected six hex digits with optional '#'")]
    InvalidColor { input: String },

    /// Destination whose backing resource could not be opened
    #[error("Destination '{name}' is unavailable: {message}")]
    DestinationUnavailable { name: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Channel send error
    #[error("Failed to send log event to async worker")]
    ChannelSendError,

    /// Logger already stopped
    #[error("Logger already stopped")]
    LoggerStopped,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn invalid_color(input: impl Into<String>) -> Self {
        LoggerError::InvalidColor {
            input: input.into(),
        }
    }

    /// Create a destination-unavailable error
    pub fn unavailable(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::DestinationUnavailable {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("FileDestination", "Invalid path");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::unavailable("csv", "Permission denied");
        assert!(matches!(err, LoggerError::DestinationUnavailable { .. }));

        let err = LoggerError::invalid_color("#12");
        assert!(matches!(err, LoggerError::InvalidColor { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::unavailable("json", "Disk full");
        assert_eq!(err.to_string(), "Destination 'json' is unavailable: Disk full");

        let err = LoggerError::invalid_color("zz");
        assert_eq!(
            err.to_string(),
            "Invalid color 'zz': expected six hex digits with optional '#'"
        );

        assert_eq!(LoggerError::LoggerStopped.to_string(), "Logger already stopped");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "cannot create file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
        assert!(err.to_string().contains("cannot create file"));
    }
}
