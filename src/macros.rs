//! Logging macros for ergonomic log message formatting.
//!
//! The macros take `format!` arguments, but formatting only happens once the
//! call has been admitted, so a disabled site costs one level comparison.
//! Unlike the logger methods they also record the enclosing function's name.
//!
//! # Examples
//!
//! ```
//! use rust_category_logger::prelude::*;
//! use rust_category_logger::{info, warning};
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Forced through regardless of the configured levels
//! warning!(logger, overriding: Level::Verbose, "tracing request {}", 42);
//! ```
//!
//! Every level macro accepts these forms:
//!
//! ```text
//! info!(logger, "fmt", args...)
//! info!(logger, category: Area::Net, "fmt", args...)
//! info!(logger, overriding: Level::Verbose, "fmt", args...)
//! info!(logger, category: Area::Net, overriding: Level::Verbose, "fmt", args...)
//! ```

/// Name of the enclosing function, without its module path.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = name.strip_suffix("::f").unwrap_or(name);
        let name = name.trim_end_matches("::{{closure}}");
        match name.rfind("::") {
            Some(pos) => &name[pos + 2..],
            None => name,
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __call_site {
    () => {
        $crate::CallSite::new($crate::__function_name!(), ::std::file!(), ::std::line!())
    };
}

/// Log a message at a level chosen at runtime.
///
/// # Examples
///
/// ```
/// # use rust_category_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_category_logger::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, category: $category:expr, overriding: $override:expr, $($arg:tt)+) => {
        $logger.log_internal(
            || ::std::format!($($arg)+),
            ::std::option::Option::Some(&$category),
            ::std::option::Option::Some($override),
            $level,
            $crate::__call_site!(),
        )
    };
    ($logger:expr, $level:expr, category: $category:expr, $($arg:tt)+) => {
        $logger.log_internal(
            || ::std::format!($($arg)+),
            ::std::option::Option::Some(&$category),
            ::std::option::Option::None,
            $level,
            $crate::__call_site!(),
        )
    };
    ($logger:expr, $level:expr, overriding: $override:expr, $($arg:tt)+) => {
        $logger.log_internal(
            || ::std::format!($($arg)+),
            ::std::option::Option::None,
            ::std::option::Option::Some($override),
            $level,
            $crate::__call_site!(),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_internal(
            || ::std::format!($($arg)+),
            ::std::option::Option::None,
            ::std::option::Option::None,
            $level,
            $crate::__call_site!(),
        )
    };
}

/// Log a severe-level message.
///
/// # Examples
///
/// ```
/// # use rust_category_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_category_logger::severe;
/// severe!(logger, "Critical system failure");
/// severe!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! severe {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Severe, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_category_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_category_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_category_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_category_logger::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_category_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_category_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Verbose, $($arg)+)
    };
}
