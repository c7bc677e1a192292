//! Category tags for finer-grained thresholds

use std::fmt;
use std::hash::Hash;

/// A user-defined tag attached to log sites.
///
/// Any hashable, displayable type qualifies; most applications use a small
/// closed enum. The display form is what generators render for
/// [`Detail::Category`](crate::core::Detail::Category).
pub trait Category: Eq + Hash + Clone + fmt::Display + Send + Sync + 'static {}

impl<T> Category for T where T: Eq + Hash + Clone + fmt::Display + Send + Sync + 'static {}

/// Default category type for loggers that don't use categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoCategory {
    Uncategorized,
}

impl fmt::Display for NoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Uncategorized")
    }
}
