//! Destination implementations

pub mod console;
pub mod file;
pub mod memory;

pub use console::ConsoleDestination;
pub use file::FileDestination;
pub use memory::{MemoryBuffer, MemoryDestination};

pub use crate::core::{Destination, DestinationConfig};
