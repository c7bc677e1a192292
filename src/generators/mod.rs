//! Structured generator implementations
//!
//! The plain-text default lives in [`crate::core::TextGenerator`].

pub mod csv;
pub mod json;
pub mod tsv;
pub mod xml;

pub use csv::CsvGenerator;
pub use json::JsonGenerator;
pub use tsv::TsvGenerator;
pub use xml::XmlGenerator;

pub use crate::core::{generate, Generator, TextGenerator};
