//! In-memory destination
//!
//! Keeps rendered lines in a shared buffer so tests and tools can inspect
//! exactly what the logger produced. The destination itself moves into the
//! logger; keep a [`MemoryBuffer`] handle to read the lines back.

use crate::core::destination::{destination_setters, forward_config};
use crate::core::{Destination, DestinationConfig, Level, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Shared view of the lines captured by a [`MemoryDestination`].
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    entries: Arc<Mutex<VecDeque<(Level, String)>>>,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.lock().iter().map(|(_, line)| line.clone()).collect()
    }

    pub fn last_line(&self) -> Option<String> {
        self.entries.lock().back().map(|(_, line)| line.clone())
    }

    pub fn get(&self, index: usize) -> Option<String> {
        self.entries.lock().get(index).map(|(_, line)| line.clone())
    }

    /// Site level of every captured line, oldest first
    pub fn levels(&self) -> Vec<Level> {
        self.entries.lock().iter().map(|(level, _)| *level).collect()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// True if any captured line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.lock().iter().any(|(_, line)| line.contains(needle))
    }

    /// Remove and return every captured line
    pub fn drain(&self) -> Vec<String> {
        self.entries.lock().drain(..).map(|(_, line)| line).collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn push(&self, level: Level, line: String, capacity: Option<usize>) {
        let mut entries = self.entries.lock();
        if let Some(capacity) = capacity {
            while entries.len() >= capacity.max(1) {
                entries.pop_front();
            }
        }
        entries.push_back((level, line));
    }
}

/// Destination that appends every rendered line to a [`MemoryBuffer`].
///
/// ```
/// use rust_category_logger::prelude::*;
///
/// let memory = MemoryDestination::new();
/// let buffer = memory.buffer();
///
/// let logger: Logger = Logger::builder()
///     .synchronous()
///     .details(vec![Detail::Level, Detail::Message])
///     .destination(memory)
///     .build();
/// logger.warning("disk almost full");
///
/// assert_eq!(buffer.last_line().as_deref(), Some("- Warning: disk almost full"));
/// assert_eq!(buffer.levels(), vec![Level::Warning]);
/// ```
pub struct MemoryDestination {
    name: String,
    config: DestinationConfig,
    buffer: MemoryBuffer,
    capacity: Option<usize>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::with_buffer(MemoryBuffer::new())
    }

    /// Write into an existing buffer, e.g. one shared by several destinations
    pub fn with_buffer(buffer: MemoryBuffer) -> Self {
        Self {
            name: "memory".to_string(),
            config: DestinationConfig::new(),
            buffer,
            capacity: None,
        }
    }

    /// Keep only the newest `capacity` lines
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn buffer(&self) -> MemoryBuffer {
        self.buffer.clone()
    }
}

impl Default for MemoryDestination {
    fn default() -> Self {
        Self::new()
    }
}

destination_setters!(MemoryDestination);

impl Destination for MemoryDestination {
    forward_config!();

    fn log_string(&mut self, rendered: &str, level: Level) -> Result<()> {
        let line = self.config.decorate(rendered, level).into_owned();
        self.buffer.push(level, line, self.capacity);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AnsiDecorator, Color, ColorMap, ColorSpec};

    #[test]
    fn test_buffer_accessors() {
        let mut memory = MemoryDestination::new();
        let buffer = memory.buffer();
        memory.log_string("one", Level::Info).unwrap();
        memory.log_string("two", Level::Error).unwrap();

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(0).as_deref(), Some("one"));
        assert_eq!(buffer.last_line().as_deref(), Some("two"));
        assert_eq!(buffer.levels(), vec![Level::Info, Level::Error]);
        assert!(buffer.contains("tw"));

        assert_eq!(buffer.drain(), vec!["one".to_string(), "two".to_string()]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_capacity_keeps_newest() {
        let mut memory = MemoryDestination::new().with_capacity(2);
        let buffer = memory.buffer();
        for line in ["a", "b", "c"] {
            memory.log_string(line, Level::Info).unwrap();
        }
        assert_eq!(buffer.lines(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_decorated_when_configured() {
        let mut colors = ColorMap::new();
        colors.insert(Level::Error, ColorSpec::fg(Color::new(1.0, 0.0, 0.0)));
        let mut memory = MemoryDestination::new()
            .with_color_map(colors)
            .with_decorator(AnsiDecorator);
        let buffer = memory.buffer();

        memory.log_string("bad", Level::Error).unwrap();
        memory.log_string("fine", Level::Info).unwrap();

        assert_eq!(
            buffer.lines(),
            vec!["\x1b[38;2;255;0;0m\x1b[49mbad\x1b[0m".to_string(), "fine".to_string()]
        );
    }
}
