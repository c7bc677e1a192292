//! File destination implementation
//!
//! A file destination owns one file for its whole lifetime. The file is
//! created (truncating any previous content) on the first write, or up front
//! with [`FileDestination::open`], and framed by its generator:
//!
//! ```text
//! header                      CSV/TSV column names, JSON "[", XML prologue
//! record terminator
//! separator record terminator ...
//! footer                      JSON "]", XML "</log>"; written on close
//! ```

use crate::core::destination::destination_setters;
use crate::core::{
    ColorMap, Decorator, Destination, DestinationConfig, Detail, Generator, Level, LoggerError,
    Result,
};
use crate::generators::{CsvGenerator, JsonGenerator, TsvGenerator, XmlGenerator};
use chrono::Utc;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const ALL_DETAILS: &[Detail] = &Detail::ALL;

struct OpenFile {
    writer: BufWriter<File>,
    separator: String,
    terminator: String,
    footer: Option<String>,
    records: u64,
}

enum State {
    Pending,
    Open(OpenFile),
    /// Opening failed once; events are discarded from now on
    Unavailable,
    Closed,
}

/// Writes rendered records to a file.
///
/// With no generator of its own the destination writes whatever the logger's
/// default generator produces, one record per line. With its own generator
/// (any of the format constructors, or [`with_generator`](Self::with_generator))
/// it also writes that generator's file framing and, unless told otherwise,
/// renders every [`Detail`] so rows line up with the header.
///
/// # Example
///
/// ```no_run
/// use rust_category_logger::prelude::*;
///
/// let logger: Logger = Logger::builder()
///     .destination(FileDestination::csv("logs/app.csv"))
///     .build();
/// logger.info("started");
/// ```
pub struct FileDestination {
    name: String,
    config: DestinationConfig,
    path: PathBuf,
    state: State,
}

impl FileDestination {
    /// Destination for `path`; the file is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            name: "file".to_string(),
            config: DestinationConfig::new(),
            path: path.into(),
            state: State::Pending,
        }
    }

    /// Create the file immediately, reporting failure to the caller instead
    /// of on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut destination = Self::new(path);
        destination.state = State::Open(destination.create()?);
        Ok(destination)
    }

    /// A new file in `directory` named after the current time, with the
    /// generator's extension, e.g. `2025-01-08_10-30-45.123.json`.
    pub fn in_directory<G: Generator + 'static>(directory: impl AsRef<Path>, generator: G) -> Result<Self> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory).map_err(|e| {
            LoggerError::io_operation("create log directory", directory.display().to_string(), e)
        })?;

        let file_name = format!(
            "{}.{}",
            Utc::now().format("%Y-%m-%d_%H-%M-%S%.3f"),
            generator.file_extension()
        );
        Ok(Self::new(directory.join(file_name)).with_generator(generator))
    }

    pub fn csv(path: impl Into<PathBuf>) -> Self {
        Self::new(path).with_generator(CsvGenerator::new())
    }

    pub fn tsv(path: impl Into<PathBuf>) -> Self {
        Self::new(path).with_generator(TsvGenerator::new())
    }

    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self::new(path).with_generator(JsonGenerator::new())
    }

    pub fn xml(path: impl Into<PathBuf>) -> Self {
        Self::new(path).with_generator(XmlGenerator::new())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.state, State::Unavailable)
    }

    /// Records written to the current file
    pub fn records_written(&self) -> u64 {
        match &self.state {
            State::Open(file) => file.records,
            _ => 0,
        }
    }

    fn create(&self) -> Result<OpenFile> {
        let path = self.path.display().to_string();
        let file = File::create(&self.path)
            .map_err(|e| LoggerError::io_operation("create log file", path.clone(), e))?;
        let mut writer = BufWriter::new(file);

        let (separator, terminator, footer) = match self.config.generator.as_deref() {
            Some(generator) => {
                if let Some(header) = generator.file_header(self.details().unwrap_or(ALL_DETAILS)) {
                    writer
                        .write_all(header.as_bytes())
                        .map_err(|e| LoggerError::io_operation("write log header", path, e))?;
                }
                (
                    generator.record_separator().to_string(),
                    generator.record_terminator().to_string(),
                    generator.file_footer(),
                )
            }
            None => (String::new(), "\n".to_string(), None),
        };

        Ok(OpenFile {
            writer,
            separator,
            terminator,
            footer,
            records: 0,
        })
    }

    /// The open file, or `None` once the destination is closed or unavailable.
    fn ensure_open(&mut self) -> Result<Option<&mut OpenFile>> {
        if let State::Pending = self.state {
            match self.create() {
                Ok(file) => self.state = State::Open(file),
                Err(e) => {
                    self.state = State::Unavailable;
                    return Err(LoggerError::unavailable(&self.name, e.to_string()));
                }
            }
        }

        match &mut self.state {
            State::Open(file) => Ok(Some(file)),
            _ => Ok(None),
        }
    }
}

destination_setters!(FileDestination);

impl Destination for FileDestination {
    fn generator(&self) -> Option<&dyn Generator> {
        self.config.generator.as_deref()
    }

    /// Falls back to every detail when the destination has its own generator
    fn details(&self) -> Option<&[Detail]> {
        match (&self.config.details, &self.config.generator) {
            (Some(details), _) => Some(details.as_slice()),
            (None, Some(_)) => Some(ALL_DETAILS),
            (None, None) => None,
        }
    }

    fn color_map(&self) -> Option<&ColorMap> {
        self.config.color_map.as_ref()
    }

    fn decorator(&self) -> Option<&dyn Decorator> {
        self.config.decorator.as_deref()
    }

    fn log_string(&mut self, rendered: &str, level: Level) -> Result<()> {
        let line = self.config.decorate(rendered, level).into_owned();
        let Some(file) = self.ensure_open()? else {
            return Ok(());
        };

        if file.records > 0 {
            file.writer.write_all(file.separator.as_bytes())?;
        }
        file.writer.write_all(line.as_bytes())?;
        file.writer.write_all(file.terminator.as_bytes())?;
        file.records += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let State::Open(file) = &mut self.state {
            file.writer.flush()?;
        }
        Ok(())
    }

    /// Write the footer and release the file. Later events are discarded.
    fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Closed) {
            State::Open(mut file) => {
                if let Some(footer) = file.footer.take() {
                    file.writer.write_all(footer.as_bytes())?;
                }
                file.writer.flush()?;
                Ok(())
            }
            State::Unavailable => {
                self.state = State::Unavailable;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for FileDestination {
    fn drop(&mut self) {
        // Ensure the footer and buffered data reach the disk
        let _ = self.close();
    }
}

impl std::fmt::Debug for FileDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDestination")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
