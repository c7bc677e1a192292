//! Rendering and delivery of admitted events
//!
//! [`Pipeline`] is the state shared between logging sites and the worker
//! thread: the destination list, the default detail sequence and the default
//! generator. Every render and write goes through [`Pipeline::dispatch`],
//! which holds the destination lock for the whole event, so destinations
//! never see interleaved writes and never need their own locking.

use super::destination::Destination;
use super::detail::Detail;
use super::error::{LoggerError, Result};
use super::generator::{generate, Generator};
use super::log_event::LogEvent;
use super::metrics::LoggerMetrics;
use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Upper bound on commands handled between two destination flushes
const BATCH_SIZE: usize = 64;

/// Failures of one destination are reported on the first occurrence and
/// then once per this many.
const REPORT_INTERVAL: u64 = 1000;

pub(crate) enum Command {
    Event(LogEvent),
    /// Flush destinations, then acknowledge
    Flush(Sender<()>),
}

struct Slot {
    destination: Box<dyn Destination>,
    failures: u64,
}

impl Slot {
    fn new(destination: Box<dyn Destination>) -> Self {
        Self {
            destination,
            failures: 0,
        }
    }

    /// Count a failure and tell whether it should be printed
    fn note_failure(&mut self) -> bool {
        self.failures += 1;
        self.failures == 1 || self.failures % REPORT_INTERVAL == 0
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

pub(crate) struct Pipeline {
    destinations: Mutex<Vec<Slot>>,
    /// Mirrors `destinations.len()` so logging sites can skip work without
    /// contending with the worker for the lock
    destination_count: AtomicUsize,
    details: RwLock<Arc<[Detail]>>,
    default_generator: RwLock<Arc<dyn Generator>>,
    pub(crate) metrics: LoggerMetrics,
}

impl Pipeline {
    pub(crate) fn new(details: Vec<Detail>, default_generator: Arc<dyn Generator>) -> Self {
        Self {
            destinations: Mutex::new(Vec::new()),
            destination_count: AtomicUsize::new(0),
            details: RwLock::new(details.into()),
            default_generator: RwLock::new(default_generator),
            metrics: LoggerMetrics::new(),
        }
    }

    #[inline]
    pub(crate) fn destination_count(&self) -> usize {
        self.destination_count.load(Ordering::Acquire)
    }

    pub(crate) fn add_destination(&self, destination: Box<dyn Destination>) {
        let mut slots = self.destinations.lock();
        slots.push(Slot::new(destination));
        self.destination_count.store(slots.len(), Ordering::Release);
    }

    pub(crate) fn remove_destination(&self, name: &str) -> Option<Box<dyn Destination>> {
        let mut slots = self.destinations.lock();
        let idx = slots.iter().position(|s| s.destination.name() == name)?;
        let slot = slots.remove(idx);
        self.destination_count.store(slots.len(), Ordering::Release);
        Some(slot.destination)
    }

    pub(crate) fn replace_destinations(
        &self,
        destinations: Vec<Box<dyn Destination>>,
    ) -> Vec<Box<dyn Destination>> {
        let mut slots = self.destinations.lock();
        let previous = std::mem::replace(
            &mut *slots,
            destinations.into_iter().map(Slot::new).collect(),
        );
        self.destination_count.store(slots.len(), Ordering::Release);
        previous.into_iter().map(|s| s.destination).collect()
    }

    pub(crate) fn destination_names(&self) -> Vec<String> {
        self.destinations
            .lock()
            .iter()
            .map(|s| s.destination.name().to_string())
            .collect()
    }

    pub(crate) fn details(&self) -> Arc<[Detail]> {
        Arc::clone(&self.details.read())
    }

    pub(crate) fn set_details(&self, details: Vec<Detail>) {
        *self.details.write() = details.into();
    }

    pub(crate) fn default_generator(&self) -> Arc<dyn Generator> {
        Arc::clone(&self.default_generator.read())
    }

    pub(crate) fn set_default_generator(&self, generator: Arc<dyn Generator>) {
        *self.default_generator.write() = generator;
    }

    pub(crate) fn handle(&self, command: Command) {
        match command {
            Command::Event(event) => self.dispatch(&event),
            Command::Flush(ack) => {
                // Errors were already reported per destination
                let _ = self.flush_all();
                let _ = ack.send(());
            }
        }
    }

    /// Render `event` for every destination and write it.
    ///
    /// Destinations using both the default generator and the default
    /// details share one rendering. A failing or panicking destination is
    /// reported and skipped; the others still receive the event.
    pub(crate) fn dispatch(&self, event: &LogEvent) {
        let details = self.details();
        let default_generator = self.default_generator();
        let mut shared: Option<Option<String>> = None;

        let mut slots = self.destinations.lock();
        for slot in slots.iter_mut() {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                let destination = &mut slot.destination;
                let owned;
                let rendered = match (destination.generator(), destination.details()) {
                    (None, None) => shared
                        .get_or_insert_with(|| {
                            generate(default_generator.as_ref(), event, &details)
                        })
                        .as_deref(),
                    (generator, own_details) => {
                        owned = generate(
                            generator.unwrap_or(default_generator.as_ref()),
                            event,
                            own_details.unwrap_or(&details),
                        );
                        owned.as_deref()
                    }
                };

                match rendered {
                    Some(line) if !line.is_empty() => destination.log_string(line, event.level),
                    _ => Ok(()),
                }
            }));

            let failure = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => ("ERROR", format!("failed: {}", e)),
                Err(panic_info) => (
                    "CRITICAL",
                    format!(
                        "panicked: {}. Other destinations continue to function.",
                        panic_message(panic_info.as_ref())
                    ),
                ),
            };

            self.metrics.record_failed_write();
            if slot.note_failure() {
                eprintln!(
                    "[LOGGER {}] Destination '{}' {} ({} failure(s) so far)",
                    failure.0,
                    slot.destination.name(),
                    failure.1,
                    slot.failures
                );
            }
        }
    }

    /// Flush every destination, returning the first error after trying all.
    pub(crate) fn flush_all(&self) -> Result<()> {
        self.for_each_isolated("flush", |d| d.flush())
    }

    /// Close every destination, returning the first error after trying all.
    pub(crate) fn close_all(&self) -> Result<()> {
        self.for_each_isolated("close", |d| d.close())
    }

    fn for_each_isolated<F>(&self, operation: &str, mut op: F) -> Result<()>
    where
        F: FnMut(&mut dyn Destination) -> Result<()>,
    {
        let mut first_error = None;
        let mut slots = self.destinations.lock();

        for slot in slots.iter_mut() {
            let outcome = catch_unwind(AssertUnwindSafe(|| op(slot.destination.as_mut())));
            let err = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(panic_info) => LoggerError::other(format!(
                    "destination '{}' panicked during {}: {}",
                    slot.destination.name(),
                    operation,
                    panic_message(panic_info.as_ref())
                )),
            };

            if slot.note_failure() {
                eprintln!(
                    "[LOGGER ERROR] Destination '{}' {} failed: {}",
                    slot.destination.name(),
                    operation,
                    err
                );
            }
            first_error.get_or_insert(err);
        }

        first_error.map_or(Ok(()), Err)
    }
}

/// Start the serial worker that owns all rendering in async mode.
///
/// The worker exits once every sender is dropped and the queue is drained.
pub(crate) fn spawn_worker(
    pipeline: Arc<Pipeline>,
    receiver: Receiver<Command>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("log-dispatch".to_string())
        .spawn(move || {
            while let Ok(command) = receiver.recv() {
                pipeline.handle(command);

                // Drain what is already queued before paying for a flush
                for _ in 1..BATCH_SIZE {
                    match receiver.try_recv() {
                        Ok(command) => pipeline.handle(command),
                        Err(_) => break,
                    }
                }

                let _ = pipeline.flush_all();
            }
        })
}
