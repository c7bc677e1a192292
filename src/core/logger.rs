//! Logger implementation
//!
//! A logging call runs in four steps:
//!
//! 1. **Admission** on the caller's thread: compare the call's level with the
//!    effective level (override, else the category's level, else the global
//!    level). Rejected calls only bump the miss counter.
//! 2. **Evaluation**: the message closure runs exactly once, on the caller's
//!    thread, and the timestamp is captured.
//! 3. **Enqueue** of the resulting [`LogEvent`] on the bounded async queue
//!    (or straight to step 4 in synchronous mode).
//! 4. **Delivery** by a single worker: render per destination, then write.

use super::category::{Category, NoCategory};
use super::config::{LoggerConfig, DEFAULT_QUEUE_CAPACITY};
use super::destination::Destination;
use super::detail::Detail;
use super::dispatch::{spawn_worker, Command, Pipeline};
use super::error::{LoggerError, Result};
use super::generator::{Generator, TextGenerator};
use super::log_event::{CallSite, LogEvent};
use super::log_level::Level;
use super::metrics::LoggerMetrics;
use super::overflow_policy::{OverflowCallback, OverflowPolicy};
use crossbeam_channel::{bounded, SendTimeoutError, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default timeout for graceful shutdown (5 seconds)
///
/// Used by [`Drop`] and by [`Logger::flush`] while waiting for the worker.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Dropped events are announced on the first drop and every this many after
const ALERT_INTERVAL: u64 = 1000;

enum Mode {
    Sync,
    Async(Sender<Command>),
    Stopped,
}

/// Generates the four call shapes of every logging level:
/// `x(msg)`, `x_in(category, msg)`, `x_with(|| msg)`, `x_in_with(category, || msg)`.
///
/// The implementing type must provide
/// `fn site<F>(&self, Level, Option<&C>, CallSite, F)`.
macro_rules! level_methods {
    ($($level:ident => $plain:ident, $in_category:ident, $with:ident, $in_category_with:ident;)+) => {
        $(
            #[doc = concat!("Log `message` at [`Level::", stringify!($level), "`].")]
            #[track_caller]
            #[inline]
            pub fn $plain(&self, message: impl Into<String>) {
                self.site(Level::$level, None, CallSite::caller(), move || message.into());
            }

            #[doc = concat!("Log `message` at [`Level::", stringify!($level), "`] under `category`.")]
            #[track_caller]
            #[inline]
            pub fn $in_category(&self, category: C, message: impl Into<String>) {
                self.site(Level::$level, Some(&category), CallSite::caller(), move || message.into());
            }

            /// Deferred form: `message` only runs if the call is admitted.
            #[track_caller]
            #[inline]
            pub fn $with<F: FnOnce() -> String>(&self, message: F) {
                self.site(Level::$level, None, CallSite::caller(), message);
            }

            #[track_caller]
            #[inline]
            pub fn $in_category_with<F: FnOnce() -> String>(&self, category: C, message: F) {
                self.site(Level::$level, Some(&category), CallSite::caller(), message);
            }
        )+

        /// Never logs. Lets a call site be switched off by renaming the
        /// method; no counters are touched and `message` is not evaluated.
        #[inline(always)]
        pub fn off(&self, _message: impl Into<String>) {}

        #[inline(always)]
        pub fn off_in(&self, _category: C, _message: impl Into<String>) {}

        #[inline(always)]
        pub fn off_with<F: FnOnce() -> String>(&self, _message: F) {}

        #[inline(always)]
        pub fn off_in_with<F: FnOnce() -> String>(&self, _category: C, _message: F) {}
    };
}

/// Category-aware logger.
///
/// All configuration can change at runtime through `&self`, so a logger is
/// typically shared as `Arc<Logger<C>>`.
///
/// # Example
///
/// ```
/// use rust_category_logger::prelude::*;
/// use std::fmt;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Area { Net, Db }
///
/// impl fmt::Display for Area {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         fmt::Debug::fmt(self, f)
///     }
/// }
///
/// let memory = MemoryDestination::new();
/// let lines = memory.buffer();
///
/// let logger: Logger<Area> = Logger::builder()
///     .synchronous()
///     .level(Level::Warning)
///     .category_level(Area::Net, Level::Verbose)
///     .details(vec![Detail::Category, Detail::Level, Detail::Message])
///     .destination(memory)
///     .build();
///
/// logger.debug_in(Area::Net, "handshake");
/// logger.debug_in(Area::Db, "query");
///
/// assert_eq!(lines.lines(), vec!["- [Net] Debug: handshake"]);
/// ```
pub struct Logger<C: Category = NoCategory> {
    level: RwLock<Level>,
    category_levels: RwLock<HashMap<C, Level>>,
    pipeline: Arc<Pipeline>,
    mode: RwLock<Mode>,
    worker: Mutex<Option<JoinHandle<()>>>,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
}

impl Logger<NoCategory> {
    /// Asynchronous logger at [`Level::Info`] with no destinations
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Logger that renders and writes on the calling thread
    pub fn synchronous() -> Self {
        Self::builder().synchronous().build()
    }
}

impl Default for Logger<NoCategory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> Logger<C> {
    pub fn builder() -> LoggerBuilder<C> {
        LoggerBuilder::new()
    }

    /// Decide whether a call would be admitted.
    ///
    /// The effective level is `override_level` when present, otherwise the
    /// level set for `category`, otherwise the global level. An effective
    /// level of [`Level::Off`] admits nothing, including under an override.
    pub fn can_log(&self, override_level: Option<Level>, category: Option<&C>, site_level: Level) -> bool {
        let effective = match override_level {
            Some(level) => level,
            None => category
                .and_then(|c| self.category_levels.read().get(c).copied())
                .unwrap_or_else(|| *self.level.read()),
        };
        site_level.passes(effective)
    }

    /// Entry point shared by every logging method and macro.
    ///
    /// `message` runs at most once, and only when the call is admitted.
    /// A site level of [`Level::Off`] never logs.
    pub fn log_internal<F>(
        &self,
        message: F,
        category: Option<&C>,
        override_level: Option<Level>,
        level: Level,
        site: CallSite,
    ) where
        F: FnOnce() -> String,
    {
        if level == Level::Off || self.pipeline.destination_count() == 0 {
            return;
        }

        if !self.can_log(override_level, category, level) {
            self.pipeline.metrics.record_miss();
            return;
        }
        self.pipeline.metrics.record_hit();

        let event = LogEvent {
            category: category.map(|c| c.to_string()),
            override_level,
            ..LogEvent::new(level, message(), site)
        };
        self.send_event(event);
    }

    #[inline]
    fn site<F: FnOnce() -> String>(&self, level: Level, category: Option<&C>, site: CallSite, message: F) {
        self.log_internal(message, category, None, level, site);
    }

    level_methods! {
        Severe => severe, severe_in, severe_with, severe_in_with;
        Error => error, error_in, error_with, error_in_with;
        Warning => warning, warning_in, warning_with, warning_in_with;
        Info => info, info_in, info_with, info_in_with;
        Debug => debug, debug_in, debug_with, debug_in_with;
        Verbose => verbose, verbose_in, verbose_with, verbose_in_with;
    }

    /// Log at a level chosen at runtime
    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.site(level, None, CallSite::caller(), move || message.into());
    }

    /// Calls made through the returned scope bypass the global and category
    /// levels and are admitted against `level` instead.
    ///
    /// ```
    /// use rust_category_logger::prelude::*;
    ///
    /// let memory = MemoryDestination::new();
    /// let lines = memory.buffer();
    /// let logger: Logger = Logger::builder()
    ///     .synchronous()
    ///     .level(Level::Off)
    ///     .details(vec![Detail::Message])
    ///     .destination(memory)
    ///     .build();
    ///
    /// logger.with_override(Level::Verbose).verbose("forced");
    /// logger.verbose("ignored");
    /// assert_eq!(lines.lines(), vec!["*: forced"]);
    /// ```
    pub fn with_override(&self, level: Level) -> OverrideScope<'_, C> {
        OverrideScope { logger: self, level }
    }

    fn send_event(&self, event: LogEvent) {
        let mode = self.mode.read();
        match &*mode {
            Mode::Sync => self.pipeline.dispatch(&event),
            Mode::Async(sender) => match sender.try_send(Command::Event(event)) {
                Ok(()) => {}
                Err(TrySendError::Full(command)) => self.handle_overflow(sender, command),
                Err(TrySendError::Disconnected(_)) => {
                    self.pipeline.metrics.record_dropped();
                }
            },
            Mode::Stopped => {
                self.pipeline.metrics.record_dropped();
            }
        }
    }

    fn handle_overflow(&self, sender: &Sender<Command>, command: Command) {
        let metrics = &self.pipeline.metrics;
        metrics.record_queue_full();
        if self.overflow_policy.may_block() {
            metrics.record_block();
        }

        match &self.overflow_policy {
            OverflowPolicy::DropNewest => {
                metrics.record_dropped();
            }

            OverflowPolicy::Block => {
                if sender.send(command).is_err() {
                    metrics.record_dropped();
                }
            }

            OverflowPolicy::BlockWithTimeout(timeout) => {
                match sender.send_timeout(command, *timeout) {
                    Ok(()) => {}
                    Err(SendTimeoutError::Timeout(_)) => self.alert_and_drop(),
                    Err(SendTimeoutError::Disconnected(_)) => {
                        metrics.record_dropped();
                    }
                }
            }

            OverflowPolicy::AlertAndDrop => self.alert_and_drop(),
        }
    }

    fn alert_and_drop(&self) {
        let dropped = self.pipeline.metrics.record_dropped() + 1;

        if dropped == 1 || dropped % ALERT_INTERVAL == 0 {
            eprintln!(
                "[LOGGER WARNING] Queue full, {} events dropped. \
                 Consider increasing the buffer size or using a blocking overflow policy.",
                dropped
            );

            if let Some(ref callback) = self.on_overflow {
                callback(dropped);
            }
        }
    }

    pub fn level(&self) -> Level {
        *self.level.read()
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    pub fn category_level(&self, category: &C) -> Option<Level> {
        self.category_levels.read().get(category).copied()
    }

    /// Calls under `category` are admitted against `level` instead of the
    /// global level.
    pub fn set_category_level(&self, category: C, level: Level) {
        self.category_levels.write().insert(category, level);
    }

    pub fn remove_category_level(&self, category: &C) -> Option<Level> {
        self.category_levels.write().remove(category)
    }

    pub fn clear_category_levels(&self) {
        self.category_levels.write().clear();
    }

    pub fn details(&self) -> Vec<Detail> {
        self.pipeline.details().to_vec()
    }

    /// Replace the detail sequence used by destinations without their own.
    ///
    /// Events already queued are rendered with whichever sequence is current
    /// when the worker reaches them.
    pub fn set_details(&self, details: Vec<Detail>) {
        self.pipeline.set_details(details);
    }

    pub fn default_generator(&self) -> Arc<dyn Generator> {
        self.pipeline.default_generator()
    }

    pub fn set_default_generator<G: Generator + 'static>(&self, generator: G) {
        self.pipeline.set_default_generator(Arc::new(generator));
    }

    pub fn add_destination(&self, destination: Box<dyn Destination>) {
        self.pipeline.add_destination(destination);
    }

    /// Remove the first destination called `name`
    pub fn remove_destination(&self, name: &str) -> Option<Box<dyn Destination>> {
        self.pipeline.remove_destination(name)
    }

    /// Swap in a new destination list, returning the previous one
    pub fn set_destinations(&self, destinations: Vec<Box<dyn Destination>>) -> Vec<Box<dyn Destination>> {
        self.pipeline.replace_destinations(destinations)
    }

    pub fn clear_destinations(&self) -> Vec<Box<dyn Destination>> {
        self.pipeline.replace_destinations(Vec::new())
    }

    pub fn destination_count(&self) -> usize {
        self.pipeline.destination_count()
    }

    pub fn destination_names(&self) -> Vec<String> {
        self.pipeline.destination_names()
    }

    pub fn is_async(&self) -> bool {
        matches!(*self.mode.read(), Mode::Async(_))
    }

    pub fn is_stopped(&self) -> bool {
        matches!(*self.mode.read(), Mode::Stopped)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.pipeline.metrics
    }

    pub fn hits(&self) -> u64 {
        self.pipeline.metrics.hits()
    }

    pub fn misses(&self) -> u64 {
        self.pipeline.metrics.misses()
    }

    pub fn dropped_count(&self) -> u64 {
        self.pipeline.metrics.dropped_count()
    }

    /// Wait until every event admitted before this call has been written,
    /// then flush all destinations.
    pub fn flush(&self) -> Result<()> {
        let ack = {
            let mode = self.mode.read();
            match &*mode {
                Mode::Sync => return self.pipeline.flush_all(),
                Mode::Stopped => return Err(LoggerError::LoggerStopped),
                Mode::Async(sender) => {
                    let (ack_tx, ack_rx) = bounded(1);
                    sender
                        .send(Command::Flush(ack_tx))
                        .map_err(|_| LoggerError::ChannelSendError)?;
                    ack_rx
                }
            }
        };

        ack.recv_timeout(DEFAULT_SHUTDOWN_TIMEOUT)
            .map_err(|_| LoggerError::other("timed out waiting for the dispatch worker to flush"))
    }

    /// Drain the queue, stop the worker and close every destination.
    ///
    /// Later logging calls are counted as dropped. Returns `false` if the
    /// worker did not finish within `timeout` or a destination failed to
    /// close.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_category_logger::{Logger, DEFAULT_SHUTDOWN_TIMEOUT};
    /// use std::time::Duration;
    ///
    /// let logger = Logger::new();
    /// logger.info("Important message");
    ///
    /// if !logger.shutdown(Duration::from_secs(10)) {
    ///     eprintln!("Warning: Logger shutdown timed out");
    /// }
    /// ```
    pub fn shutdown(&self, timeout: Duration) -> bool {
        let previous = std::mem::replace(&mut *self.mode.write(), Mode::Stopped);
        if matches!(previous, Mode::Stopped) {
            return true;
        }
        // Dropping the sender lets the worker drain the queue and exit
        drop(previous);

        let mut clean = true;
        if let Some(handle) = self.worker.lock().take() {
            let start = Instant::now();
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!("[LOGGER ERROR] Dispatch worker panicked during shutdown: {:?}", e);
                        clean = false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOGGER WARNING] Dispatch worker did not finish within {:?}. \
                         Some events may be lost.",
                        timeout
                    );
                    clean = false;
                    break;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }

        if let Err(e) = self.pipeline.close_all() {
            eprintln!("[LOGGER ERROR] Failed to close destinations during shutdown: {}", e);
            clean = false;
        }

        clean
    }
}

impl<C: Category> Drop for Logger<C> {
    fn drop(&mut self) {
        if self.is_stopped() {
            return;
        }
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.pipeline.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped events",
                dropped
            );
        }
    }
}

/// Logging calls admitted against a fixed override level.
///
/// Returned by [`Logger::with_override`]. Events logged through it carry the
/// override flag, shown by the text format as a leading `*`.
pub struct OverrideScope<'a, C: Category = NoCategory> {
    logger: &'a Logger<C>,
    level: Level,
}

impl<C: Category> OverrideScope<'_, C> {
    pub fn level(&self) -> Level {
        self.level
    }

    #[inline]
    fn site<F: FnOnce() -> String>(&self, level: Level, category: Option<&C>, site: CallSite, message: F) {
        self.logger.log_internal(message, category, Some(self.level), level, site);
    }

    level_methods! {
        Severe => severe, severe_in, severe_with, severe_in_with;
        Error => error, error_in, error_with, error_in_with;
        Warning => warning, warning_in, warning_with, warning_in_with;
        Info => info, info_in, info_with, info_in_with;
        Debug => debug, debug_in, debug_with, debug_in_with;
        Verbose => verbose, verbose_in, verbose_with, verbose_in_with;
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.site(level, None, CallSite::caller(), move || message.into());
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
/// ```
/// use rust_category_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger: Logger = Logger::builder()
///     .level(Level::Debug)
///     .destination(ConsoleDestination::new())
///     .async_mode(1000)
///     .overflow_policy(OverflowPolicy::AlertAndDrop)
///     .on_overflow(Arc::new(|count| {
///         eprintln!("ALERT: {} events dropped", count);
///     }))
///     .build();
/// ```
pub struct LoggerBuilder<C: Category = NoCategory> {
    level: Level,
    category_levels: HashMap<C, Level>,
    details: Vec<Detail>,
    generator: Arc<dyn Generator>,
    destinations: Vec<Box<dyn Destination>>,
    async_buffer: Option<usize>,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
}

impl<C: Category> LoggerBuilder<C> {
    /// Asynchronous, [`Level::Info`], default details, plain text
    pub fn new() -> Self {
        Self {
            level: Level::Info,
            category_levels: HashMap::new(),
            details: Detail::default_sequence(),
            generator: Arc::new(TextGenerator::new()),
            destinations: Vec::new(),
            async_buffer: Some(DEFAULT_QUEUE_CAPACITY),
            overflow_policy: OverflowPolicy::default(),
            on_overflow: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn category_level(mut self, category: C, level: Level) -> Self {
        self.category_levels.insert(category, level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn details(mut self, details: Vec<Detail>) -> Self {
        self.details = details;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn default_generator<G: Generator + 'static>(mut self, generator: G) -> Self {
        self.generator = Arc::new(generator);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn destination<D: Destination + 'static>(mut self, destination: D) -> Self {
        self.destinations.push(Box::new(destination));
        self
    }

    /// Dispatch through a worker thread fed by a queue of `buffer_size` events
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_size: usize) -> Self {
        self.async_buffer = Some(buffer_size);
        self
    }

    /// Render and write on the calling thread
    #[must_use = "builder methods return a new value"]
    pub fn synchronous(mut self) -> Self {
        self.async_buffer = None;
        self
    }

    /// Set the overflow policy for async logging
    ///
    /// Determines what happens when the queue is full.
    /// Default is `AlertAndDrop`.
    ///
    /// ```
    /// use rust_category_logger::prelude::*;
    /// use std::time::Duration;
    ///
    /// let logger: Logger = Logger::builder()
    ///     .async_mode(100)
    ///     .overflow_policy(OverflowPolicy::BlockWithTimeout(Duration::from_millis(50)))
    ///     .build();
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Called with the total drop count whenever a drop alert fires
    #[must_use = "builder methods return a new value"]
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    /// Apply level, details, queue size and overflow policy from `config`
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.level = config.level;
        self.details = config.details;
        self.async_buffer = config.async_buffer;
        self.overflow_policy = config.overflow_policy;
        self
    }

    pub fn build(self) -> Logger<C> {
        let pipeline = Arc::new(Pipeline::new(self.details, self.generator));
        for destination in self.destinations {
            pipeline.add_destination(destination);
        }

        let mut worker = None;
        let mode = match self.async_buffer {
            None => Mode::Sync,
            Some(capacity) => {
                let (sender, receiver) = bounded(capacity.max(1));
                match spawn_worker(Arc::clone(&pipeline), receiver) {
                    Ok(handle) => {
                        worker = Some(handle);
                        Mode::Async(sender)
                    }
                    Err(e) => {
                        eprintln!(
                            "[LOGGER ERROR] Could not start dispatch worker, logging synchronously: {}",
                            e
                        );
                        Mode::Sync
                    }
                }
            }
        };

        Logger {
            level: RwLock::new(self.level),
            category_levels: RwLock::new(self.category_levels),
            pipeline,
            mode: RwLock::new(mode),
            worker: Mutex::new(worker),
            overflow_policy: self.overflow_policy,
            on_overflow: self.on_overflow,
        }
    }
}

impl<C: Category> Default for LoggerBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
