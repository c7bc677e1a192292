//! Logger metrics for observability
//!
//! Counts admitted (hit) and rejected (miss) logging calls, plus queue and
//! destination failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by every [`Logger`](crate::core::Logger).
///
/// After any sequence of logging calls on a logger with at least one
/// destination, `hits() + misses()` equals the number of calls made
/// (`off` calls are not counted).
///
/// # Example
///
/// ```
/// use rust_category_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_hit();
/// metrics.record_miss();
/// metrics.record_miss();
///
/// assert_eq!(metrics.hits(), 1);
/// assert_eq!(metrics.misses(), 2);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Calls that passed admission
    hits: AtomicU64,

    /// Calls rejected by admission
    misses: AtomicU64,

    /// Admitted events dropped because the async queue was full
    dropped_count: AtomicU64,

    /// Individual destination writes that failed or panicked
    failed_writes: AtomicU64,

    /// Number of times the queue was found full
    queue_full_events: AtomicU64,

    /// Number of times a caller blocked waiting for queue space
    block_events: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
            failed_writes: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    /// Record an admitted call, returning the previous count
    #[inline]
    pub fn record_hit(&self) -> u64 {
        self.hits.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a rejected call, returning the previous count
    #[inline]
    pub fn record_miss(&self) -> u64 {
        self.misses.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed_write(&self) -> u64 {
        self.failed_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of calls that were admitted, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no calls have been counted.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 {
            0.0
        } else {
            (hits / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.dropped_count.store(0, Ordering::Relaxed);
        self.failed_writes.store(0, Ordering::Relaxed);
        self.queue_full_events.store(0, Ordering::Relaxed);
        self.block_events.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            hits: AtomicU64::new(self.hits()),
            misses: AtomicU64::new(self.misses()),
            dropped_count: AtomicU64::new(self.dropped_count()),
            failed_writes: AtomicU64::new(self.failed_writes()),
            queue_full_events: AtomicU64::new(self.queue_full_events()),
            block_events: AtomicU64::new(self.block_events()),
        }
    }
}
