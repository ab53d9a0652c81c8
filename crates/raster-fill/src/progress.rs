//! Progress reporting for fill runs.
//!
//! Filling a large raster touches many voids; callers that want feedback
//! register a [`ProgressCallback`] and receive one [`Progress`] snapshot
//! after each void is processed. The callback is fire-and-forget: it is
//! never required for correctness and carries no cancellation semantics.
//!
//! # Example
//!
//! ```ignore
//! use raster_fill::{Exchange, ProgressCallback};
//!
//! let callback: ProgressCallback = Box::new(|progress| {
//!     eprintln!("{}/{} voids", progress.current, progress.total);
//! });
//! exchange.run(Some(&callback))?;
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress information passed to callbacks.
#[derive(Debug, Clone)]
pub struct Progress {
    /// Number of voids processed so far.
    pub current: usize,

    /// Total number of voids in the run.
    pub total: usize,

    /// Human-readable message describing the current operation.
    pub message: String,
}

impl Progress {
    /// Create a new progress report.
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64) / (self.total as f64)
        }
    }

    /// Get progress as a percentage (0 to 100).
    #[inline]
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }

    /// Check if the run is complete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }
}

/// Callback function for progress reporting.
pub type ProgressCallback = Box<dyn Fn(&Progress) + Send + Sync>;

/// A thread-safe counter for per-void progress across the worker pool.
///
/// Uses an atomic so workers can report completion without locks.
#[derive(Debug)]
pub struct ProgressTracker {
    current: AtomicUsize,
    total: usize,
}

impl ProgressTracker {
    /// Create a new progress tracker.
    pub fn new(total: usize) -> Self {
        Self {
            current: AtomicUsize::new(0),
            total,
        }
    }

    /// Record one completed void and return the new count.
    #[inline]
    pub fn increment(&self) -> usize {
        self.current.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Get the current count.
    #[inline]
    pub fn current(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    /// Get the total count.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Create a [`Progress`] snapshot.
    pub fn snapshot(&self, message: impl Into<String>) -> Progress {
        Progress::new(self.current(), self.total, message)
    }
}
