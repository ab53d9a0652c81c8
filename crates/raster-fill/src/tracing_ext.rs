//! Tracing extensions for fill operations.
//!
//! Integrates with the `tracing` ecosystem for structured logging and
//! timing. Enable output by installing a subscriber in the application:
//!
//! ```rust,ignore
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env())
//!     .init();
//!
//! // Set RUST_LOG=raster_fill=debug for per-level recursion output.
//! ```
//!
//! # Log Levels
//!
//! - **WARN**: voids left unfilled and their faults
//! - **INFO**: run summaries and timing
//! - **DEBUG**: per-level aggregation state during the recursion
//! - **TRACE**: per-step synthesis events (zoom, paste, smooth)

use std::time::Instant;
use tracing::{Span, debug, info};

use crate::types::Grid;

/// A performance timer that logs its duration on drop.
///
/// ```rust,ignore
/// use raster_fill::OperationTimer;
///
/// fn expensive_operation() {
///     let _timer = OperationTimer::new("expensive_operation");
///     // ... do work ...
/// } // Timer logs duration when dropped
/// ```
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
    span: Span,
}

impl OperationTimer {
    /// Create a new operation timer.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!("fill_operation", operation = name);
        debug!(target: "raster_fill::timing", operation = name, "Starting operation");
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Create a timer with grid-shape context fields.
    pub fn with_context(name: &'static str, rows: usize, cols: usize) -> Self {
        let span = tracing::info_span!("fill_operation", operation = name, rows, cols);
        debug!(
            target: "raster_fill::timing",
            operation = name,
            rows,
            cols,
            "Starting operation"
        );
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Get the elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Get the span for this timer.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        info!(
            target: "raster_fill::timing",
            operation = self.name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            "Operation completed"
        );
    }
}

/// Log grid statistics at debug level.
pub fn log_grid_stats(grid: &Grid, context: &str) {
    debug!(
        context,
        rows = grid.rows,
        cols = grid.cols,
        nodata = grid.nodata,
        nodata_cells = grid.count_nodata(),
        "grid stats"
    );
}
