//! Multi-resolution filling of no-data voids in 2-D rasters.
//!
//! This crate synthesizes plausible values for the no-data regions of a
//! dense grid (for example a surface-elevation raster) from the known
//! samples surrounding them. The goal is a tension-spline-like result
//! without solving a linear system: each void's boundary ring is
//! repeatedly aggregated to half resolution until it covers its whole
//! working shape, then the values are propagated back up — zoom by block
//! replication, paste the exact known samples, smooth — until the original
//! resolution is reconstructed.
//!
//! # Features
//!
//! - **Void detection**: 4-connected component labeling of no-data cells
//! - **Boundary rings**: extraction, aggregation pyramid, materialization
//! - **Recursive fill**: the multigrid-style V-cycle over one void
//! - **Exchange buffer**: per-void parallel driving and footprint-exact
//!   commits into a target grid
//! - **File I/O**: ESRI ASCII grid load and save
//!
//! # Quick Start
//!
//! ```
//! use raster_fill::Grid;
//!
//! // A 6x6 raster of elevation 10.0 with one missing sample.
//! let mut data = vec![10.0; 36];
//! data[2 * 6 + 3] = -9999.0;
//! let grid = Grid::from_data(data, 6, 6, -9999.0).unwrap();
//!
//! let (target, report) = grid.fill_voids().unwrap();
//! assert_eq!(report.voids_filled, 1);
//! assert_eq!(target.get(2, 3), Some(10.0));
//! ```
//!
//! The returned target holds only the synthesized patches; cells outside
//! the voids stay at the sentinel. Seed the target from the source via
//! [`Exchange::with_target`] to produce a complete raster instead:
//!
//! ```
//! use raster_fill::{Exchange, Grid};
//!
//! let mut data = vec![10.0; 36];
//! data[2 * 6 + 3] = -9999.0;
//! let source = Grid::from_data(data, 6, 6, -9999.0).unwrap();
//!
//! let mut exchange = Exchange::with_target(source.clone(), source).unwrap();
//! exchange.run(None).unwrap();
//! assert_eq!(exchange.target().count_nodata(), 0);
//! ```
//!
//! # Error Handling
//!
//! Operations return [`FillResult<T>`], which is `Result<T, FillError>`.
//! Faults come in two families: per-void faults (a void with no known
//! boundary) leave that void at the sentinel and are collected in the
//! [`FillReport`]; geometry faults (mismatched grid shapes) abort the run.
//!
//! ```
//! use raster_fill::{Exchange, Grid};
//!
//! let source = Grid::new(4, 4, -9999.0);
//! let target = Grid::new(4, 5, -9999.0);
//! match Exchange::with_target(source, target) {
//!     Err(e) => assert_eq!(e.code().as_str(), "RASTER-2001"),
//!     Ok(_) => unreachable!(),
//! }
//! ```
//!
//! # Logging
//!
//! The crate emits `tracing` events: run summaries at `info`, skipped
//! voids at `warn`, per-level recursion state at `debug` and per-step
//! synthesis events at `trace`. Install a `tracing-subscriber` in the
//! application to see them; set `RUST_LOG=raster_fill=debug` for the
//! recursion detail and `RUST_LOG=raster_fill::timing=debug` for timing.

mod engine;
mod error;
mod exchange;
mod io;
mod progress;
mod ring;
pub mod tracing_ext;
mod types;
mod voids;

// Re-export core types at crate root
pub use engine::{fill, smooth, zoom};
pub use error::{ErrorCode, FillError, FillResult};
pub use exchange::{Exchange, FillReport, SkippedVoid, fill_voids};
pub use io::{GeoHeader, load_ascii_grid, save_ascii_grid};
pub use progress::{Progress, ProgressCallback, ProgressTracker};
pub use ring::BoundaryRing;
pub use tracing_ext::OperationTimer;
pub use types::{Grid, Patch};
pub use voids::{GridWindow, VoidAnalysis, VoidRegion, label_voids};

// Convenience methods on Grid
impl Grid {
    /// Fill every void in this grid, returning the target grid (patches
    /// only, sentinel elsewhere) and a run report.
    pub fn fill_voids(&self) -> FillResult<(Grid, FillReport)> {
        exchange::fill_voids(self)
    }

    /// Label the 4-connected no-data voids of this grid.
    pub fn label_voids(&self) -> VoidAnalysis {
        voids::label_voids(self)
    }

    /// Load a grid from an ESRI ASCII grid file, discarding the
    /// georeference header. Use [`load_ascii_grid`] to keep it.
    pub fn load(path: impl AsRef<std::path::Path>) -> FillResult<Self> {
        io::load_ascii_grid(path.as_ref()).map(|(grid, _)| grid)
    }

    /// Save this grid as an ESRI ASCII grid file with a default
    /// georeference header. Use [`save_ascii_grid`] to supply one.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> FillResult<()> {
        io::save_ascii_grid(path.as_ref(), self, &GeoHeader::default())
    }
}
