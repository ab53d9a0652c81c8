//! The exchange buffer: owns the source and target grids and drives one
//! fill run end to end.
//!
//! For every labeled void the exchange extracts the level-0 boundary ring,
//! runs the recursive fill, and copies the synthesized values into the
//! target grid at exactly the void's footprint cells. Per-void work is
//! independent — each unit reads only the immutable source and writes a
//! disjoint footprint — so the voids are filled on a rayon worker pool and
//! committed sequentially afterwards.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::engine;
use crate::error::{ErrorCode, FillError, FillResult};
use crate::progress::{ProgressCallback, ProgressTracker};
use crate::ring::BoundaryRing;
use crate::tracing_ext::OperationTimer;
use crate::types::{Grid, Patch};
use crate::voids::{VoidAnalysis, VoidRegion, label_voids};

/// A void left unfilled by a per-void fault.
#[derive(Debug, Clone)]
pub struct SkippedVoid {
    /// Label of the affected void.
    pub label: u32,

    /// Number of footprint cells left at the sentinel.
    pub cells: usize,

    /// Machine-readable code of the fault.
    pub code: ErrorCode,

    /// Human-readable description of the fault.
    pub reason: String,
}

/// Summary of one fill run.
#[derive(Debug, Clone)]
pub struct FillReport {
    /// Number of voids detected in the source grid.
    pub voids_found: usize,

    /// Number of voids successfully filled.
    pub voids_filled: usize,

    /// Number of target cells written.
    pub cells_filled: usize,

    /// Voids left at the sentinel, with the fault that caused each skip.
    pub skipped: Vec<SkippedVoid>,
}

impl FillReport {
    /// True when every detected void was filled.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl std::fmt::Display for FillReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Fill Report:")?;
        writeln!(f, "  Voids found: {}", self.voids_found)?;
        writeln!(f, "  Voids filled: {}", self.voids_filled)?;
        writeln!(f, "  Cells filled: {}", self.cells_filled)?;
        if !self.skipped.is_empty() {
            writeln!(f, "  Skipped voids:")?;
            for skip in &self.skipped {
                writeln!(
                    f,
                    "    void {} ({} cells): {} {}",
                    skip.label, skip.cells, skip.code, skip.reason
                )?;
            }
        }
        Ok(())
    }
}

/// Owns the read-only source grid and the mutable target grid for the
/// duration of one fill run.
#[derive(Debug)]
pub struct Exchange {
    source: Grid,
    target: Grid,
}

impl Exchange {
    /// Create an exchange whose target starts out entirely at the
    /// sentinel. After a run the target holds only the synthesized fill
    /// patches; cells outside all void footprints stay at the sentinel.
    pub fn new(source: Grid) -> Self {
        let target = Grid::new(source.rows, source.cols, source.nodata);
        Self { source, target }
    }

    /// Create an exchange with a caller-seeded target (for example a copy
    /// of the source, so the run produces a complete raster).
    ///
    /// Returns a `ShapeMismatch` error when the grids disagree in shape.
    pub fn with_target(source: Grid, target: Grid) -> FillResult<Self> {
        if source.shape() != target.shape() {
            return Err(FillError::shape_mismatch(
                "target grid",
                source.shape(),
                target.shape(),
            ));
        }
        Ok(Self { source, target })
    }

    /// The source grid.
    pub fn source(&self) -> &Grid {
        &self.source
    }

    /// The target grid.
    pub fn target(&self) -> &Grid {
        &self.target
    }

    /// Consume the exchange, yielding the target grid.
    pub fn into_target(self) -> Grid {
        self.target
    }

    /// Fill every void in the source, writing results into the target.
    ///
    /// Voids are processed concurrently; the optional observer is invoked
    /// once per void as it completes. Per-void faults leave that void at
    /// the sentinel and are collected in the report; geometry faults abort
    /// the run.
    pub fn run(&mut self, progress: Option<&ProgressCallback>) -> FillResult<FillReport> {
        let _timer = OperationTimer::with_context("fill_voids", self.source.rows, self.source.cols);

        let analysis = label_voids(&self.source);
        if analysis.is_empty() {
            info!("no voids to fill");
            return Ok(FillReport {
                voids_found: 0,
                voids_filled: 0,
                cells_filled: 0,
                skipped: Vec::new(),
            });
        }

        self.check_windows(&analysis)?;

        // Fill voids on the worker pool. Each unit reads the shared source
        // only; results are committed sequentially below.
        let source = &self.source;
        let tracker = ProgressTracker::new(analysis.void_count());
        let outcomes: Vec<FillResult<Patch>> = analysis
            .regions
            .par_iter()
            .map(|region| {
                let outcome = BoundaryRing::from_region(source, region)
                    .and_then(|ring| engine::fill(&ring));
                tracker.increment();
                if let Some(callback) = progress {
                    callback(&tracker.snapshot("filling voids"));
                }
                outcome
            })
            .collect();

        // Commit: write each filled patch at exactly the footprint cells.
        let mut cells_filled = 0usize;
        let mut skipped = Vec::new();
        for (region, outcome) in analysis.regions.iter().zip(outcomes) {
            match outcome {
                Ok(patch) => {
                    self.commit(region, &patch);
                    cells_filled += region.cells;
                }
                Err(err) if err.is_per_void() => {
                    warn!(
                        label = region.label,
                        code = %err.code(),
                        "void left unfilled: {err}"
                    );
                    skipped.push(SkippedVoid {
                        label: region.label,
                        cells: region.cells,
                        code: err.code(),
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        let report = FillReport {
            voids_found: analysis.void_count(),
            voids_filled: analysis.void_count() - skipped.len(),
            cells_filled,
            skipped,
        };
        info!(
            voids = report.voids_found,
            filled = report.voids_filled,
            cells = report.cells_filled,
            "fill run complete"
        );
        Ok(report)
    }

    /// Verify every void window lies inside the grid. Windows are derived
    /// from the grid so a violation means corrupt labeling state, which is
    /// fatal for the whole run.
    fn check_windows(&self, analysis: &VoidAnalysis) -> FillResult<()> {
        for region in &analysis.regions {
            if !region.window.fits(self.source.rows, self.source.cols) {
                return Err(FillError::WindowOutOfBounds {
                    label: region.label,
                    row0: region.window.row0,
                    col0: region.window.col0,
                    rows: region.window.rows,
                    cols: region.window.cols,
                    shape: self.source.shape(),
                });
            }
        }
        Ok(())
    }

    /// Copy the patch into the target at the void's footprint cells only.
    /// Cells outside the footprint are never touched, even though the
    /// patch covers the whole window.
    fn commit(&mut self, region: &VoidRegion, patch: &Patch) {
        let window = &region.window;
        for r in 0..window.rows {
            for c in 0..window.cols {
                if region.footprint[r * window.cols + c] {
                    self.target
                        .set(window.row0 + r, window.col0 + c, patch.at(r, c));
                }
            }
        }
    }
}

/// Fill every void of a grid, returning the target grid and a report.
///
/// Convenience wrapper around [`Exchange`] for callers that do not need a
/// seeded target or progress reporting.
pub fn fill_voids(source: &Grid) -> FillResult<(Grid, FillReport)> {
    let mut exchange = Exchange::new(source.clone());
    let report = exchange.run(None)?;
    Ok((exchange.into_target(), report))
}
