//! The boundary ring: known samples surrounding a void at one resolution.
//!
//! A ring records the coordinates and values of the known cells that border
//! a void inside its working window. Rings form a resolution pyramid: each
//! [`BoundaryRing::aggregate`] halves the working shape and merges
//! coordinates, until the ring covers the whole shape and the fill becomes
//! a direct scatter of its values.

use hashbrown::{HashMap, HashSet};
use tracing::trace;

use crate::error::{FillError, FillResult};
use crate::types::{Grid, Patch};
use crate::voids::VoidRegion;

/// Known boundary samples around a void at a given resolution level.
///
/// Invariants: coordinates are unique, lie inside the working shape, and
/// pair one-to-one with values. Both constructors enforce this; a ring
/// with zero coordinates cannot be built.
#[derive(Debug, Clone)]
pub struct BoundaryRing {
    cells: Vec<(usize, usize)>,
    values: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl BoundaryRing {
    /// Create a ring from explicit coordinates and values.
    ///
    /// Returns `EmptyBoundary` when `cells` is empty and `InvalidRing` when
    /// the coordinate and value counts differ, a coordinate falls outside
    /// the working shape, or a coordinate repeats.
    pub fn new(
        cells: Vec<(usize, usize)>,
        values: Vec<f64>,
        rows: usize,
        cols: usize,
    ) -> FillResult<Self> {
        if cells.is_empty() {
            return Err(FillError::empty_boundary("boundary ring has no cells"));
        }
        if cells.len() != values.len() {
            return Err(FillError::invalid_ring(format!(
                "{} coordinates but {} values",
                cells.len(),
                values.len()
            )));
        }
        let mut seen = HashSet::with_capacity(cells.len());
        for &(r, c) in &cells {
            if r >= rows || c >= cols {
                return Err(FillError::invalid_ring(format!(
                    "coordinate ({r}, {c}) outside working shape ({rows}, {cols})"
                )));
            }
            if !seen.insert((r, c)) {
                return Err(FillError::invalid_ring(format!(
                    "duplicate coordinate ({r}, {c})"
                )));
            }
        }
        Ok(Self {
            cells,
            values,
            rows,
            cols,
        })
    }

    /// Build the level-0 ring for a labeled void.
    ///
    /// The ring is the one-cell 4-connected dilation of the void footprint
    /// minus the footprint itself: the cells adjacent to, but outside, the
    /// void. Their values come from the source grid. With 4-connected
    /// labeling every such cell carries a known value; a void with no ring
    /// cells at all (the grid is missing everywhere around it) yields an
    /// `EmptyBoundary` error and is reported by the caller.
    pub fn from_region(source: &Grid, region: &VoidRegion) -> FillResult<Self> {
        let (rows, cols) = region.window.shape();
        let fp = |r: usize, c: usize| region.footprint[r * cols + c];

        let mut cells = Vec::new();
        let mut values = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                if fp(r, c) {
                    continue;
                }
                let touches_void = (r > 0 && fp(r - 1, c))
                    || (r + 1 < rows && fp(r + 1, c))
                    || (c > 0 && fp(r, c - 1))
                    || (c + 1 < cols && fp(r, c + 1));
                if !touches_void {
                    continue;
                }
                let value = source.at(region.window.row0 + r, region.window.col0 + c);
                if source.is_nodata(value) {
                    continue;
                }
                cells.push((r, c));
                values.push(value);
            }
        }

        if cells.is_empty() {
            return Err(FillError::empty_boundary(format!(
                "void {} has no known boundary cells",
                region.label
            )));
        }

        trace!(
            label = region.label,
            rows,
            cols,
            ring_cells = cells.len(),
            "extracted boundary ring"
        );

        Ok(Self {
            cells,
            values,
            rows,
            cols,
        })
    }

    /// Number of boundary coordinates in the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the ring has no coordinates. Unreachable through the
    /// public constructors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Working shape as `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The boundary coordinates.
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    /// The known values, parallel to [`cells`](Self::cells).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Produce the next-coarser ring by halving spatial resolution.
    ///
    /// Coordinates are floor-divided by two and the working shape becomes
    /// `ceil(shape / 2)`. Fine coordinates landing in the same coarse cell
    /// merge into the unweighted mean of their values, so the coarse ring
    /// never holds two entries for one coordinate and no fine coordinate
    /// is lost.
    pub fn aggregate(&self) -> BoundaryRing {
        let rows = self.rows.div_ceil(2);
        let cols = self.cols.div_ceil(2);

        // Coarse coordinate -> (running sum, contributor count).
        let mut acc: HashMap<(usize, usize), (f64, u32)> =
            HashMap::with_capacity(self.cells.len());
        for (&(r, c), &v) in self.cells.iter().zip(&self.values) {
            let entry = acc.entry((r / 2, c / 2)).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }

        let mut cells = Vec::with_capacity(acc.len());
        let mut values = Vec::with_capacity(acc.len());
        for (cell, (sum, count)) in acc {
            cells.push(cell);
            values.push(sum / count as f64);
        }

        BoundaryRing {
            cells,
            values,
            rows,
            cols,
        }
    }

    /// True when the ring's coordinates cover every cell of the working
    /// shape, i.e. no interior unknown cells remain at this resolution.
    /// This is the recursion's base-case predicate.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.len() == self.rows * self.cols
    }

    /// Materialize a full ring as a dense patch.
    ///
    /// Valid only when [`is_full`](Self::is_full): every cell is itself a
    /// boundary coordinate, so the patch is a direct scatter of the values.
    /// A ring that is not full here indicates a broken aggregation
    /// invariant and yields a `RingCoverage` error rather than a guessed
    /// interpolation.
    pub fn to_patch(&self) -> FillResult<Patch> {
        if !self.is_full() {
            return Err(FillError::ring_coverage(
                self.rows * self.cols,
                self.cells.len(),
            ));
        }
        let mut patch = Patch::new(self.rows, self.cols);
        for (&(r, c), &v) in self.cells.iter().zip(&self.values) {
            patch.set(r, c, v);
        }
        Ok(patch)
    }

    /// Overwrite the patch with this ring's values at every ring
    /// coordinate, unconditionally.
    ///
    /// Restores known data exactly after zooming, so smoothing never erodes
    /// trustworthy samples. Idempotent.
    ///
    /// # Panics
    /// Panics in debug builds when the patch shape differs from the
    /// working shape.
    pub fn paste_on(&self, patch: &mut Patch) {
        debug_assert_eq!(patch.shape(), self.shape());
        for (&(r, c), &v) in self.cells.iter().zip(&self.values) {
            patch.set(r, c, v);
        }
    }
}
