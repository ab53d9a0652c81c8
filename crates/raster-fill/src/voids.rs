//! Connected-component analysis of no-data voids.
//!
//! A void is a 4-connected region of no-data cells in the source grid.
//! Labeling produces one [`VoidRegion`] per component, carrying a working
//! window (the bounding box grown by one cell and clamped to the grid, so a
//! collar of known neighbors is available) and the void's local footprint
//! inside that window.

use tracing::{debug, info};

use crate::types::Grid;

/// A rectangular window into a grid, in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWindow {
    /// First row of the window.
    pub row0: usize,
    /// First column of the window.
    pub col0: usize,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl GridWindow {
    /// Window shape as `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True when the window lies entirely inside a grid of the given shape.
    pub fn fits(&self, grid_rows: usize, grid_cols: usize) -> bool {
        self.row0 + self.rows <= grid_rows && self.col0 + self.cols <= grid_cols
    }
}

/// One connected void: a label, its working window, and its footprint.
#[derive(Debug, Clone)]
pub struct VoidRegion {
    /// Label id, counted from 1 in discovery order.
    pub label: u32,

    /// Bounding box grown by one cell on each side, clamped to the grid.
    pub window: GridWindow,

    /// Row-major mask over the window, `true` at this void's cells.
    pub footprint: Vec<bool>,

    /// Number of cells in the void.
    pub cells: usize,
}

/// Result of void labeling over a grid.
#[derive(Debug, Clone)]
pub struct VoidAnalysis {
    /// The labeled voids, in discovery (row-major) order.
    pub regions: Vec<VoidRegion>,

    /// Total number of no-data cells in the grid.
    pub nodata_cells: usize,
}

impl VoidAnalysis {
    /// Number of voids found.
    pub fn void_count(&self) -> usize {
        self.regions.len()
    }

    /// True when the grid had no no-data cells at all.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Size of the largest void, in cells.
    pub fn largest_void_cells(&self) -> usize {
        self.regions.iter().map(|r| r.cells).max().unwrap_or(0)
    }

    /// Size of the smallest void, in cells.
    pub fn smallest_void_cells(&self) -> usize {
        self.regions.iter().map(|r| r.cells).min().unwrap_or(0)
    }
}

impl std::fmt::Display for VoidAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Void Analysis:")?;
        writeln!(f, "  Voids: {}", self.void_count())?;
        writeln!(f, "  No-data cells: {}", self.nodata_cells)?;
        if !self.is_empty() {
            writeln!(f, "  Largest void: {} cells", self.largest_void_cells())?;
            writeln!(f, "  Smallest void: {} cells", self.smallest_void_cells())?;
        }
        Ok(())
    }
}

/// Label the 4-connected no-data voids of a grid.
///
/// Each component's bounding box is grown by one cell in every direction
/// (clamped to the grid extent) so the boundary-ring extraction always has
/// the collar of known neighbors it needs. An all-known grid yields zero
/// regions and the fill becomes a no-op.
///
/// # Example
/// ```
/// use raster_fill::{Grid, label_voids};
///
/// let mut grid = Grid::new(4, 4, -9999.0);
/// for v in grid.data.iter_mut() {
///     *v = 1.0;
/// }
/// grid.set(1, 1, -9999.0);
/// grid.set(1, 2, -9999.0);
///
/// let analysis = label_voids(&grid);
/// assert_eq!(analysis.void_count(), 1);
/// assert_eq!(analysis.regions[0].cells, 2);
/// ```
pub fn label_voids(grid: &Grid) -> VoidAnalysis {
    let mask = grid.nodata_mask();
    let nodata_cells = mask.iter().filter(|&&m| m).count();

    if nodata_cells == 0 {
        debug!("grid has no no-data cells; nothing to label");
        return VoidAnalysis {
            regions: Vec::new(),
            nodata_cells: 0,
        };
    }

    let (rows, cols) = grid.shape();
    let mut labels = vec![0u32; rows * cols];
    let mut regions = Vec::new();
    let mut next_label = 0u32;

    for start in 0..rows * cols {
        if !mask[start] || labels[start] != 0 {
            continue;
        }

        next_label += 1;
        let label = next_label;

        // Flood fill this component, tracking its bounding box.
        let mut queue = vec![start];
        labels[start] = label;
        let mut cells = 0usize;
        let (mut min_r, mut max_r) = (start / cols, start / cols);
        let (mut min_c, mut max_c) = (start % cols, start % cols);

        while let Some(cell) = queue.pop() {
            cells += 1;
            let (r, c) = (cell / cols, cell % cols);
            min_r = min_r.min(r);
            max_r = max_r.max(r);
            min_c = min_c.min(c);
            max_c = max_c.max(c);

            let mut visit = |nr: usize, nc: usize| {
                let n = nr * cols + nc;
                if mask[n] && labels[n] == 0 {
                    labels[n] = label;
                    queue.push(n);
                }
            };
            if r > 0 {
                visit(r - 1, c);
            }
            if r + 1 < rows {
                visit(r + 1, c);
            }
            if c > 0 {
                visit(r, c - 1);
            }
            if c + 1 < cols {
                visit(r, c + 1);
            }
        }

        // Grow the bounding box by one cell, clamped to the grid.
        let row0 = min_r.saturating_sub(1);
        let col0 = min_c.saturating_sub(1);
        let row1 = (max_r + 1).min(rows - 1);
        let col1 = (max_c + 1).min(cols - 1);
        let window = GridWindow {
            row0,
            col0,
            rows: row1 - row0 + 1,
            cols: col1 - col0 + 1,
        };

        let mut footprint = vec![false; window.rows * window.cols];
        for wr in 0..window.rows {
            for wc in 0..window.cols {
                if labels[(row0 + wr) * cols + (col0 + wc)] == label {
                    footprint[wr * window.cols + wc] = true;
                }
            }
        }

        regions.push(VoidRegion {
            label,
            window,
            footprint,
            cells,
        });
    }

    info!(
        "Found {} void(s) covering {} of {} cells",
        regions.len(),
        nodata_cells,
        rows * cols
    );

    VoidAnalysis {
        regions,
        nodata_cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODATA: f64 = -9999.0;

    fn known_grid(rows: usize, cols: usize, value: f64) -> Grid {
        Grid::from_data(vec![value; rows * cols], rows, cols, NODATA).unwrap()
    }

    #[test]
    fn test_no_voids() {
        let grid = known_grid(5, 5, 1.0);
        let analysis = label_voids(&grid);
        assert!(analysis.is_empty());
        assert_eq!(analysis.nodata_cells, 0);
    }

    #[test]
    fn test_single_cell_void() {
        let mut grid = known_grid(5, 5, 1.0);
        grid.set(2, 2, NODATA);

        let analysis = label_voids(&grid);
        assert_eq!(analysis.void_count(), 1);

        let region = &analysis.regions[0];
        assert_eq!(region.label, 1);
        assert_eq!(region.cells, 1);
        // 1x1 void grows to a 3x3 window around it.
        assert_eq!(region.window, GridWindow { row0: 1, col0: 1, rows: 3, cols: 3 });
        assert_eq!(region.footprint.iter().filter(|&&m| m).count(), 1);
        assert!(region.footprint[1 * 3 + 1]);
    }

    #[test]
    fn test_window_clamped_at_grid_corner() {
        let mut grid = known_grid(4, 4, 1.0);
        grid.set(0, 0, NODATA);

        let analysis = label_voids(&grid);
        let region = &analysis.regions[0];
        // No room to grow above or left of (0, 0).
        assert_eq!(region.window, GridWindow { row0: 0, col0: 0, rows: 2, cols: 2 });
        assert!(region.footprint[0]);
    }

    #[test]
    fn test_diagonal_cells_are_separate_voids() {
        let mut grid = known_grid(4, 4, 1.0);
        grid.set(1, 1, NODATA);
        grid.set(2, 2, NODATA);

        // 4-connectivity: diagonal neighbors do not merge.
        let analysis = label_voids(&grid);
        assert_eq!(analysis.void_count(), 2);
        assert_eq!(analysis.largest_void_cells(), 1);
    }

    #[test]
    fn test_l_shaped_void_is_one_component() {
        let mut grid = known_grid(5, 5, 1.0);
        grid.set(1, 1, NODATA);
        grid.set(2, 1, NODATA);
        grid.set(2, 2, NODATA);

        let analysis = label_voids(&grid);
        assert_eq!(analysis.void_count(), 1);
        assert_eq!(analysis.regions[0].cells, 3);
    }

    #[test]
    fn test_whole_grid_void() {
        let grid = Grid::new(3, 3, NODATA);
        let analysis = label_voids(&grid);
        assert_eq!(analysis.void_count(), 1);
        let region = &analysis.regions[0];
        assert_eq!(region.cells, 9);
        // Window cannot grow past the grid.
        assert_eq!(region.window, GridWindow { row0: 0, col0: 0, rows: 3, cols: 3 });
    }

    #[test]
    fn test_display_summary() {
        let mut grid = known_grid(5, 5, 1.0);
        grid.set(0, 0, NODATA);
        grid.set(3, 3, NODATA);
        grid.set(3, 4, NODATA);

        let analysis = label_voids(&grid);
        let text = format!("{}", analysis);
        assert!(text.contains("Voids: 2"));
        assert!(text.contains("No-data cells: 3"));
        assert!(text.contains("Largest void: 2 cells"));
    }
}
