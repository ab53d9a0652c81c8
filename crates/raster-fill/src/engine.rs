//! The recursive multi-resolution fill.
//!
//! This is a geometric multigrid-style V-cycle applied to inpainting: the
//! boundary ring is aggregated to ever-coarser levels until it covers its
//! whole working shape, the trivial solve scatters the values, and on the
//! way back up each level zooms, re-asserts its exact known samples, and
//! smooths away the block artifacts of the zoom. Aggregation halves the
//! working shape every level, so the recursion depth is bounded by
//! `log2(max dimension)` and always terminates.

use tracing::{debug, trace};

use crate::error::{FillError, FillResult};
use crate::ring::BoundaryRing;
use crate::types::Patch;

/// Smoothing weights: center, edge-adjacent, and corner taps of the fixed
/// 3x3 kernel `[[1, 2, 1], [2, 4, 2], [1, 2, 1]] / 16`.
const W_CENTER: f64 = 0.25;
const W_EDGE: f64 = 0.125;
const W_CORNER: f64 = 0.0625;

/// Upsample a patch by factor 2 along both axes, cropped to `(rows, cols)`.
///
/// Nearest-neighbor replication: each source cell becomes a 2x2 block of
/// identical values. The doubling may overshoot an odd target dimension by
/// one row or column; the crop trims it, so the result shape is exactly
/// `(rows, cols)`.
pub fn zoom(patch: &Patch, rows: usize, cols: usize) -> Patch {
    debug_assert!(rows.div_ceil(2) <= patch.rows && cols.div_ceil(2) <= patch.cols);
    let mut out = Patch::new(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            out.set(r, c, patch.at(r / 2, c / 2));
        }
    }
    out
}

/// Smooth a patch in place with the fixed 3x3 kernel.
///
/// Border cells clamp their out-of-range taps to the nearest valid cell,
/// so the weights always sum to one and no out-of-bounds access occurs.
pub fn smooth(patch: &mut Patch) {
    let (rows, cols) = patch.shape();
    if rows == 0 || cols == 0 {
        return;
    }
    let src = patch.data.clone();
    let at = |r: usize, c: usize| src[r * cols + c];

    for r in 0..rows {
        let up = r.saturating_sub(1);
        let down = (r + 1).min(rows - 1);
        for c in 0..cols {
            let left = c.saturating_sub(1);
            let right = (c + 1).min(cols - 1);

            let corners = at(up, left) + at(up, right) + at(down, left) + at(down, right);
            let edges = at(up, c) + at(down, c) + at(r, left) + at(r, right);
            patch.set(
                r,
                c,
                W_CORNER * corners + W_EDGE * edges + W_CENTER * at(r, c),
            );
        }
    }
}

/// Fill the region described by a boundary ring, returning the synthesized
/// patch at the ring's working shape.
///
/// The ring's known samples appear verbatim in the result; every other
/// cell holds a value diffused from them through the resolution pyramid.
///
/// Callers must hand in a ring with at least one coordinate — a void with
/// no known boundary is a data precondition violation detected before the
/// recursion, not retried inside it.
pub fn fill(ring: &BoundaryRing) -> FillResult<Patch> {
    if ring.is_empty() {
        return Err(FillError::empty_boundary("boundary ring has no cells"));
    }
    fill_level(ring, 0)
}

fn fill_level(ring: &BoundaryRing, level: usize) -> FillResult<Patch> {
    let aggregated = ring.aggregate();
    let (rows, cols) = aggregated.shape();
    debug!(
        level,
        rows,
        cols,
        coords = aggregated.len(),
        full = aggregated.is_full(),
        "aggregated boundary ring"
    );

    let patch = if aggregated.is_full() {
        aggregated.to_patch()?
    } else {
        fill_level(&aggregated, level + 1)?
    };

    let (rows, cols) = ring.shape();
    let mut patch = zoom(&patch, rows, cols);
    trace!(level, rows, cols, "zoomed");

    ring.paste_on(&mut patch);
    trace!(level, "pasted known boundary values");

    smooth(&mut patch);
    trace!(level, "smoothed");

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Grid;
    use crate::voids::label_voids;

    const NODATA: f64 = -9999.0;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    fn patch_from(rows: usize, cols: usize, data: &[f64]) -> Patch {
        let mut patch = Patch::new(rows, cols);
        patch.data.copy_from_slice(data);
        patch
    }

    #[test]
    fn test_zoom_even_shape() {
        let patch = patch_from(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let zoomed = zoom(&patch, 4, 4);
        assert_eq!(zoomed.shape(), (4, 4));
        assert_eq!(zoomed.at(0, 0), 1.0);
        assert_eq!(zoomed.at(1, 1), 1.0);
        assert_eq!(zoomed.at(0, 2), 2.0);
        assert_eq!(zoomed.at(3, 3), 4.0);
    }

    #[test]
    fn test_zoom_crops_odd_shape() {
        let patch = patch_from(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let zoomed = zoom(&patch, 3, 3);
        assert_eq!(zoomed.shape(), (3, 3));
        assert_eq!(zoomed.at(2, 2), 4.0);
    }

    #[test]
    fn test_zoom_one_by_one() {
        let patch = patch_from(1, 1, &[6.0]);
        let zoomed = zoom(&patch, 1, 1);
        assert_eq!(zoomed.shape(), (1, 1));
        assert_eq!(zoomed.at(0, 0), 6.0);

        let zoomed = zoom(&patch, 2, 2);
        assert!(zoomed.data.iter().all(|&v| v == 6.0));
    }

    #[test]
    fn test_smooth_preserves_constant() {
        let mut patch = patch_from(3, 4, &[5.0; 12]);
        smooth(&mut patch);
        assert!(patch.data.iter().all(|&v| approx_eq(v, 5.0)));
    }

    #[test]
    fn test_smooth_impulse_center_weight() {
        let mut patch = Patch::new(5, 5);
        patch.set(2, 2, 16.0);
        smooth(&mut patch);
        assert!(approx_eq(patch.at(2, 2), 4.0)); // 16 * 4/16
        assert!(approx_eq(patch.at(2, 1), 2.0)); // 16 * 2/16
        assert!(approx_eq(patch.at(1, 1), 1.0)); // 16 * 1/16
        assert!(approx_eq(patch.at(0, 0), 0.0));
    }

    #[test]
    fn test_smooth_single_cell_is_identity() {
        let mut patch = patch_from(1, 1, &[3.5]);
        smooth(&mut patch);
        assert!(approx_eq(patch.at(0, 0), 3.5));
    }

    #[test]
    fn test_fill_rejects_empty_ring() {
        // Bypass the constructors via a whole-nodata grid.
        let grid = Grid::new(3, 3, NODATA);
        let analysis = label_voids(&grid);
        assert!(BoundaryRing::from_region(&grid, &analysis.regions[0]).is_err());
    }

    #[test]
    fn test_fill_uniform_ring_yields_uniform_patch() {
        let mut grid = Grid::from_data(vec![10.0; 25], 5, 5, NODATA).unwrap();
        grid.set(2, 2, NODATA);

        let analysis = label_voids(&grid);
        let ring = BoundaryRing::from_region(&grid, &analysis.regions[0]).unwrap();
        let patch = fill(&ring).unwrap();

        assert_eq!(patch.shape(), (3, 3));
        assert!(patch.data.iter().all(|&v| approx_eq(v, 10.0)));
    }

    #[test]
    fn test_fill_result_is_convex_in_ring_values() {
        // Every synthesis step (mean aggregation, replication, paste,
        // positive unit-sum smoothing) is a convex combination, so the
        // output must stay inside [min, max] of the ring values.
        let grid = Grid::from_data(
            vec![
                1.0, 2.0, 3.0, 4.0, 5.0, //
                2.0, 3.0, 4.0, 5.0, 6.0, //
                3.0, 4.0, NODATA, 6.0, 7.0, //
                4.0, 5.0, 6.0, 7.0, 8.0, //
                5.0, 6.0, 7.0, 8.0, 9.0,
            ],
            5,
            5,
            NODATA,
        )
        .unwrap();

        let analysis = label_voids(&grid);
        let ring = BoundaryRing::from_region(&grid, &analysis.regions[0]).unwrap();
        let lo = ring.values().iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = ring
            .values()
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);

        let patch = fill(&ring).unwrap();
        for &v in &patch.data {
            assert!(v >= lo - 1e-9 && v <= hi + 1e-9, "{v} outside [{lo}, {hi}]");
        }
    }

    #[test]
    fn test_fill_preserves_ring_values_modulo_smoothing() {
        // Paste restores exact values before the final smoothing pass, so
        // ring cells end up as the smoothed neighborhood of exact values.
        // With a uniform ring they stay exact.
        let mut grid = Grid::from_data(vec![42.0; 36], 6, 6, NODATA).unwrap();
        grid.set(2, 2, NODATA);
        grid.set(2, 3, NODATA);

        let analysis = label_voids(&grid);
        let ring = BoundaryRing::from_region(&grid, &analysis.regions[0]).unwrap();
        let patch = fill(&ring).unwrap();
        for &(r, c) in ring.cells() {
            assert!(approx_eq(patch.at(r, c), 42.0));
        }
    }
}
