//! End-to-end integration tests for raster-fill.
//!
//! These tests exercise the full pipeline from grid -> label -> fill ->
//! commit (and through file I/O) to ensure all components work together.

use raster_fill::{
    BoundaryRing, Exchange, Grid, ProgressCallback, fill, fill_voids, label_voids,
    load_ascii_grid, save_ascii_grid,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const NODATA: f64 = -9999.0;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-10
}

/// Create a grid where every cell holds `value`.
fn uniform_grid(rows: usize, cols: usize, value: f64) -> Grid {
    Grid::from_data(vec![value; rows * cols], rows, cols, NODATA).unwrap()
}

/// Create a grid with a smooth gradient: cell (r, c) holds r + c.
fn gradient_grid(rows: usize, cols: usize) -> Grid {
    let mut data = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            data.push((r + c) as f64);
        }
    }
    Grid::from_data(data, rows, cols, NODATA).unwrap()
}

#[test]
fn test_fully_known_grid_is_a_noop() {
    let grid = gradient_grid(10, 10);
    let (target, report) = fill_voids(&grid).unwrap();

    assert_eq!(report.voids_found, 0);
    assert_eq!(report.cells_filled, 0);
    // The target was never written: all cells remain at the sentinel.
    assert_eq!(target.count_nodata(), 100);
}

#[test]
fn test_six_by_six_uniform_scenario() {
    // A 2x2 void at rows 2-3, cols 2-3 surrounded by uniform 10.0
    // degenerates to a constant fill.
    let mut grid = uniform_grid(6, 6, 10.0);
    for (r, c) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
        grid.set(r, c, NODATA);
    }

    let (target, report) = fill_voids(&grid).unwrap();
    assert_eq!(report.voids_found, 1);
    assert_eq!(report.voids_filled, 1);
    assert_eq!(report.cells_filled, 4);
    for (r, c) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
        assert!(
            approx_eq(target.at(r, c), 10.0),
            "cell ({r}, {c}) = {}",
            target.at(r, c)
        );
    }
}

#[test]
fn test_single_cell_void_matches_hand_computation() {
    // A single missing sample with a uniform 3x3 known ring around it:
    // aggregation, scatter, zoom, paste and smooth are all convex
    // combinations of the ring values, so the filled value is exactly the
    // ring value when the ring is constant.
    let mut grid = uniform_grid(5, 5, 7.25);
    grid.set(2, 2, NODATA);

    let (target, _) = fill_voids(&grid).unwrap();
    assert!(approx_eq(target.at(2, 2), 7.25));
}

#[test]
fn test_disjoint_voids_fill_independently() {
    let mut both = gradient_grid(12, 12);
    both.set(2, 2, NODATA);
    both.set(8, 9, NODATA);

    let mut first_only = gradient_grid(12, 12);
    first_only.set(2, 2, NODATA);

    let (target_both, report) = fill_voids(&both).unwrap();
    let (target_first, _) = fill_voids(&first_only).unwrap();

    assert_eq!(report.voids_found, 2);
    assert_eq!(report.voids_filled, 2);
    // Filling the second void must not alter the first void's result.
    assert!(approx_eq(target_both.at(2, 2), target_first.at(2, 2)));
}

#[test]
fn test_filled_values_track_local_gradient() {
    let mut grid = gradient_grid(16, 16);
    for (r, c) in [(5, 5), (5, 6), (6, 5), (6, 6)] {
        grid.set(r, c, NODATA);
    }

    let (target, _) = fill_voids(&grid).unwrap();
    for (r, c) in [(5, 5), (5, 6), (6, 5), (6, 6)] {
        let expected = (r + c) as f64;
        let got = target.at(r, c);
        // The fill is an interpolation, not an extrapolation of the exact
        // plane, but it must land close to the local trend.
        assert!(
            (got - expected).abs() < 1.0,
            "cell ({r}, {c}): got {got}, expected about {expected}"
        );
    }
}

#[test]
fn test_commit_never_writes_outside_footprints() {
    let mut grid = gradient_grid(9, 9);
    grid.set(4, 4, NODATA);
    grid.set(4, 5, NODATA);

    let (target, _) = fill_voids(&grid).unwrap();
    let mut written = 0;
    for r in 0..9 {
        for c in 0..9 {
            if !target.is_nodata(target.at(r, c)) {
                written += 1;
                assert!(grid.is_nodata(grid.at(r, c)), "({r}, {c}) was known");
            }
        }
    }
    assert_eq!(written, 2);
}

#[test]
fn test_whole_grid_void_reports_empty_boundary() {
    let source = Grid::new(5, 5, NODATA);
    let (target, report) = fill_voids(&source).unwrap();

    assert_eq!(report.voids_found, 1);
    assert_eq!(report.voids_filled, 0);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].code.as_str(), "RASTER-3001");
    // The unfillable footprint stays at the sentinel.
    assert_eq!(target.count_nodata(), 25);
}

#[test]
fn test_large_void_spanning_many_levels() {
    // A 20x20 void forces several aggregation levels before the base case.
    let mut grid = uniform_grid(32, 32, 3.0);
    for r in 6..26 {
        for c in 6..26 {
            grid.set(r, c, NODATA);
        }
    }

    let (target, report) = fill_voids(&grid).unwrap();
    assert_eq!(report.voids_filled, 1);
    assert_eq!(report.cells_filled, 400);
    for r in 6..26 {
        for c in 6..26 {
            assert!(approx_eq(target.at(r, c), 3.0));
        }
    }
}

#[test]
fn test_progress_observer_counts_voids() {
    let mut grid = uniform_grid(10, 10, 1.0);
    grid.set(1, 1, NODATA);
    grid.set(5, 5, NODATA);
    grid.set(8, 2, NODATA);
    grid.set(8, 8, NODATA);

    let seen_total = Arc::new(AtomicUsize::new(0));
    let calls = Arc::new(AtomicUsize::new(0));
    let seen_clone = seen_total.clone();
    let calls_clone = calls.clone();
    let callback: ProgressCallback = Box::new(move |progress| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        seen_clone.store(progress.total, Ordering::SeqCst);
    });

    let mut exchange = Exchange::new(grid);
    exchange.run(Some(&callback)).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(seen_total.load(Ordering::SeqCst), 4);
}

#[test]
fn test_direct_engine_use_on_labeled_region() {
    // The engine is usable without the exchange for callers that manage
    // their own buffers.
    let mut grid = uniform_grid(7, 7, 2.5);
    grid.set(3, 3, NODATA);

    let analysis = label_voids(&grid);
    assert_eq!(analysis.void_count(), 1);

    let ring = BoundaryRing::from_region(&grid, &analysis.regions[0]).unwrap();
    let patch = fill(&ring).unwrap();
    assert_eq!(patch.shape(), analysis.regions[0].window.shape());
    assert!(patch.data.iter().all(|&v| approx_eq(v, 2.5)));
}

#[test]
fn test_fill_through_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("source.asc");
    let target_path = dir.path().join("out/filled.asc");

    let mut grid = uniform_grid(6, 6, 10.0);
    grid.set(3, 3, NODATA);
    grid.save(&source_path).unwrap();

    let (loaded, header) = load_ascii_grid(&source_path).unwrap();
    let (filled, report) = fill_voids(&loaded).unwrap();
    assert_eq!(report.voids_filled, 1);

    save_ascii_grid(&target_path, &filled, &header).unwrap();
    let reloaded = Grid::load(&target_path).unwrap();
    assert!(approx_eq(reloaded.at(3, 3), 10.0));
    // Cells outside the void footprint were saved at the sentinel.
    assert!(reloaded.is_nodata(reloaded.at(0, 0)));
}
