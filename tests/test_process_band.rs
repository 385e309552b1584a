use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use geo_isobands::{iso_bands, signed_area2, BandOptions, Grid, IsobandError, Point, Ring};

/// Helper to build a grid from rows, bottom row first
fn grid(rows: Vec<Vec<f64>>) -> Grid {
    Grid::from_rows(rows).unwrap()
}

fn assert_points(ring: &Ring, expected: &[(f64, f64)]) {
    assert_eq!(ring.len(), expected.len(), "ring {ring:?}");
    for (p, &(x, y)) in ring.iter().zip(expected) {
        assert_relative_eq!(p.x(), x, epsilon = 1e-12);
        assert_relative_eq!(p.y(), y, epsilon = 1e-12);
    }
}

#[test]
fn test_uniform_grid_is_one_square() {
    // Grid layout (values):
    //   0  0  0
    //   0  0  0
    //   0  0  0
    //
    // The whole field lies in [-1, 1]
    let g = grid(vec![vec![0.0; 3], vec![0.0; 3], vec![0.0; 3]]);

    let bands = iso_bands(&g, &[-1.0], &[2.0], &BandOptions::default()).unwrap();
    assert_eq!(bands.len(), 1);
    assert_eq!(bands[0].len(), 1, "Expected a single ring covering the grid");
    assert_eq!(
        bands[0][0],
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 0.0)
        ]
    );

    // per-cell output covers the same area with four unit squares
    let options = BandOptions::new().with_polygons(true);
    let bands = iso_bands(&g, &[-1.0], &[2.0], &options).unwrap();
    assert_eq!(bands[0].len(), 4);
    let area: f64 = bands[0].iter().map(|r| signed_area2(r)).sum();
    assert_relative_eq!(area, -8.0);
}

#[test]
fn test_single_corner_above_band() {
    // Grid layout (values):
    //   0  10
    //   0   0
    //
    // Band [4, 6] crosses both sides touching the 10 twice, giving a strip
    // near that corner
    let g = grid(vec![vec![0.0, 0.0], vec![0.0, 10.0]]);

    let options = BandOptions::new().with_polygons(true);
    let bands = iso_bands(&g, &[4.0], &[2.0], &options).unwrap();
    assert_eq!(bands[0].len(), 1);
    assert_points(&bands[0][0], &[(1.0, 0.4), (0.4, 1.0), (0.6, 1.0), (1.0, 0.6)]);

    // the outline closes through the grid rim
    let bands = iso_bands(&g, &[4.0], &[2.0], &BandOptions::default()).unwrap();
    assert_eq!(bands[0].len(), 1);
    assert_points(&bands[0][0], &[(0.6, 1.0), (1.0, 0.6), (1.0, 0.4), (0.4, 1.0)]);
    for p in &bands[0][0] {
        assert!(p.x() >= 0.4 && p.y() >= 0.4, "{p:?} is not near the (1, 1) corner");
    }
}

#[test]
fn test_single_corner_within_band() {
    // Same grid; band [4, 16] holds the 10, leaving a triangle at (1, 1)
    let g = grid(vec![vec![0.0, 0.0], vec![0.0, 10.0]]);

    let options = BandOptions::new().with_polygons(true);
    let bands = iso_bands(&g, &[4.0], &[12.0], &options).unwrap();
    assert_eq!(bands[0].len(), 1);
    assert_points(&bands[0][0], &[(1.0, 0.4), (0.4, 1.0), (1.0, 1.0)]);

    let bands = iso_bands(&g, &[4.0], &[12.0], &BandOptions::default()).unwrap();
    assert_eq!(bands[0].len(), 1);
    assert_points(&bands[0][0], &[(1.0, 0.4), (0.4, 1.0), (1.0, 1.0)]);
    assert!(signed_area2(&bands[0][0]) < 0.0);
}

#[test]
fn test_unequal_lengths_fail_before_computing() {
    let g = grid(vec![vec![0.0, 1.0], vec![2.0, 3.0]]);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let options = BandOptions::new().with_success_callback(move |_, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let err = iso_bands(&g, &[0.0, 1.0, 2.0], &[1.0, 1.0], &options).unwrap_err();
    assert_eq!(
        err,
        IsobandError::LengthMismatch {
            thresholds: 3,
            bandwidths: 2
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_not_a_number_inputs() {
    let g = grid(vec![vec![0.0, 1.0], vec![2.0, 3.0]]);
    let options = BandOptions::default();

    assert_eq!(
        iso_bands(&g, &[0.0, f64::NAN], &[1.0, 1.0], &options).unwrap_err(),
        IsobandError::ThresholdNotANumber { index: 1 }
    );
    assert_eq!(
        iso_bands(&g, &[0.0], &[f64::NAN], &options).unwrap_err(),
        IsobandError::BandwidthNotANumber { index: 0 }
    );
}

fn total_area(rings: &[Ring]) -> f64 {
    rings.iter().map(|r| signed_area2(r)).sum()
}

#[test]
fn test_missing_sample_drops_cells() {
    // 5x5 field of 5.0 with one missing sample in the middle
    let full = grid(vec![vec![5.0; 5]; 5]);
    let mut rows = vec![vec![5.0; 5]; 5];
    rows[2][2] = -9999.0;
    let holed = grid(rows).with_no_data(-9999.0);

    let options = BandOptions::new().with_polygons(true);
    let complete = iso_bands(&full, &[4.0], &[2.0], &options).unwrap();
    let missing = iso_bands(&holed, &[4.0], &[2.0], &options).unwrap();
    assert_eq!(complete[0].len(), 16);
    assert_eq!(missing[0].len(), 12);

    // the outline is the frame with the four skipped cells cut out
    let outline = iso_bands(&holed, &[4.0], &[2.0], &BandOptions::default()).unwrap();
    assert_eq!(outline[0].len(), 2);
    assert_relative_eq!(total_area(&outline[0]), total_area(&missing[0]));
    assert_relative_eq!(total_area(&outline[0]), -24.0);
    assert_eq!(
        outline[0][1],
        vec![
            Point::new(1.0, 1.0),
            Point::new(3.0, 1.0),
            Point::new(3.0, 3.0),
            Point::new(1.0, 3.0)
        ]
    );
}

#[test]
fn test_missing_rim_sample() {
    // Grid layout (values):
    //   5  5  5
    //   5  5  5
    //   -  5  5
    let mut rows = vec![vec![5.0; 3]; 3];
    rows[0][0] = f64::NAN;
    let g = grid(rows);

    let polygons = iso_bands(&g, &[4.0], &[2.0], &BandOptions::new().with_polygons(true)).unwrap();
    assert_eq!(polygons[0].len(), 3);

    let outline = iso_bands(&g, &[4.0], &[2.0], &BandOptions::default()).unwrap();
    assert_eq!(outline[0].len(), 1);
    assert_points(
        &outline[0][0],
        &[(0.0, 1.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (1.0, 0.0), (1.0, 1.0)],
    );
    assert_relative_eq!(total_area(&outline[0]), total_area(&polygons[0]));
}

#[test]
fn test_callback_sees_accumulated_results() {
    let g = grid(vec![
        vec![0.0, 0.0, 0.0],
        vec![0.0, 10.0, 0.0],
        vec![0.0, 0.0, 0.0],
    ]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let options = BandOptions::new().with_success_callback(move |results, lower, width| {
        log.lock().unwrap().push((results.len(), lower, width));
    });

    let bands = iso_bands(&g, &[4.0, 6.0], &[2.0, 1.0], &options).unwrap();
    assert_eq!(bands.len(), 2);
    assert_eq!(*seen.lock().unwrap(), vec![(1, 4.0, 2.0), (2, 6.0, 1.0)]);
}

#[test]
fn test_linear_ring_closes_every_ring() {
    let g = grid(vec![
        vec![0.0, 0.0, 0.0],
        vec![0.0, 10.0, 0.0],
        vec![0.0, 0.0, 0.0],
    ]);

    for polygons in [false, true] {
        let options = BandOptions::new().with_polygons(polygons).with_linear_ring(true);
        let bands = iso_bands(&g, &[4.0], &[2.0], &options).unwrap();
        assert!(!bands[0].is_empty());
        for ring in &bands[0] {
            assert!(ring.len() >= 4);
            assert_eq!(ring.first(), ring.last(), "ring should repeat its first point");
        }
    }
}

#[test]
fn test_peak_outline_and_hole() {
    // Grid layout (values):
    //   0   0   0
    //   0  10   0
    //   0   0   0
    let g = grid(vec![
        vec![0.0, 0.0, 0.0],
        vec![0.0, 10.0, 0.0],
        vec![0.0, 0.0, 0.0],
    ]);

    let bands = iso_bands(&g, &[4.0], &[2.0], &BandOptions::default()).unwrap();
    let rings = &bands[0];
    assert_eq!(rings.len(), 2);

    let outer: Vec<&Ring> = rings.iter().filter(|r| signed_area2(r) < 0.0).collect();
    let holes: Vec<&Ring> = rings.iter().filter(|r| signed_area2(r) > 0.0).collect();
    assert_eq!(outer.len(), 1);
    assert_eq!(holes.len(), 1);

    // diamonds at 0.6 and 0.4 from the peak
    assert_relative_eq!(signed_area2(outer[0]), -2.0 * 0.72, epsilon = 1e-12);
    assert_relative_eq!(signed_area2(holes[0]), 2.0 * 0.32, epsilon = 1e-12);
}

#[test]
fn test_verbose_run_matches_quiet_run() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("geo_isobands=debug")
        .with_test_writer()
        .try_init();

    let g = grid(vec![
        vec![0.0, 0.0, 0.0],
        vec![0.0, 10.0, 0.0],
        vec![0.0, 0.0, 0.0],
    ]);
    let quiet = iso_bands(&g, &[4.0, 6.0], &[2.0, 2.0], &BandOptions::default()).unwrap();
    let verbose = iso_bands(&g, &[4.0, 6.0], &[2.0, 2.0], &BandOptions::new().with_verbose(true)).unwrap();
    assert_eq!(quiet, verbose);
}
