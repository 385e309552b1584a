//! Band driver: validation, cell selection and per-band assembly.

use std::time::Instant;

use tracing::{debug, info};

use crate::band_tracer::BandTracer;
use crate::cell::{classify_cell, Band};
use crate::error::{IsobandError, Result};
use crate::grid::Grid;
use crate::options::BandOptions;
use crate::point::{Point, Ring};
use crate::quadtree::{CellIndex, CellRef, QuadTree};
use crate::shape::{geometry, OutputMode};

/// Input field of an isoband computation: a bare grid, or a grid with a
/// prebuilt quadtree that can be reused across calls.
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    Grid(&'a Grid),
    Indexed(&'a QuadTree),
}

impl<'a> Field<'a> {
    pub fn grid(&self) -> &'a Grid {
        match *self {
            Field::Grid(grid) => grid,
            Field::Indexed(tree) => tree.grid(),
        }
    }
}

impl<'a> From<&'a Grid> for Field<'a> {
    fn from(grid: &'a Grid) -> Self {
        Field::Grid(grid)
    }
}

impl<'a> From<&'a QuadTree> for Field<'a> {
    fn from(tree: &'a QuadTree) -> Self {
        Field::Indexed(tree)
    }
}

/// Compute isobands for every `(thresholds[i], bandwidths[i])` pair.
///
/// Band `i` covers `[thresholds[i], thresholds[i] + bandwidths[i]]`, both
/// limits inclusive. Element `i` of the result holds that band's rings: one
/// polygon per active cell with `options.polygons`, stitched outline rings
/// otherwise. Coordinates are in grid space, `x` along columns and `y`
/// along rows.
///
/// All arguments are validated before any band is computed.
///
/// # Example
///
/// ```
/// use geo_isobands::{iso_bands, BandOptions, Grid};
///
/// let grid = Grid::from_rows(vec![
///     vec![0.0, 0.0, 0.0],
///     vec![0.0, 0.0, 0.0],
///     vec![0.0, 0.0, 0.0],
/// ]).unwrap();
///
/// let bands = iso_bands(&grid, &[-1.0], &[2.0], &BandOptions::default()).unwrap();
/// assert_eq!(bands.len(), 1);
/// assert_eq!(bands[0].len(), 1); // the whole grid
/// ```
pub fn iso_bands<'a>(
    field: impl Into<Field<'a>>,
    thresholds: &[f64],
    bandwidths: &[f64],
    options: &BandOptions,
) -> Result<Vec<Vec<Ring>>> {
    validate(thresholds, bandwidths)?;

    let field = field.into();
    let grid = field.grid();

    let built;
    let index = if options.no_quad_tree {
        None
    } else {
        match field {
            Field::Indexed(tree) => Some(tree.index()),
            Field::Grid(grid) => {
                built = CellIndex::build(grid);
                Some(&built)
            }
        }
    };

    if options.verbose {
        info!(
            mode = if options.polygons { "polygons" } else { "outline" },
            bands = thresholds.len(),
            rows = grid.rows(),
            cols = grid.cols(),
            quad_tree = index.is_some(),
            "computing isobands"
        );
    }

    let mut results: Vec<Vec<Ring>> = Vec::with_capacity(thresholds.len());
    for (&threshold, &bandwidth) in thresholds.iter().zip(bandwidths) {
        let band = Band::from_threshold(threshold, bandwidth);
        if options.verbose {
            info!("computing isoband [{}:{}]", band.min, band.max);
        }

        results.push(band_rings(grid, index, band, options));

        if let Some(callback) = &options.success_callback {
            callback(results.as_slice(), threshold, bandwidth);
        }
    }

    Ok(results)
}

/// Compute the rings of a single band.
///
/// A bare grid is scanned cell by cell; a [`QuadTree`] field is queried
/// unless `options.no_quad_tree` is set.
pub fn process_band<'a>(field: impl Into<Field<'a>>, band: Band, options: &BandOptions) -> Vec<Ring> {
    let field = field.into();
    let index = match field {
        Field::Indexed(tree) if !options.no_quad_tree => Some(tree.index()),
        _ => None,
    };
    band_rings(field.grid(), index, band, options)
}

fn validate(thresholds: &[f64], bandwidths: &[f64]) -> Result<()> {
    if let Some(index) = thresholds.iter().position(|t| t.is_nan()) {
        return Err(IsobandError::ThresholdNotANumber { index });
    }
    if thresholds.len() != bandwidths.len() {
        return Err(IsobandError::LengthMismatch {
            thresholds: thresholds.len(),
            bandwidths: bandwidths.len(),
        });
    }
    if let Some(index) = bandwidths.iter().position(|b| b.is_nan()) {
        return Err(IsobandError::BandwidthNotANumber { index });
    }
    Ok(())
}

/// Every cell of the grid, column by column.
fn all_cells(grid: &Grid) -> Vec<CellRef> {
    (0..grid.cell_cols())
        .flat_map(|x| (0..grid.cell_rows()).map(move |y| CellRef { x, y }))
        .collect()
}

fn band_rings(grid: &Grid, index: Option<&CellIndex>, band: Band, options: &BandOptions) -> Vec<Ring> {
    let started = Instant::now();

    // cells fully inside the band only matter when emitting their area
    let active = match index {
        Some(index) => index.cells_in_band(band, options.polygons),
        None => all_cells(grid),
    };

    let rings = if options.polygons {
        cell_polygons(grid, &active, band, options)
    } else {
        outline(grid, &active, band, options)
    };

    debug!(
        min = band.min,
        max = band.max,
        active_cells = active.len(),
        rings = rings.len(),
        elapsed = ?started.elapsed(),
        "band done"
    );
    rings
}

fn cell_polygons(grid: &Grid, active: &[CellRef], band: Band, options: &BandOptions) -> Vec<Ring> {
    let mut rings = Vec::new();
    for &CellRef { x, y } in active {
        let Some(cell) = classify_cell(grid, x, y, band) else {
            continue;
        };
        let geometry = geometry(&cell, band, &options.interpolation, OutputMode::POLYGONS);
        for polygon in geometry.polygons {
            let ring = polygon.into_iter().map(|p| p.offset(x, y)).collect();
            rings.push(finish(ring, options.linear_ring));
        }
    }
    rings
}

fn outline(grid: &Grid, active: &[CellRef], band: Band, options: &BandOptions) -> Vec<Ring> {
    let mut tracer = BandTracer::new(grid, band);

    for &CellRef { x, y } in active {
        if let Some(cell) = classify_cell(grid, x, y, band) {
            let geometry = geometry(&cell, band, &options.interpolation, OutputMode::OUTLINE);
            tracer.add_cell(x, y, geometry.edges);
        }
    }

    tracer
        .assemble()
        .into_iter()
        .map(|ring| finish(ring, options.linear_ring))
        .collect()
}

/// Optionally repeat the first point at the end.
fn finish(mut ring: Ring, linear_ring: bool) -> Ring {
    if linear_ring {
        if let Some(&first) = ring.first() {
            ring.push(first);
        }
    }
    ring
}

/// Bounding box of a set of rings as `(lower-left, upper-right)`.
pub fn bounds(rings: &[Ring]) -> Option<(Point, Point)> {
    let mut points = rings.iter().flatten();
    let first = *points.next()?;
    Some(points.fold((first, first), |(lo, hi), p| {
        (
            Point::new(lo.x().min(p.x()), lo.y().min(p.y())),
            Point::new(hi.x().max(p.x()), hi.y().max(p.y())),
        )
    }))
}
