//! # geo-isobands
//!
//! Marching squares isoband extraction for regular 2D scalar fields.
//!
//! An **isoband** is the region of a field whose value lies within
//! `[min, max]`. This crate turns a grid of samples into polygon rings for
//! many bands in one call, reusing a min/max quadtree so that each band
//! only touches the cells that can intersect it.
//!
//! ## Output modes
//!
//! | Mode | Option | Rings |
//! |------|--------|-------|
//! | **Outline** (default) | `polygons = false` | Stitched boundary rings; outer boundaries clockwise, holes counter-clockwise |
//! | **Polygons** | `polygons = true` | One clockwise polygon per cell fragment |
//!
//! Coordinates are in grid space: `x` is the column, `y` the row, and the
//! sample at `(x, y)` sits at point `(x, y)`.
//!
//! ## Example
//!
//! ```rust
//! use geo_isobands::{iso_bands, BandOptions, Grid, QuadTree};
//!
//! let grid = Grid::from_rows(vec![
//!     vec![0.0, 0.0, 0.0],
//!     vec![0.0, 10.0, 0.0],
//!     vec![0.0, 0.0, 0.0],
//! ]).unwrap();
//!
//! // Build the index once, reuse it for every call
//! let tree = QuadTree::new(grid);
//!
//! // Two bands: [4, 6] and [6, 8]
//! let bands = iso_bands(&tree, &[4.0, 6.0], &[2.0, 2.0], &BandOptions::default()).unwrap();
//! assert_eq!(bands.len(), 2);
//!
//! // A ring around the peak, and the hole above 6
//! assert_eq!(bands[0].len(), 2);
//! ```
//!
//! ## Missing data
//!
//! Samples stored as `NaN` (see [`Grid::with_no_data`]) are missing. Any
//! cell touching one is skipped. Outlines run along the edge of such gaps
//! the same way they run along the grid rim, so both output modes cover
//! the same area.
//!
//! ## Threading
//!
//! The computation is synchronous. [`Grid`] and [`QuadTree`] are immutable
//! and `Sync`, so hosts can compute bands in parallel over one shared index.

mod band_tracer;
mod cell;
mod edge;
mod error;
mod grid;
mod interpolate;
mod marching_squares;
mod options;
mod point;
mod quadtree;
mod saddle;
mod shape;

pub use band_tracer::{BandTracer, TraceReport};
pub use cell::{classify, classify_cell, Band, BandCell, CellCode, Corners, Trit};
pub use edge::{Crossing, DirectedEdge, Move, Slot};
pub use error::{IsobandError, Result};
pub use grid::Grid;
pub use interpolate::{InterpolateFn, Interpolation};
pub use marching_squares::{bounds, iso_bands, process_band, Field};
pub use options::{BandOptions, ProgressCallback};
pub use point::{signed_area2, Point, Ring, Side};
pub use quadtree::{CellRef, QuadTree};
pub use saddle::{center_state, Resolution, Saddle};
pub use shape::{geometry, lookup, shapes, CellGeometry, Corner, Entry, OutputMode, Shape, ShapeType, Vertex};
