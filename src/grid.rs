//! Read-only rectangular sample storage
//!
//! Samples are kept in one flat row-major buffer. Row `y` and column `x`
//! address the sample `value(x, y)`; a cell `(x, y)` spans the samples
//! `(x, y)`, `(x + 1, y)`, `(x + 1, y + 1)` and `(x, y + 1)`.
//!
//! Missing samples are stored as `NaN`. Cells touching one are gaps: they
//! carry no data and are indexed once when the grid is built.

use std::collections::BTreeSet;

use crate::cell::Corners;
use crate::error::{IsobandError, Result};

/// A rectangular grid of scalar samples.
///
/// At 8 bytes per sample a 1799×1059 grid takes ~15 MB, and the grid is
/// never mutated once built, so it can be shared by reference across all
/// bands of a computation (and across threads).
///
/// # Example
///
/// ```
/// use geo_isobands::Grid;
///
/// let grid = Grid::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![3.0, 4.0, 5.0],
/// ]).unwrap();
///
/// assert_eq!(grid.rows(), 2);
/// assert_eq!(grid.cols(), 3);
/// assert_eq!(grid.value(2, 1), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    values: Vec<f64>,
    rows: usize,
    cols: usize,
    gaps: Vec<(usize, usize)>,
}

impl Grid {
    /// Build a grid from rows of samples (`rows[y][x]`).
    ///
    /// Fails if there are no rows, if the rows differ in length, or if the
    /// grid is smaller than 2×2.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let first = rows.first().ok_or(IsobandError::EmptyGrid)?;
        let cols = first.len();

        for (row, samples) in rows.iter().enumerate() {
            if samples.len() != cols {
                return Err(IsobandError::RaggedRow {
                    row,
                    expected: cols,
                    found: samples.len(),
                });
            }
        }

        let row_count = rows.len();
        Self::checked(rows.into_iter().flatten().collect(), row_count, cols)
    }

    /// Build a grid from a flat row-major buffer with `cols` samples per row.
    pub fn from_flat(values: Vec<f64>, cols: usize) -> Result<Self> {
        if values.is_empty() {
            return Err(IsobandError::EmptyGrid);
        }
        if cols == 0 || values.len() % cols != 0 {
            return Err(IsobandError::FlatLengthMismatch {
                len: values.len(),
                cols,
            });
        }
        let rows = values.len() / cols;
        Self::checked(values, rows, cols)
    }

    fn checked(values: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        if rows < 2 || cols < 2 {
            return Err(IsobandError::GridTooSmall { rows, cols });
        }
        let mut grid = Self {
            values,
            rows,
            cols,
            gaps: Vec::new(),
        };
        grid.index_gaps();
        Ok(grid)
    }

    fn index_gaps(&mut self) {
        let (cell_cols, cell_rows) = (self.cols - 1, self.rows - 1);
        let mut gaps = BTreeSet::new();
        for (i, v) in self.values.iter().enumerate() {
            if !v.is_nan() {
                continue;
            }
            let (x, y) = (i % self.cols, i / self.cols);
            for cx in x.saturating_sub(1)..=x.min(cell_cols - 1) {
                for cy in y.saturating_sub(1)..=y.min(cell_rows - 1) {
                    gaps.insert((cx, cy));
                }
            }
        }
        self.gaps = gaps.into_iter().collect();
    }

    /// Replace every sample equal to `sentinel` with `NaN`, marking it missing.
    #[must_use]
    pub fn with_no_data(mut self, sentinel: f64) -> Self {
        for value in &mut self.values {
            if *value == sentinel {
                *value = f64::NAN;
            }
        }
        self.index_gaps();
        self
    }

    /// Number of sample rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of sample columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cell rows (`rows - 1`).
    pub fn cell_rows(&self) -> usize {
        self.rows - 1
    }

    /// Number of cell columns (`cols - 1`).
    pub fn cell_cols(&self) -> usize {
        self.cols - 1
    }

    /// Sample at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    #[inline]
    pub fn value(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.cols && y < self.rows, "sample ({x}, {y}) out of bounds");
        self.values[y * self.cols + x]
    }

    /// Sample at column `x`, row `y`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.cols && y < self.rows).then(|| self.values[y * self.cols + x])
    }

    /// Whether the sample at `(x, y)` is missing.
    pub fn is_missing(&self, x: usize, y: usize) -> bool {
        self.value(x, y).is_nan()
    }

    /// The four corner samples of cell `(x, y)`.
    #[inline]
    pub fn corners(&self, x: usize, y: usize) -> Corners {
        Corners {
            bl: self.value(x, y),
            br: self.value(x + 1, y),
            tr: self.value(x + 1, y + 1),
            tl: self.value(x, y + 1),
        }
    }

    /// Whether all four corners of cell `(x, y)` hold a sample.
    pub fn has_data(&self, x: usize, y: usize) -> bool {
        !self.corners(x, y).has_missing()
    }

    /// Cells touching at least one missing sample, ordered by column then row.
    pub fn gaps(&self) -> &[(usize, usize)] {
        &self.gaps
    }

    /// Smallest and largest non-missing sample, or `None` if all are missing.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter(|v| !v.is_nan())
            .fold(None, |range, &v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

impl TryFrom<Vec<Vec<f64>>> for Grid {
    type Error = IsobandError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}
