//! Error types for isoband extraction.
//!
//! Only argument validation produces errors. Per-cell data problems (a
//! missing sample at one corner) are skipped silently by the classifier.

use thiserror::Error;

/// Errors raised while validating the inputs of an isoband computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IsobandError {
    /// The grid has no rows at all.
    #[error("grid is empty")]
    EmptyGrid,

    /// At least 2×2 samples are needed to form a single cell.
    #[error("grid must be at least 2x2 samples, got {rows}x{cols}")]
    GridTooSmall { rows: usize, cols: usize },

    /// A row does not have as many samples as the first row.
    #[error("row {row} has {found} samples, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A flat sample buffer is not a whole number of rows.
    #[error("flat buffer of {len} samples is not divisible into rows of {cols}")]
    FlatLengthMismatch { len: usize, cols: usize },

    #[error("threshold and bandwidth arrays have unequal lengths ({thresholds} vs {bandwidths})")]
    LengthMismatch { thresholds: usize, bandwidths: usize },

    #[error("thresholds[{index}] is not a number")]
    ThresholdNotANumber { index: usize },

    #[error("bandwidths[{index}] is not a number")]
    BandwidthNotANumber { index: usize },
}

/// Result type for isoband operations.
pub type Result<T> = std::result::Result<T, IsobandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IsobandError::LengthMismatch {
            thresholds: 3,
            bandwidths: 2,
        };
        assert_eq!(
            format!("{err}"),
            "threshold and bandwidth arrays have unequal lengths (3 vs 2)"
        );

        let err = IsobandError::ThresholdNotANumber { index: 4 };
        assert!(format!("{err}").contains("thresholds[4]"));

        let err = IsobandError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2,
        };
        assert_eq!(format!("{err}"), "row 1 has 2 samples, expected 3");
    }
}
