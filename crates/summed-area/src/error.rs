//! Error types for summed-area table construction and queries.

use thiserror::Error;

/// Result type alias using this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition violations reported before any accumulation starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Shape cannot be represented, or data length disagrees with it.
    #[error("invalid dimensions {rows}x{cols}: {reason}")]
    InvalidDimension {
        rows: usize,
        cols: usize,
        reason: &'static str,
    },

    /// Input rows of differing lengths.
    #[error("row {row} has {got} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Output table shape differs from the input grid.
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// Region query outside the table, or with inverted corners.
    #[error("region ({top}, {left})..=({bottom}, {right}) out of range for {rows}x{cols} table")]
    OutOfRange {
        top: usize,
        left: usize,
        bottom: usize,
        right: usize,
        rows: usize,
        cols: usize,
    },
}

/// `rows * cols`, or [`Error::InvalidDimension`] when it overflows.
pub(crate) fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(Error::InvalidDimension {
        rows,
        cols,
        reason: "element count overflows usize",
    })
}
