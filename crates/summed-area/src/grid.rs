//! Dense row-major grid of `f64` samples.
//!
//! Every constructor enforces the rectangular invariant, so accumulators can
//! assume `data.len() == rows * cols` without re-checking each row.

use crate::error::{checked_len, Error, Result};

/// Rectangular, row-major array of samples. Caller-owned; accumulators only read it.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Wrap `data` as a `rows x cols` grid.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if checked_len(rows, cols)? != data.len() {
            return Err(Error::InvalidDimension {
                rows,
                cols,
                reason: "data length does not match rows * cols",
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build a grid from nested rows. Every row must have the length of the first.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(checked_len(rows.len(), cols)?);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(Error::RaggedRow {
                    row,
                    expected: cols,
                    got: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self> {
        Ok(Self {
            data: vec![value; checked_len(rows, cols)?],
            rows,
            cols,
        })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, 0.0)
    }

    /// `n x n` matrix with ones on the diagonal.
    pub fn identity(n: usize) -> Result<Self> {
        Self::from_fn(n, n, |x, y| if x == y { 1.0 } else { 0.0 })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell, row by row.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Result<Self> {
        let mut data = Vec::with_capacity(checked_len(rows, cols)?);
        for x in 0..rows {
            for y in 0..cols {
                data.push(f(x, y));
            }
        }
        Ok(Self { data, rows, cols })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at row `x`, column `y`. Panics when out of bounds.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.rows && y < self.cols, "({x}, {y}) out of bounds");
        self.data[x * self.cols + y]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.rows && y < self.cols).then(|| self.data[x * self.cols + y])
    }

    #[inline]
    pub fn row(&self, x: usize) -> &[f64] {
        &self.data[x * self.cols..(x + 1) * self.cols]
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |x| self.row(x))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// New grid of the same shape with `f` applied to every sample.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: self.data.iter().copied().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Caller guarantees `data.len() == rows * cols`.
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    /// Re-check the rectangular invariant. Accumulators call this at entry.
    pub(crate) fn validate(&self) -> Result<()> {
        if checked_len(self.rows, self.cols)? != self.data.len() {
            return Err(Error::InvalidDimension {
                rows: self.rows,
                cols: self.cols,
                reason: "data length does not match rows * cols",
            });
        }
        Ok(())
    }
}
