//! Summed-area table output type.
//!
//! A table is a strided view over an owned buffer. Compact tables start at
//! offset 0 with stride `cols`. Padded tables keep their sentinel row and
//! column in the buffer and expose only the sub-view starting at `(1, 1)`.

use crate::error::{checked_len, Error, Result};
use crate::grid::Grid;

/// `table[x][y]` holds the sum of every input sample at row <= x, column <= y.
#[derive(Clone, Debug)]
pub struct IntegralTable {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    origin: usize,
    stride: usize,
}

impl IntegralTable {
    /// Zero-initialized `rows x cols` table with no padding.
    pub(crate) fn zeroed(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self {
            data: vec![0.0; checked_len(rows, cols)?],
            rows,
            cols,
            origin: 0,
            stride: cols,
        })
    }

    /// Zero-initialized `(rows + 1) x (cols + 1)` buffer for the padded strategy.
    pub(crate) fn zeroed_padded(rows: usize, cols: usize) -> Result<Self> {
        let overflow = Error::InvalidDimension {
            rows,
            cols,
            reason: "padded buffer size overflows usize",
        };
        let padded_rows = rows.checked_add(1).ok_or_else(|| overflow.clone())?;
        let stride = cols.checked_add(1).ok_or_else(|| overflow.clone())?;
        let len = padded_rows.checked_mul(stride).ok_or(overflow)?;
        Ok(Self {
            data: vec![0.0; len],
            rows,
            cols,
            origin: stride + 1,
            stride,
        })
    }

    /// Whole backing buffer, padding included. Row `r` starts at `r * stride`.
    pub(crate) fn buffer_mut(&mut self) -> &mut [f64] {
        &mut self.data
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

    /// Distance in elements between vertically adjacent cells.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// True when the view sits inside a sentinel-padded buffer.
    pub fn is_padded(&self) -> bool {
        self.origin != 0
    }

    /// Sum of the input rectangle `[0, x] x [0, y]`. Panics when out of bounds.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.rows && y < self.cols, "({x}, {y}) out of bounds");
        self.data[self.origin + x * self.stride + y]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.rows && y < self.cols).then(|| self.data[self.origin + x * self.stride + y])
    }

    /// Logical row `x`, without padding.
    #[inline]
    pub fn row(&self, x: usize) -> &[f64] {
        let start = self.origin + x * self.stride;
        &self.data[start..start + self.cols]
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |x| self.row(x))
    }

    /// Sum of the whole input, or 0 for an empty table.
    pub fn total(&self) -> f64 {
        if self.rows == 0 || self.cols == 0 {
            return 0.0;
        }
        self.at(self.rows - 1, self.cols - 1)
    }

    /// Sum of the input rectangle with inclusive corners `(top, left)` and
    /// `(bottom, right)`, in constant time.
    pub fn region_sum(&self, top: usize, left: usize, bottom: usize, right: usize) -> Result<f64> {
        if top > bottom || left > right || bottom >= self.rows || right >= self.cols {
            return Err(Error::OutOfRange {
                top,
                left,
                bottom,
                right,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let mut sum = self.at(bottom, right);
        if top > 0 {
            sum -= self.at(top - 1, right);
        }
        if left > 0 {
            sum -= self.at(bottom, left - 1);
        }
        if top > 0 && left > 0 {
            sum += self.at(top - 1, left - 1);
        }
        Ok(sum)
    }

    /// Compact copy of the logical cells.
    pub fn to_grid(&self) -> Grid {
        let data = self.rows_iter().flatten().copied().collect();
        Grid::from_raw(self.rows, self.cols, data)
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows_iter().map(<[f64]>::to_vec).collect()
    }
}

/// Element-wise comparison of the logical cells; padding and stride are ignored.
impl PartialEq for IntegralTable {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.rows_iter().eq(other.rows_iter())
    }
}
