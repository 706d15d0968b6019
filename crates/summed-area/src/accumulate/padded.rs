//! Recurrence over a sentinel-padded buffer.
//!
//! The buffer is `(rows + 1) x (cols + 1)` with physical row 0 and column 0
//! left at zero. Logical cell `(x, y)` lives at physical `(x + 1, y + 1)`, so
//! its upper neighbour always exists and the inner loop carries no branch.
//! The caller receives the sub-view at `(1, 1)`; nothing is copied.

use crate::error::Result;
use crate::grid::Grid;
use crate::table::IntegralTable;

use super::ensure_shape;

/// How the running row sum is accumulated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RowSum {
    /// Full `f64` accumulation. Matches [`recurrence`](super::recurrence) bit for bit.
    #[default]
    Exact,
    /// Each sample is truncated toward zero and summed as an integer before
    /// being added into the table. Reproduces the reference behaviour; on
    /// non-integer input the result equals the exact table of the truncated grid.
    Truncating,
}

/// Per-row running sum; monomorphized into the hot loop.
trait RunningSum: Default {
    /// Add `sample` and return the sum so far as `f64`.
    fn push(&mut self, sample: f64) -> f64;
}

#[derive(Default)]
struct ExactSum(f64);

impl RunningSum for ExactSum {
    #[inline(always)]
    fn push(&mut self, sample: f64) -> f64 {
        self.0 += sample;
        self.0
    }
}

#[derive(Default)]
struct TruncatingSum(i64);

impl RunningSum for TruncatingSum {
    #[inline(always)]
    fn push(&mut self, sample: f64) -> f64 {
        // `as` truncates toward zero and saturates at the i64 range.
        self.0 = self.0.wrapping_add(sample as i64);
        self.0 as f64
    }
}

/// Build the table over a zero-padded buffer and return its unpadded view.
pub fn padded(grid: &Grid, row_sum: RowSum) -> Result<IntegralTable> {
    match row_sum {
        RowSum::Exact => padded_with::<ExactSum>(grid),
        RowSum::Truncating => padded_with::<TruncatingSum>(grid),
    }
}

fn padded_with<S: RunningSum>(grid: &Grid) -> Result<IntegralTable> {
    grid.validate()?;
    let (rows, cols) = grid.shape();
    log::debug!("[padded] {}x{}", rows, cols);

    let mut table = IntegralTable::zeroed_padded(rows, cols)?;
    let stride = table.stride();
    let (sentinel, body) = table.buffer_mut().split_at_mut(stride);

    let mut above: &[f64] = sentinel;
    for (src, row) in grid.rows_iter().zip(body.chunks_exact_mut(stride)) {
        let mut running = S::default();
        for ((cell, &up), &sample) in row[1..].iter_mut().zip(&above[1..]).zip(src) {
            *cell = running.push(sample) + up;
        }
        above = &*row;
    }

    ensure_shape(grid, &table)?;
    Ok(table)
}
