use crate::error::Result;
use crate::grid::Grid;
use crate::table::IntegralTable;

use super::ensure_shape;

/// Evaluate the definition directly: every cell re-sums its whole rectangle.
///
/// O(rows² · cols²). Serves as the oracle for the faster strategies.
pub fn naive(grid: &Grid) -> Result<IntegralTable> {
    grid.validate()?;
    let (rows, cols) = grid.shape();
    log::debug!("[naive] {}x{}", rows, cols);

    let mut table = IntegralTable::zeroed(rows, cols)?;
    if cols > 0 {
        for (x, row) in table.buffer_mut().chunks_exact_mut(cols).enumerate() {
            for (y, cell) in row.iter_mut().enumerate() {
                *cell = rectangle_sum(grid, x, y);
            }
        }
    }

    ensure_shape(grid, &table)?;
    Ok(table)
}

/// Sum of `grid[0..=x][0..=y]`, row by row.
#[inline]
pub(crate) fn rectangle_sum(grid: &Grid, x: usize, y: usize) -> f64 {
    let mut sum = 0.0;
    for ix in 0..=x {
        for &sample in &grid.row(ix)[..=y] {
            sum += sample;
        }
    }
    sum
}
