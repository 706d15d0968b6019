//! Fork-join variants built on rayon.
//!
//! Work items never share memory: rows are handed out with
//! `par_chunks_exact_mut` and the previous row is split off with
//! `split_at_mut`, so no locks are needed. Worker closures do not log; all
//! diagnostics come from the calling thread.

use rayon::prelude::*;

use crate::accumulate::{ensure_shape, rectangle_sum};
use crate::error::Result;
use crate::grid::Grid;
use crate::table::IntegralTable;

/// Columns below this are summed by one task; splitting further costs more than it saves.
const MIN_COLS_PER_TASK: usize = 4096;

/// Row-parallel [`naive`](crate::naive). Each output row is an independent work item.
pub fn naive_parallel(grid: &Grid) -> Result<IntegralTable> {
    grid.validate()?;
    let (rows, cols) = grid.shape();
    log::debug!("[naive-parallel] {}x{} on {} threads", rows, cols, rayon::current_num_threads());

    let mut table = IntegralTable::zeroed(rows, cols)?;
    if cols > 0 {
        table
            .buffer_mut()
            .par_chunks_exact_mut(cols)
            .enumerate()
            .for_each(|(x, row)| {
                for (y, cell) in row.iter_mut().enumerate() {
                    *cell = rectangle_sum(grid, x, y);
                }
            });
    }

    ensure_shape(grid, &table)?;
    Ok(table)
}

/// Two-phase parallel [`recurrence`](crate::recurrence).
///
/// Phase 1 writes every row's running sums; rows are independent.
/// Phase 2 sweeps top to bottom, one barrier per row, adding the finished
/// previous row into the current one column-parallel. Every cell ends up as
/// `above + row_sum`, the same operation as the sequential recurrence, so
/// results are bit-identical.
pub fn recurrence_parallel(grid: &Grid) -> Result<IntegralTable> {
    grid.validate()?;
    let (rows, cols) = grid.shape();
    log::debug!(
        "[recurrence-parallel] {}x{} on {} threads",
        rows,
        cols,
        rayon::current_num_threads()
    );

    let mut table = IntegralTable::zeroed(rows, cols)?;
    if cols > 0 {
        let buf = table.buffer_mut();

        buf.par_chunks_exact_mut(cols)
            .zip(grid.as_slice().par_chunks_exact(cols))
            .for_each(|(row, src)| {
                let mut row_sum = 0.0;
                for (cell, &sample) in row.iter_mut().zip(src) {
                    row_sum += sample;
                    *cell = row_sum;
                }
            });

        for x in 1..rows {
            let (done, rest) = buf.split_at_mut(x * cols);
            let above = &done[(x - 1) * cols..];
            rest[..cols]
                .par_iter_mut()
                .with_min_len(MIN_COLS_PER_TASK)
                .zip(above.par_iter())
                .for_each(|(cell, &up)| *cell = up + *cell);
        }
    }

    ensure_shape(grid, &table)?;
    Ok(table)
}
