//! Interchangeable strategies for building a summed-area table.
//!
//! All strategies take a `&Grid` and return a fresh [`IntegralTable`] of the
//! same shape. They differ only in time complexity and inner-loop layout:
//!
//! - [`naive`]: re-sums the whole `[0, x] x [0, y]` rectangle per cell.
//! - [`recurrence`]: `T[x][y] = T[x-1][y] + rowSum(x, y)`, one pass.
//! - [`padded`]: the same recurrence over a buffer with a zero sentinel row
//!   and column, so the inner loop has no boundary branch.

mod naive;
mod padded;
mod recurrence;

pub use naive::naive;
#[cfg(feature = "parallel")]
pub(crate) use naive::rectangle_sum;
pub use padded::{padded, RowSum};
pub use recurrence::recurrence;

use core::fmt;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::table::IntegralTable;

/// Strategy selector. Every variant honours the same contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Naive,
    Recurrence,
    Padded(RowSum),
    #[cfg(feature = "parallel")]
    NaiveParallel,
    #[cfg(feature = "parallel")]
    RecurrenceParallel,
}

impl Strategy {
    /// Sequential strategies, in increasing order of sophistication.
    pub const ALL: [Strategy; 4] = [
        Strategy::Naive,
        Strategy::Recurrence,
        Strategy::Padded(RowSum::Exact),
        Strategy::Padded(RowSum::Truncating),
    ];

    pub fn compute(self, grid: &Grid) -> Result<IntegralTable> {
        match self {
            Strategy::Naive => naive(grid),
            Strategy::Recurrence => recurrence(grid),
            Strategy::Padded(row_sum) => padded(grid, row_sum),
            #[cfg(feature = "parallel")]
            Strategy::NaiveParallel => crate::parallel::naive_parallel(grid),
            #[cfg(feature = "parallel")]
            Strategy::RecurrenceParallel => crate::parallel::recurrence_parallel(grid),
        }
    }

    /// Stable kebab-case label for logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::Recurrence => "recurrence",
            Strategy::Padded(RowSum::Exact) => "padded",
            Strategy::Padded(RowSum::Truncating) => "padded-truncating",
            #[cfg(feature = "parallel")]
            Strategy::NaiveParallel => "naive-parallel",
            #[cfg(feature = "parallel")]
            Strategy::RecurrenceParallel => "recurrence-parallel",
        }
    }

    /// True when results may diverge from the exact sums on non-integer input.
    pub fn is_lossy(self) -> bool {
        matches!(self, Strategy::Padded(RowSum::Truncating))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output shape must equal input shape before a table is handed back.
pub(crate) fn ensure_shape(grid: &Grid, table: &IntegralTable) -> Result<()> {
    if grid.shape() != table.shape() {
        return Err(Error::ShapeMismatch {
            expected: grid.shape(),
            got: table.shape(),
        });
    }
    Ok(())
}
