//! Summed-area tables (integral images) over dense `f64` grids.
//!
//! `table[x][y]` is the sum of every sample in the rectangle from the origin
//! to `(x, y)`, inclusive. Three sequential strategies compute it:
//!
//! - [`naive`]: the definition as an algorithm, O(rows² · cols²).
//! - [`recurrence`]: the prefix-sum recurrence, O(rows · cols).
//! - [`padded`]: the recurrence over a zero-padded buffer with no boundary
//!   branch in the inner loop, returned as a non-copying sub-view.
//!
//! With the `parallel` feature, [`naive_parallel`] and [`recurrence_parallel`]
//! split the same work across a rayon pool.
//!
//! ```
//! use summed_area::{Grid, Strategy};
//!
//! let grid = Grid::identity(3).unwrap();
//! let table = Strategy::Recurrence.compute(&grid).unwrap();
//! assert_eq!(table.to_rows(), vec![
//!     vec![1.0, 1.0, 1.0],
//!     vec![1.0, 2.0, 2.0],
//!     vec![1.0, 2.0, 3.0],
//! ]);
//! assert_eq!(table.region_sum(1, 1, 2, 2).unwrap(), 2.0);
//! ```

pub mod accumulate;
pub mod error;
pub mod grid;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod table;

pub use accumulate::{naive, padded, recurrence, RowSum, Strategy};
pub use error::{Error, Result};
pub use grid::Grid;
#[cfg(feature = "parallel")]
pub use parallel::{naive_parallel, recurrence_parallel};
pub use table::IntegralTable;
