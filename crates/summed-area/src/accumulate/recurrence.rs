use crate::error::Result;
use crate::grid::Grid;
use crate::table::IntegralTable;

use super::ensure_shape;

/// Build the table in one pass with `T[x][y] = T[x-1][y] + rowSum(x, y)`.
///
/// Rows are outer, columns inner. The running row sum is a single scalar
/// reset at each row, and the previous output row is borrowed in place.
/// Whether a previous row exists is decided once per row, never per cell.
pub fn recurrence(grid: &Grid) -> Result<IntegralTable> {
    grid.validate()?;
    let (rows, cols) = grid.shape();
    log::debug!("[recurrence] {}x{}", rows, cols);

    let mut table = IntegralTable::zeroed(rows, cols)?;
    if cols > 0 {
        let mut above: Option<&[f64]> = None;
        for (src, row) in grid.rows_iter().zip(table.buffer_mut().chunks_exact_mut(cols)) {
            let mut row_sum = 0.0;
            match above {
                Some(above) => {
                    for ((cell, &up), &sample) in row.iter_mut().zip(above).zip(src) {
                        row_sum += sample;
                        *cell = up + row_sum;
                    }
                }
                None => {
                    for (cell, &sample) in row.iter_mut().zip(src) {
                        row_sum += sample;
                        *cell = row_sum;
                    }
                }
            }
            above = Some(&*row);
        }
    }

    ensure_shape(grid, &table)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulate::naive;

    #[test]
    fn test_recurrence_small() {
        let grid = Grid::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let table = recurrence(&grid).unwrap();
        assert_eq!(table.to_rows(), vec![vec![1.0, 3.0, 6.0], vec![5.0, 12.0, 21.0]]);
    }

    #[test]
    fn test_single_row_and_column() {
        let row = Grid::from_rows(&[[1.0, 2.0, 3.0, 4.0]]).unwrap();
        assert_eq!(recurrence(&row).unwrap().to_rows(), vec![vec![1.0, 3.0, 6.0, 10.0]]);

        let column = Grid::from_rows(&[[1.0], [2.0], [3.0]]).unwrap();
        assert_eq!(
            recurrence(&column).unwrap().to_rows(),
            vec![vec![1.0], vec![3.0], vec![6.0]]
        );
    }

    #[test]
    fn test_matches_naive_on_ramp() {
        let grid = Grid::from_fn(9, 13, |x, y| (x * 13 + y) as f64 - 40.0).unwrap();
        assert_eq!(recurrence(&grid).unwrap(), naive(&grid).unwrap());
    }
}
