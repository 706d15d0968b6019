//! Cross-strategy checks against the naive oracle on deterministic random grids.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use summed_area::{naive, padded, recurrence, Grid, IntegralTable, RowSum, Strategy};

const SHAPES: [(usize, usize); 8] = [(1, 1), (1, 17), (17, 1), (2, 3), (8, 8), (13, 29), (31, 7), (64, 64)];

/// Integers in `[-50, 50)`.
fn integer_grid(rng: &mut ChaCha8Rng, rows: usize, cols: usize) -> Grid {
    Grid::from_fn(rows, cols, |_, _| (rng.next_u32() % 100) as f64 - 50.0).unwrap()
}

/// Non-negative values with three fractional digits, in `[0, 100)`.
fn fractional_grid(rng: &mut ChaCha8Rng, rows: usize, cols: usize) -> Grid {
    Grid::from_fn(rows, cols, |_, _| (rng.next_u32() % 100_000) as f64 / 1000.0).unwrap()
}

fn max_abs_diff(a: &IntegralTable, b: &IntegralTable) -> f64 {
    a.rows_iter()
        .flatten()
        .zip(b.rows_iter().flatten())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

#[test]
fn test_recurrence_matches_naive_on_integers() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    for (rows, cols) in SHAPES {
        let grid = integer_grid(&mut rng, rows, cols);
        assert_eq!(recurrence(&grid).unwrap(), naive(&grid).unwrap(), "{rows}x{cols}");
    }
}

#[test]
fn test_padded_matches_naive_on_integers() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for (rows, cols) in SHAPES {
        let grid = integer_grid(&mut rng, rows, cols);
        let expected = naive(&grid).unwrap();
        assert_eq!(padded(&grid, RowSum::Exact).unwrap(), expected, "{rows}x{cols}");
        assert_eq!(padded(&grid, RowSum::Truncating).unwrap(), expected, "{rows}x{cols}");
    }
}

#[test]
fn test_truncating_divergence_is_exactly_floor() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for (rows, cols) in SHAPES {
        let grid = fractional_grid(&mut rng, rows, cols);
        let floored = grid.map(f64::floor);
        assert_eq!(
            padded(&grid, RowSum::Truncating).unwrap(),
            naive(&floored).unwrap(),
            "{rows}x{cols}"
        );
    }
}

#[test]
fn test_padded_exact_matches_recurrence_bitwise() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for (rows, cols) in SHAPES {
        let grid = fractional_grid(&mut rng, rows, cols).map(|v| v - 50.0);
        assert_eq!(
            padded(&grid, RowSum::Exact).unwrap(),
            recurrence(&grid).unwrap(),
            "{rows}x{cols}"
        );
    }
}

#[test]
fn test_fractional_recurrence_close_to_naive() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let grid = fractional_grid(&mut rng, 32, 32);
    let diff = max_abs_diff(&recurrence(&grid).unwrap(), &naive(&grid).unwrap());
    // Sums reach ~1e5; accumulation order only moves the last few bits.
    assert!(diff < 1e-6, "diff = {diff}");
}

#[test]
fn test_origin_cell_is_first_sample() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for (rows, cols) in SHAPES {
        let grid = integer_grid(&mut rng, rows, cols);
        for strategy in Strategy::ALL {
            assert_eq!(strategy.compute(&grid).unwrap().at(0, 0), grid.at(0, 0), "{strategy}");
        }
    }
}

#[test]
fn test_monotonic_for_non_negative_input() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let grid = fractional_grid(&mut rng, 24, 40);
    for strategy in Strategy::ALL {
        let table = strategy.compute(&grid).unwrap();
        for x in 1..table.rows() {
            for y in 1..table.cols() {
                assert!(table.at(x, y) >= table.at(x - 1, y), "{strategy} ({x}, {y})");
                assert!(table.at(x, y) >= table.at(x, y - 1), "{strategy} ({x}, {y})");
            }
        }
    }
}

#[test]
fn test_region_sum_matches_direct_sum() {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let grid = integer_grid(&mut rng, 10, 12);
    let table = padded(&grid, RowSum::Exact).unwrap();
    for (top, left, bottom, right) in [(0, 0, 9, 11), (2, 3, 5, 7), (4, 0, 4, 11), (0, 6, 9, 6), (9, 11, 9, 11)] {
        let mut direct = 0.0;
        for x in top..=bottom {
            for y in left..=right {
                direct += grid.at(x, y);
            }
        }
        assert_eq!(table.region_sum(top, left, bottom, right).unwrap(), direct);
    }
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_strategies_match_sequential() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for (rows, cols) in SHAPES {
        let grid = fractional_grid(&mut rng, rows, cols);
        assert_eq!(
            Strategy::RecurrenceParallel.compute(&grid).unwrap(),
            Strategy::Recurrence.compute(&grid).unwrap()
        );
        assert_eq!(
            Strategy::NaiveParallel.compute(&grid).unwrap(),
            Strategy::Naive.compute(&grid).unwrap()
        );
    }
}

#[test]
fn test_all_ones_5000() {
    let grid = Grid::filled(5000, 5000, 1.0).unwrap();
    assert_eq!(recurrence(&grid).unwrap().at(4999, 4999), 25_000_000.0);
    assert_eq!(padded(&grid, RowSum::Exact).unwrap().at(4999, 4999), 25_000_000.0);
    assert_eq!(padded(&grid, RowSum::Truncating).unwrap().total(), 25_000_000.0);
}
