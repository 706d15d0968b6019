use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use summed_area::{IntegralTable, Strategy};

use crate::plan::{Plan, Run, StrategyName};

/// Cross-check plan runs against a reference strategy
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to YAML plan (defaults to the nearest `bench.yaml`, else a built-in plan)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only verify plan entries for these strategies (repeatable).
    #[arg(short = 's', long = "strategy", value_enum)]
    pub strategies: Vec<StrategyName>,

    /// Largest grid (in cells) checked against the naive strategy; bigger
    /// grids are checked against the recurrence instead.
    #[arg(long, default_value_t = 250_000)]
    pub naive_limit: usize,

    /// Relative tolerance for grids with fractional samples.
    #[arg(long, default_value_t = 1e-9)]
    pub tolerance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub strategy: Strategy,
    pub oracle: Strategy,
    pub max_diff: f64,
    pub passed: bool,
}

fn max_abs_diff(a: &IntegralTable, b: &IntegralTable) -> f64 {
    a.rows_iter()
        .flatten()
        .zip(b.rows_iter().flatten())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Compare one run against the oracle.
///
/// Whole-number grids must match exactly. The truncating strategy is compared
/// against the oracle over the truncated grid, also exactly. Anything else
/// may differ by accumulation order, within `tolerance` relative to the total.
pub fn check(run: &Run, naive_limit: usize, tolerance: f64) -> anyhow::Result<Check> {
    let grid = run.fill.build(run.rows, run.cols)?;
    let strategy = Strategy::from(run.strategy);
    let oracle = if grid.as_slice().len() <= naive_limit {
        Strategy::Naive
    } else {
        Strategy::Recurrence
    };

    let actual = strategy.compute(&grid)?;
    let expected = if strategy.is_lossy() {
        oracle.compute(&grid.map(f64::trunc))?
    } else {
        oracle.compute(&grid)?
    };

    let max_diff = max_abs_diff(&actual, &expected);
    let exact = strategy.is_lossy() || run.fill.is_integral();
    let passed = actual.shape() == expected.shape()
        && if exact {
            actual == expected
        } else {
            max_diff <= tolerance * expected.total().abs().max(1.0)
        };

    Ok(Check {
        strategy,
        oracle,
        max_diff,
        passed,
    })
}

pub fn run(args: VerifyArgs) -> anyhow::Result<()> {
    let plan = Plan::resolve(args.config.as_deref())?.select(&args.strategies);
    let total = plan.runs.len();
    let mut failed = 0;

    for (i, run) in plan.runs.iter().enumerate() {
        let c = check(run, args.naive_limit, args.tolerance)?;
        let verdict = if c.passed { "PASSED" } else { "FAILED" };
        println!(
            "[{}/{}] {} ({}*{}) vs {}: Verification: {} (max diff {:e})",
            i + 1,
            total,
            c.strategy,
            run.rows,
            run.cols,
            c.oracle,
            verdict,
            c.max_diff
        );
        if !c.passed {
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {total} runs failed verification");
    }
    println!("[verify] done");
    Ok(())
}
