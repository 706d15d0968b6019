use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Args, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use summed_area::Strategy;

use crate::plan::{Plan, Run, StrategyName};

/// Time accumulator calls over generated grids
#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Path to YAML plan (defaults to the nearest `bench.yaml`, else a built-in plan)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only run plan entries for these strategies (repeatable).
    ///
    /// Example: `xtask bench -s recurrence -s padded`
    #[arg(short = 's', long = "strategy", value_enum)]
    pub strategies: Vec<StrategyName>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Run up to this many plan entries at once. Concurrent runs compete for
    /// cores, so timings are only comparable at `--jobs 1`.
    #[arg(short = 'j', long, default_value_t = 1)]
    pub jobs: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Measurement {
    pub strategy: &'static str,
    pub rows: usize,
    pub cols: usize,
    pub repeat: usize,
    pub best_ms: f64,
    pub mean_ms: f64,
    /// Bottom-right cell of the last table computed.
    pub total: f64,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}*{}): {:.3} ms",
            self.strategy, self.rows, self.cols, self.best_ms
        )?;
        if self.repeat > 1 {
            write!(f, " (mean {:.3} ms over {})", self.mean_ms, self.repeat)?;
        }
        write!(f, ", total={}", self.total)
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Build the run's grid, then time `repeat` calls. Only the call itself is
/// inside the clock; grid generation and table drop are not.
pub fn measure(run: &Run) -> anyhow::Result<Measurement> {
    let grid = run.fill.build(run.rows, run.cols)?;
    let strategy = Strategy::from(run.strategy);
    let repeat = run.repeat.max(1);

    let mut best = Duration::MAX;
    let mut sum = Duration::ZERO;
    let mut total = 0.0;
    for _ in 0..repeat {
        let start = Instant::now();
        let table = strategy.compute(&grid)?;
        let elapsed = start.elapsed();

        best = best.min(elapsed);
        sum += elapsed;
        total = table.total();
    }

    Ok(Measurement {
        strategy: strategy.name(),
        rows: run.rows,
        cols: run.cols,
        repeat,
        best_ms: millis(best),
        mean_ms: millis(sum) / repeat as f64,
        total,
    })
}

/// Measure every run. With `jobs > 1`, runs execute on a dedicated pool and
/// results are gathered back in plan order.
pub fn measure_all(runs: &[Run], jobs: usize) -> anyhow::Result<Vec<Measurement>> {
    if jobs <= 1 {
        return runs.iter().map(measure).collect();
    }
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    pool.install(|| runs.par_iter().map(measure).collect())
}

pub fn run(args: BenchArgs) -> anyhow::Result<()> {
    let plan = Plan::resolve(args.config.as_deref())?.select(&args.strategies);
    log::info!("[bench] {} runs, {} job(s)", plan.runs.len(), args.jobs.max(1));

    let measurements = measure_all(&plan.runs, args.jobs)?;

    // Report from this thread only, after all workers are done.
    match args.format {
        Format::Text => {
            for m in &measurements {
                println!("{m}");
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&measurements)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Fill;

    fn run(strategy: StrategyName, n: usize) -> Run {
        Run {
            strategy,
            rows: n,
            cols: n,
            fill: Fill::Ones,
            repeat: 3,
        }
    }

    #[test]
    fn test_measure() {
        let m = measure(&run(StrategyName::Padded, 30)).unwrap();
        assert_eq!(m.strategy, "padded");
        assert_eq!(m.total, 900.0);
        assert_eq!(m.repeat, 3);
        assert!(m.best_ms <= m.mean_ms);
    }

    #[test]
    fn test_measure_all_keeps_order() {
        let runs = vec![
            run(StrategyName::Naive, 5),
            run(StrategyName::Recurrence, 7),
            run(StrategyName::RecurrenceParallel, 9),
        ];
        let serial = measure_all(&runs, 1).unwrap();
        let concurrent = measure_all(&runs, 3).unwrap();
        let totals = |ms: &[Measurement]| ms.iter().map(|m| m.total).collect::<Vec<_>>();
        assert_eq!(totals(&serial), vec![25.0, 49.0, 81.0]);
        assert_eq!(totals(&concurrent), totals(&serial));
    }

    #[test]
    fn test_display() {
        let m = Measurement {
            strategy: "recurrence",
            rows: 200,
            cols: 200,
            repeat: 1,
            best_ms: 1.5,
            mean_ms: 1.5,
            total: 200.0,
        };
        assert_eq!(m.to_string(), "recurrence (200*200): 1.500 ms, total=200");
    }

    #[test]
    fn test_json_report() {
        let m = measure(&run(StrategyName::Recurrence, 4)).unwrap();
        let value = serde_json::to_value(vec![m]).unwrap();
        assert_eq!(value[0]["strategy"], "recurrence");
        assert_eq!(value[0]["total"], 16.0);
    }
}
