use std::path::{Path, PathBuf};

use anyhow::Context;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use summed_area::{Grid, RowSum, Strategy};

/// Default plan file name, searched upwards from the current directory.
pub const PLAN_FILE: &str = "bench.yaml";

/// Strategy names as they appear in plan files and on the command line.
#[derive(Serialize, Deserialize, clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyName {
    Naive,
    Recurrence,
    Padded,
    PaddedTruncating,
    NaiveParallel,
    RecurrenceParallel,
}

impl From<StrategyName> for Strategy {
    fn from(name: StrategyName) -> Self {
        match name {
            StrategyName::Naive => Strategy::Naive,
            StrategyName::Recurrence => Strategy::Recurrence,
            StrategyName::Padded => Strategy::Padded(RowSum::Exact),
            StrategyName::PaddedTruncating => Strategy::Padded(RowSum::Truncating),
            StrategyName::NaiveParallel => Strategy::NaiveParallel,
            StrategyName::RecurrenceParallel => Strategy::RecurrenceParallel,
        }
    }
}

/// How the input grid of a run is generated.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Fill {
    /// Ones on the diagonal (`eye`), zeros elsewhere.
    #[default]
    Identity,
    Ones,
    Constant { value: f64 },
    /// `x * cols + y`
    Ramp,
    /// Deterministic values in `[0, 100)`; integers unless `fractional`.
    Random {
        seed: u64,
        #[serde(default)]
        fractional: bool,
    },
}

impl Fill {
    pub fn build(&self, rows: usize, cols: usize) -> summed_area::Result<Grid> {
        match self {
            Fill::Identity => Grid::from_fn(rows, cols, |x, y| if x == y { 1.0 } else { 0.0 }),
            Fill::Ones => Grid::filled(rows, cols, 1.0),
            Fill::Constant { value } => Grid::filled(rows, cols, *value),
            Fill::Ramp => Grid::from_fn(rows, cols, |x, y| (x * cols + y) as f64),
            Fill::Random { seed, fractional } => {
                let mut rng = ChaCha8Rng::seed_from_u64(*seed);
                if *fractional {
                    Grid::from_fn(rows, cols, |_, _| (rng.next_u32() % 100_000) as f64 / 1000.0)
                } else {
                    Grid::from_fn(rows, cols, |_, _| (rng.next_u32() % 100) as f64)
                }
            }
        }
    }

    /// True when every generated sample is a whole number.
    pub fn is_integral(&self) -> bool {
        match self {
            Fill::Constant { value } => value.fract() == 0.0,
            Fill::Random { fractional, .. } => !fractional,
            Fill::Identity | Fill::Ones | Fill::Ramp => true,
        }
    }
}

fn one() -> usize {
    1
}

/// One timed accumulator call (or `repeat` of them) over a generated grid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Run {
    pub strategy: StrategyName,
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub fill: Fill,
    #[serde(default = "one")]
    pub repeat: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Plan {
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Plan {
    /// 200x200 identity under every strategy, then 5000x5000 identity for
    /// the linear-time ones.
    pub fn builtin() -> Self {
        let run = |strategy, n| Run {
            strategy,
            rows: n,
            cols: n,
            fill: Fill::Identity,
            repeat: 1,
        };
        Self {
            runs: vec![
                run(StrategyName::Naive, 200),
                run(StrategyName::Recurrence, 200),
                run(StrategyName::PaddedTruncating, 200),
                run(StrategyName::Recurrence, 5000),
                run(StrategyName::PaddedTruncating, 5000),
            ],
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_yaml::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    /// `--config` if given, else the nearest `bench.yaml`, else the built-in plan.
    pub fn resolve(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path: Option<PathBuf> = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => crate::findup::find_plan(PLAN_FILE)?,
        };
        match path {
            Some(path) => {
                log::info!("[plan] loading {}", path.display());
                Self::load(&path)
            }
            None => {
                log::info!("[plan] no {PLAN_FILE} found, using built-in plan");
                Ok(Self::builtin())
            }
        }
    }

    /// Keep only runs for these strategies; an empty filter keeps everything.
    pub fn select(mut self, strategies: &[StrategyName]) -> Self {
        if !strategies.is_empty() {
            self.runs.retain(|run| strategies.contains(&run.strategy));
        }
        self
    }
}
