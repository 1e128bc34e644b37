//! Parallel execution of independent trials.
//!
//! Trials share nothing but the engine's immutable configuration. Each trial
//! owns a [`SimRng`] seeded with `seed + trial_index`, so results do not
//! depend on how Rayon schedules work across threads.

use std::time::{Duration, Instant};

use pathsim_core::types::SimulationError;
use rayon::prelude::*;

use super::engine::{PathEngine, SimulationOutput};
use super::times::EvaluationTimes;
use crate::rng::SimRng;

/// Aggregate over a batch of trials.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchSummary {
    /// Number of trials run.
    pub trials: usize,
    /// Wall-clock time for the whole batch.
    pub wall: Duration,
    /// Setup time summed over trials.
    pub setup_total: Duration,
    /// Evolution time summed over trials.
    pub evolution_total: Duration,
    /// Mean terminal price per asset.
    pub terminal_mean: Vec<f64>,
}

/// Seed for trial `index` of a batch seeded with `seed`.
#[inline]
pub fn trial_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add(index as u64)
}

/// Running totals, merged pairwise by `try_reduce`.
struct Accumulator {
    trials: usize,
    setup: Duration,
    evolution: Duration,
    terminal_sum: Vec<f64>,
}

impl Accumulator {
    fn empty(n_assets: usize) -> Self {
        Self {
            trials: 0,
            setup: Duration::ZERO,
            evolution: Duration::ZERO,
            terminal_sum: vec![0.0; n_assets],
        }
    }

    fn from_output(output: &SimulationOutput) -> Self {
        Self {
            trials: 1,
            setup: output.timings.setup,
            evolution: output.timings.evolution,
            terminal_sum: output.paths.terminal().to_vec(),
        }
    }

    fn merge(mut self, other: Self) -> Self {
        self.trials += other.trials;
        self.setup += other.setup;
        self.evolution += other.evolution;
        for (acc, value) in self.terminal_sum.iter_mut().zip(other.terminal_sum) {
            *acc += value;
        }
        self
    }
}

/// Runs `n_trials` independent simulations in parallel and summarises them.
///
/// The first failing trial aborts the batch; no partial summary is returned.
///
/// # Examples
///
/// ```rust
/// use pathsim_engine::mc::{run_batch, EvaluationTimes, PathEngine};
/// use pathsim_engine::model::GbmConfig;
///
/// let engine = PathEngine::new(GbmConfig::single(100.0, 0.2, 0.03).unwrap());
/// let summary = run_batch(&engine, &EvaluationTimes::daily(10), 100, 42).unwrap();
/// assert_eq!(summary.trials, 100);
/// assert_eq!(summary.terminal_mean.len(), 1);
/// ```
pub fn run_batch(
    engine: &PathEngine,
    times: &EvaluationTimes,
    n_trials: usize,
    seed: u64,
) -> Result<BatchSummary, SimulationError> {
    let n_assets = engine.dimension();
    tracing::debug!(trials = n_trials, assets = n_assets, steps = times.len(), seed, "batch started");

    let start = Instant::now();
    let acc = (0..n_trials)
        .into_par_iter()
        .map(|index| {
            let mut rng = SimRng::from_seed(trial_seed(seed, index));
            engine
                .simulate_with_rng(times, &mut rng)
                .map(|output| Accumulator::from_output(&output))
        })
        .try_reduce(|| Accumulator::empty(n_assets), |a, b| Ok(a.merge(b)))?;
    let wall = start.elapsed();

    let terminal_mean = if acc.trials == 0 {
        vec![f64::NAN; n_assets]
    } else {
        acc.terminal_sum
            .iter()
            .map(|sum| sum / acc.trials as f64)
            .collect()
    };

    tracing::debug!(
        trials = acc.trials,
        wall_ms = wall.as_millis() as u64,
        setup_ms = acc.setup.as_millis() as u64,
        evolution_ms = acc.evolution.as_millis() as u64,
        "batch finished"
    );

    Ok(BatchSummary {
        trials: acc.trials,
        wall,
        setup_total: acc.setup,
        evolution_total: acc.evolution,
        terminal_mean,
    })
}

/// Runs `n_trials` independent simulations in parallel and keeps every
/// output, in trial order.
pub fn collect_batch(
    engine: &PathEngine,
    times: &EvaluationTimes,
    n_trials: usize,
    seed: u64,
) -> Result<Vec<SimulationOutput>, SimulationError> {
    (0..n_trials)
        .into_par_iter()
        .map(|index| {
            let mut rng = SimRng::from_seed(trial_seed(seed, index));
            engine.simulate_with_rng(times, &mut rng)
        })
        .collect()
}
