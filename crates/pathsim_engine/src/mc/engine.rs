//! Engine facade: factorise, draw, evolve.
//!
//! ```text
//! PathEngine::simulate(times)
//! ├── EvaluationTimes::time_deltas()   (validate, difference)
//! ├── correlation_factor()             (every call, no cache)   ┐ setup
//! ├── generate_shocks()                                         ┘
//! └── evolve_paths()                                            ─ evolution
//! ```
//!
//! Phase timings are part of the return value; the engine itself holds
//! nothing but its immutable configuration, so one instance can be shared
//! freely across threads.

use std::time::{Duration, Instant};

use pathsim_core::math::correlation::{correlation_factor, CholeskyFactor};
use pathsim_core::types::SimulationError;

use super::paths::{evolve_paths, PricePaths};
use super::shocks::generate_shocks;
use super::times::EvaluationTimes;
use crate::model::ModelConfig;
use crate::rng::{NormalSource, SimRng};

/// Wall-clock time spent in each phase of one simulation call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseTimings {
    /// Time validation, factorisation and shock generation.
    pub setup: Duration,
    /// The price recurrence.
    pub evolution: Duration,
}

impl PhaseTimings {
    /// Sum of both phases.
    #[inline]
    pub fn total(&self) -> Duration {
        self.setup + self.evolution
    }
}

/// Result of one simulation call.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationOutput {
    /// One row per evaluation time, one column per asset.
    pub paths: PricePaths,
    /// Phase timings for this call.
    pub timings: PhaseTimings,
}

/// Path generation engine.
///
/// # Examples
///
/// ```rust
/// use pathsim_engine::mc::{EvaluationTimes, PathEngine};
/// use pathsim_engine::model::GbmConfig;
/// use pathsim_engine::rng::SimRng;
/// use pathsim_core::math::correlation::CorrelationMatrix;
///
/// let rho = CorrelationMatrix::from_rows(&[vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
/// let config = GbmConfig::new(100.0, vec![0.2, 0.2], 0.03, Some(rho)).unwrap();
/// let engine = PathEngine::new(config);
///
/// let times = EvaluationTimes::daily(80);
/// let mut rng = SimRng::from_seed(42);
/// let output = engine.simulate_with_rng(&times, &mut rng).unwrap();
///
/// assert_eq!(output.paths.shape(), (80, 2));
/// ```
#[derive(Clone, Debug)]
pub struct PathEngine {
    config: ModelConfig,
}

impl PathEngine {
    /// Creates an engine for the given model.
    pub fn new(config: impl Into<ModelConfig>) -> Self {
        Self {
            config: config.into(),
        }
    }

    /// Model configuration.
    #[inline]
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Number of simulated assets.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.config.dimension()
    }

    /// Correlation factor for this configuration.
    ///
    /// Useful for checking a configuration up front; simulation calls
    /// recompute it every time.
    pub fn correlation_factor(&self) -> Result<CholeskyFactor<f64>, SimulationError> {
        match &self.config {
            ModelConfig::GeoBrownian(gbm) => correlation_factor(gbm.dimension(), gbm.rho()),
        }
    }

    /// Simulates one set of paths using a fresh entropy-seeded generator.
    ///
    /// A scalar time is treated as a single evaluation time.
    ///
    /// # Errors
    ///
    /// - `SimulationError::Configuration` for invalid evaluation times or a
    ///   correlation matrix of the wrong shape
    /// - `SimulationError::Decomposition` if the correlation matrix cannot
    ///   be factorised
    pub fn simulate(
        &self,
        times: impl Into<EvaluationTimes>,
    ) -> Result<SimulationOutput, SimulationError> {
        let mut rng = SimRng::from_entropy();
        self.simulate_with_rng(&times.into(), &mut rng)
    }

    /// Simulates one set of paths drawing from `rng`.
    ///
    /// All validation and factorisation happen before the first draw, so a
    /// failing call leaves `rng` untouched.
    pub fn simulate_with_rng<R>(
        &self,
        times: &EvaluationTimes,
        rng: &mut R,
    ) -> Result<SimulationOutput, SimulationError>
    where
        R: NormalSource + ?Sized,
    {
        let setup_start = Instant::now();
        let time_deltas = times.time_deltas()?;

        let (paths, timings) = match &self.config {
            ModelConfig::GeoBrownian(gbm) => {
                let factor = correlation_factor(gbm.dimension(), gbm.rho())?;
                let shocks = generate_shocks(&factor, time_deltas.len(), rng);
                let setup = setup_start.elapsed();

                let evolution_start = Instant::now();
                let paths = evolve_paths(
                    gbm.initial_price(),
                    gbm.sigma(),
                    gbm.r(),
                    &time_deltas,
                    &shocks,
                );
                let evolution = evolution_start.elapsed();

                (paths, PhaseTimings { setup, evolution })
            }
        };

        tracing::trace!(
            model = %self.config.kind(),
            assets = paths.n_assets(),
            steps = paths.n_steps(),
            setup_us = timings.setup.as_micros() as u64,
            evolution_us = timings.evolution.as_micros() as u64,
            "simulation complete"
        );

        Ok(SimulationOutput { paths, timings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GbmConfig;
    use approx::assert_relative_eq;
    use pathsim_core::math::correlation::CorrelationMatrix;
    use pathsim_core::types::{ConfigurationError, DecompositionError};
    use rand::{RngCore, SeedableRng};

    fn two_asset_engine(rho: f64) -> PathEngine {
        let rho = CorrelationMatrix::from_rows(&[vec![1.0, rho], vec![rho, 1.0]]).unwrap();
        PathEngine::new(GbmConfig::new(100.0, vec![0.2, 0.2], 0.03, Some(rho)).unwrap())
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PathEngine>();
    }

    #[test]
    fn test_output_shape_single_asset() {
        let engine = PathEngine::new(GbmConfig::single(100.0, 0.2, 0.03).unwrap());
        let output = engine.simulate(vec![0.1, 0.2, 0.3]).unwrap();
        assert_eq!(output.paths.shape(), (3, 1));
    }

    #[test]
    fn test_output_shape_two_assets() {
        let engine = two_asset_engine(0.5);
        let output = engine.simulate(EvaluationTimes::daily(80)).unwrap();
        assert_eq!(output.paths.shape(), (80, 2));
    }

    #[test]
    fn test_scalar_time() {
        let engine = two_asset_engine(0.5);
        let output = engine.simulate(1.0).unwrap();
        assert_eq!(output.paths.shape(), (1, 2));
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let engine = two_asset_engine(0.3);
        let times = EvaluationTimes::daily(20);

        let a = engine
            .simulate_with_rng(&times, &mut SimRng::from_seed(11))
            .unwrap();
        let b = engine
            .simulate_with_rng(&times, &mut SimRng::from_seed(11))
            .unwrap();
        assert_eq!(a.paths, b.paths);
    }

    #[test]
    fn test_successive_calls_draw_fresh_shocks() {
        let engine = two_asset_engine(0.3);
        let times = EvaluationTimes::daily(5);
        let mut rng = SimRng::from_seed(11);

        let a = engine.simulate_with_rng(&times, &mut rng).unwrap();
        let b = engine.simulate_with_rng(&times, &mut rng).unwrap();
        assert_ne!(a.paths, b.paths);
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let engine = PathEngine::new(GbmConfig::single(100.0, 0.0, 0.03).unwrap());
        let output = engine.simulate(1.0).unwrap();
        assert_relative_eq!(output.paths.get(0, 0), 103.045_453_395_351_7, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_times_fail_before_draw() {
        let engine = two_asset_engine(0.5);
        let mut rng = SimRng::from_seed(1);
        let mut untouched = SimRng::from_seed(1);

        let err = engine
            .simulate_with_rng(&EvaluationTimes::new(vec![]), &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            SimulationError::Configuration(ConfigurationError::EmptyEvaluationTimes)
        );
        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    fn test_not_psd_fails_with_decomposition_error() {
        let engine = two_asset_engine(2.0);
        let mut rng = SimRng::from_seed(1);
        let mut untouched = SimRng::from_seed(1);

        let err = engine
            .simulate_with_rng(&EvaluationTimes::from(1.0), &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Decomposition(DecompositionError::NotPositiveSemidefinite { .. })
        ));
        assert_eq!(rng.next_u64(), untouched.next_u64());
        assert!(engine.correlation_factor().is_err());
    }

    #[test]
    fn test_timings_are_per_call() {
        let engine = two_asset_engine(0.5);
        let output = engine.simulate(EvaluationTimes::daily(10)).unwrap();
        assert_eq!(
            output.timings.total(),
            output.timings.setup + output.timings.evolution
        );
    }

    #[test]
    fn test_accepts_foreign_rng() {
        let engine = two_asset_engine(0.5);
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let output = engine
            .simulate_with_rng(&EvaluationTimes::daily(3), &mut rng)
            .unwrap();
        assert_eq!(output.paths.shape(), (3, 2));
    }
}
