//! Simulation settings.
//!
//! Sources, lowest priority first:
//! 1. The settings file given with `--config`, or the built-in default
//! 2. `PATHSIM_*` environment variables (`PATHSIM_RUN__TRIALS=1000`)
//! 3. Command-line flags applied by each command

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use pathsim_engine::mc::{EvaluationTimes, PathEngine, TRADING_DAYS_PER_YEAR};
use pathsim_engine::model::ModelConfig;
use serde::Deserialize;

use crate::{CliError, Result};

/// Two correlated assets over 80 trading days, 50 000 trials.
pub const DEFAULT_SETTINGS: &str = r#"
[model]
model = "GeoBrownian"
initial_price = 100.0
sigma = [0.2, 0.2]
r = 0.03
rho = [[1.0, 0.5], [0.5, 1.0]]

[schedule]
steps = 80

[run]
trials = 50000
"#;

/// Evaluation grid, either explicit or uniform.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleSettings {
    /// Explicit evaluation times in years
    pub times: Option<Vec<f64>>,
    /// Number of uniform steps
    pub steps: Option<usize>,
    /// Uniform step length in years (one trading day if omitted)
    pub step_size: Option<f64>,
}

impl ScheduleSettings {
    /// Builds the evaluation grid.
    pub fn evaluation_times(&self) -> Result<EvaluationTimes> {
        match (&self.times, self.steps) {
            (Some(times), None) => {
                if self.step_size.is_some() {
                    return Err(CliError::InvalidSchedule(
                        "step_size only applies to a uniform grid".to_string(),
                    ));
                }
                Ok(EvaluationTimes::new(times.clone()))
            }
            (None, Some(steps)) => {
                let step_size = self.step_size.unwrap_or(1.0 / TRADING_DAYS_PER_YEAR);
                Ok(EvaluationTimes::uniform(steps, step_size))
            }
            (Some(_), Some(_)) => Err(CliError::InvalidSchedule(
                "give either times or steps, not both".to_string(),
            )),
            (None, None) => Err(CliError::InvalidSchedule(
                "one of times or steps is required".to_string(),
            )),
        }
    }
}

/// Batch run parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSettings {
    /// Number of independent trials
    pub trials: usize,
    /// Base seed; trials draw from entropy-derived seeds if absent
    pub seed: Option<u64>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            trials: 50_000,
            seed: None,
        }
    }
}

/// Complete settings for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationSettings {
    /// Model and parameters
    pub model: ModelConfig,
    /// Evaluation grid
    pub schedule: ScheduleSettings,
    /// Batch parameters
    #[serde(default)]
    pub run: RunSettings,
}

impl SimulationSettings {
    /// Loads settings from `path` (or the built-in default) layered with
    /// `PATHSIM_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // File sources differ in type, so each arm starts its own builder.
        let builder = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::FileNotFound(path.display().to_string()));
                }
                Config::builder().add_source(File::from(path).format(FileFormat::Toml))
            }
            None => Config::builder().add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml)),
        };

        let settings: Self = builder
            .add_source(
                Environment::with_prefix("PATHSIM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        tracing::debug!(
            model = %settings.model.kind(),
            assets = settings.model.dimension(),
            trials = settings.run.trials,
            "settings loaded"
        );
        Ok(settings)
    }

    /// Parses settings from a TOML string, without environment overrides.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(toml_str, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Engine for the configured model.
    pub fn engine(&self) -> PathEngine {
        PathEngine::new(self.model.clone())
    }
}
