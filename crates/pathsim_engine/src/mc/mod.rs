//! Monte Carlo path generation.
//!
//! # Architecture
//!
//! ```text
//! PathEngine
//! ├── ModelConfig            (validated, immutable)
//! ├── EvaluationTimes        (times → deltas)
//! ├── correlation_factor()   (pathsim_core, per call)
//! ├── generate_shocks()      (NormalSource → L · X)
//! └── evolve_paths()         (exact GBM recurrence)
//! ```
//!
//! [`run_batch`] and [`collect_batch`] spread independent trials over Rayon
//! workers.
//!
//! # Examples
//!
//! ```rust
//! use pathsim_engine::mc::{EvaluationTimes, PathEngine};
//! use pathsim_engine::model::GbmConfig;
//!
//! let engine = PathEngine::new(GbmConfig::single(100.0, 0.2, 0.03).unwrap());
//! let output = engine.simulate(EvaluationTimes::daily(252)).unwrap();
//!
//! assert_eq!(output.paths.shape(), (252, 1));
//! println!("setup {:?}, evolution {:?}", output.timings.setup, output.timings.evolution);
//! ```

pub mod batch;
pub mod engine;
pub mod paths;
pub mod shocks;
pub mod times;

pub use batch::{collect_batch, run_batch, trial_seed, BatchSummary};
pub use engine::{PathEngine, PhaseTimings, SimulationOutput};
pub use paths::{evolve_paths, PricePaths};
pub use shocks::{correlate_in_place, generate_shocks, ShockMatrix};
pub use times::{EvaluationTimes, TRADING_DAYS_PER_YEAR};
