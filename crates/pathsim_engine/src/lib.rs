//! # Path Engine (Layer 2)
//!
//! Simulated price paths for one or more correlated assets under Geometric
//! Brownian Motion.
//!
//! ## Layer 2 Role
//!
//! - Model configuration and validation (`model`)
//! - Standard normal generation (`rng`)
//! - Shock generation, path evolution and the engine facade (`mc`)
//! - Sample statistics for checking output (`stats`)
//!
//! Errors and the correlation factoriser live in Layer 1 (`pathsim_core`).
//!
//! ## Usage Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use pathsim_engine::mc::{EvaluationTimes, PathEngine};
//! use pathsim_engine::model::{ModelConfig, ParamValue};
//!
//! let mut params = BTreeMap::new();
//! params.insert("sigma".to_string(), ParamValue::from(vec![0.2, 0.2]));
//! params.insert("r".to_string(), ParamValue::from(0.03));
//! params.insert(
//!     "rho".to_string(),
//!     ParamValue::from(vec![vec![1.0, 0.5], vec![0.5, 1.0]]),
//! );
//!
//! let config = ModelConfig::from_named("GeoBrownian", 100.0, &params).unwrap();
//! let engine = PathEngine::new(config);
//!
//! let output = engine.simulate(EvaluationTimes::daily(80)).unwrap();
//! assert_eq!(output.paths.shape(), (80, 2));
//! ```
//!
//! ## Concurrency
//!
//! `PathEngine` is `Send + Sync` and holds no mutable state. Timings are
//! returned with each call, so one engine can serve any number of threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod model;
pub mod rng;
pub mod stats;

pub use mc::{EvaluationTimes, PathEngine, PhaseTimings, PricePaths, SimulationOutput};
pub use model::{GbmConfig, ModelConfig, ModelKind, ParamValue};
pub use pathsim_core::types::{ConfigurationError, DecompositionError, SimulationError};
