//! Model configuration and validation.
//!
//! - [`ModelKind`]: closed set of supported models
//! - [`ModelConfig`]: validated configuration, one variant per model
//! - [`GbmConfig`]: Geometric Brownian Motion parameters
//! - [`ParamValue`]: loosely typed value for name/value construction
//!
//! ## Example
//!
//! ```
//! use pathsim_engine::model::{GbmConfig, ModelConfig, ModelKind};
//!
//! let config: ModelConfig = GbmConfig::single(100.0, 0.2, 0.03).unwrap().into();
//! assert_eq!(config.kind(), ModelKind::GeoBrownian);
//! assert_eq!(config.dimension(), 1);
//! ```

pub mod config;
pub mod gbm;

pub use config::{ModelConfig, ModelKind, ParamValue};
pub use gbm::GbmConfig;
