//! Shared types for the path simulation workspace.
//!
//! Currently this is the error taxonomy:
//! - [`ConfigurationError`]: structural problems with a model configuration
//!   or a simulation request
//! - [`DecompositionError`]: the correlation matrix has no valid factor
//! - [`SimulationError`]: union of the two, returned by engine operations

pub mod error;

pub use error::{ConfigurationError, DecompositionError, SimulationError};
