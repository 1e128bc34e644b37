//! Error types for structured error handling.
//!
//! This module provides:
//! - `ConfigurationError`: invalid model selection, parameters or simulation
//!   request; always recoverable by constructing again with corrected input
//! - `DecompositionError`: correlation matrix admits no Cholesky factor
//! - `SimulationError`: either of the above, as surfaced by the engine
//!
//! Contract violations inside the numerical kernels (mismatched buffer
//! lengths) are not represented here; they panic.

use thiserror::Error;

/// Configuration errors detected at construction or at the start of a
/// simulation call, never mid-computation.
///
/// # Examples
/// ```
/// use pathsim_core::types::ConfigurationError;
///
/// let err = ConfigurationError::UnknownModel("Heston".to_string());
/// assert_eq!(format!("{}", err), "Unknown model: Heston");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Model name is not in the supported set.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Parameter key is not registered for the chosen model.
    #[error("Unknown parameter '{name}' for model {model}")]
    UnknownParameter {
        /// Model the parameter was supplied for
        model: &'static str,
        /// Offending key
        name: String,
    },

    /// Required parameter was not supplied.
    #[error("Missing parameter '{name}' for model {model}")]
    MissingParameter {
        /// Model requiring the parameter
        model: &'static str,
        /// Missing key
        name: &'static str,
    },

    /// Parameter value has the wrong shape (scalar, vector or matrix).
    #[error("Parameter '{name}' must be {expected}")]
    InvalidParameterType {
        /// Parameter key
        name: &'static str,
        /// Description of the accepted shape
        expected: &'static str,
    },

    /// Volatility vector is empty, leaving no asset to simulate.
    #[error("Volatility vector must contain at least one asset")]
    EmptyVolatility,

    /// Initial price is zero, negative or not finite.
    #[error("Invalid initial price {0}: must be positive and finite")]
    InvalidInitialPrice(f64),

    /// More than one asset but no correlation matrix.
    #[error("Correlation matrix required for {dimension} assets")]
    MissingCorrelation {
        /// Number of assets implied by the volatility vector
        dimension: usize,
    },

    /// A row of the correlation matrix has the wrong length.
    #[error("Correlation matrix is not square: row {row} has {got} entries, expected {expected}")]
    NotSquare {
        /// Row index
        row: usize,
        /// Expected row length
        expected: usize,
        /// Actual row length
        got: usize,
    },

    /// Correlation matrix dimension differs from the number of assets.
    #[error("Correlation matrix dimension {got} does not match asset count {expected}")]
    DimensionMismatch {
        /// Number of assets
        expected: usize,
        /// Matrix dimension
        got: usize,
    },

    /// No evaluation times were supplied.
    #[error("At least one evaluation time is required")]
    EmptyEvaluationTimes,

    /// Evaluation time is negative or not finite.
    #[error("Invalid evaluation time {value} at index {index}")]
    InvalidEvaluationTime {
        /// Position in the sequence
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Evaluation times are not strictly increasing.
    #[error("Evaluation times must be strictly increasing: {current} at index {index} follows {previous}")]
    NonIncreasingTimes {
        /// Position of the offending time
        index: usize,
        /// Preceding time
        previous: f64,
        /// Offending time
        current: f64,
    },
}

/// Cholesky decomposition failures.
///
/// Fatal for the configuration that produced them: the supplied correlation
/// matrix can never be factorised.
///
/// # Examples
/// ```
/// use pathsim_core::types::DecompositionError;
///
/// let err = DecompositionError::NotSymmetric { i: 0, j: 1 };
/// assert!(format!("{}", err).contains("(0, 1)"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecompositionError {
    /// Matrix is not positive semi-definite.
    #[error("Correlation matrix is not positive semi-definite (pivot {pivot} = {value})")]
    NotPositiveSemidefinite {
        /// Column at which elimination failed
        pivot: usize,
        /// Residual pivot value
        value: f64,
    },

    /// Matrix is not symmetric.
    #[error("Correlation matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
    },

    /// Matrix contains NaN or infinite entries.
    #[error("Correlation matrix has a non-finite entry at ({i}, {j})")]
    NonFinite {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
    },
}

/// Any failure surfaced by a simulation call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Configuration or request was structurally invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Correlation matrix could not be factorised.
    #[error(transparent)]
    Decomposition(#[from] DecompositionError),
}

impl SimulationError {
    /// Returns `true` if the error stems from configuration validation.
    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(self, SimulationError::Configuration(_))
    }

    /// Returns `true` if the error stems from a failed factorisation.
    #[inline]
    pub fn is_decomposition(&self) -> bool {
        matches!(self, SimulationError::Decomposition(_))
    }
}
