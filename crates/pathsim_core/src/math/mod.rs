//! Numerical building blocks.
//!
//! - [`correlation`]: correlation matrix storage and Cholesky factorisation

pub mod correlation;

pub use correlation::{correlation_factor, CholeskyFactor, CorrelationMatrix, PSD_TOLERANCE};
