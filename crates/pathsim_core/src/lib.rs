//! # pathsim_core: Foundation for GBM Path Simulation
//!
//! ## Layer 1 (Foundation) Role
//!
//! pathsim_core is the bottom layer of the workspace, providing:
//! - Error taxonomy: `ConfigurationError`, `DecompositionError`,
//!   `SimulationError` (`types::error`)
//! - Correlation matrices and their Cholesky factor (`math::correlation`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pathsim_* crates, with minimal
//! external dependencies:
//! - num-traits: generic floating-point operations for the factoriser
//! - thiserror: error derivation
//! - serde: serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pathsim_core::math::correlation::{correlation_factor, CorrelationMatrix};
//!
//! let rho = CorrelationMatrix::from_rows(&[vec![1.0_f64, 0.5], vec![0.5, 1.0]]).unwrap();
//! let factor = correlation_factor(2, Some(&rho)).unwrap();
//!
//! // L * L^T reproduces the correlation matrix
//! assert!((factor.get(1, 0) - 0.5).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
