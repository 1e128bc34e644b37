//! # Random Number Generation
//!
//! Standard normal draws for shock generation.
//!
//! The shock generator is agnostic about where its normals come from: it
//! asks for a [`NormalSource`], and every `rand::RngCore` is one. The engine
//! never stores or exposes a seed; callers wanting reproducibility seed the
//! generator they pass in.
//!
//! - [`SimRng`]: seeded `StdRng` wrapper, the stock generator for trials
//! - [`NormalSource`]: batch standard-normal fill
//!
//! ```rust
//! use pathsim_engine::rng::{NormalSource, SimRng};
//!
//! let mut rng = SimRng::from_seed(12345);
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_standard_normal(&mut buffer);
//! ```

mod prng;

pub use prng::{NormalSource, SimRng};

#[cfg(test)]
mod tests;
