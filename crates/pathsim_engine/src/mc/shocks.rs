//! Correlated shock generation.
//!
//! An `n x T` matrix `X` of independent standard normals (one row per asset,
//! one column per evaluation time) is drawn and left-multiplied by the
//! correlation factor: `shocks = L * X`.
//!
//! # Memory Layout
//!
//! Row-major by asset: `data[asset * n_steps + step]`. Drawing fills the
//! buffer in one pass, so row `i` holds the `i`-th block of `T` draws.

use pathsim_core::math::correlation::CholeskyFactor;

use crate::rng::NormalSource;

/// `n_assets x n_steps` matrix of shocks.
#[derive(Clone, Debug, PartialEq)]
pub struct ShockMatrix {
    data: Vec<f64>,
    n_assets: usize,
    n_steps: usize,
}

impl ShockMatrix {
    /// All-zero shocks (pure drift).
    pub fn zeros(n_assets: usize, n_steps: usize) -> Self {
        Self {
            data: vec![0.0; n_assets * n_steps],
            n_assets,
            n_steps,
        }
    }

    /// Builds a matrix from one row per asset.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let n_assets = rows.len();
        let n_steps = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == n_steps),
            "shock rows must all have {} steps",
            n_steps
        );

        Self {
            data: rows.concat(),
            n_assets,
            n_steps,
        }
    }

    /// Number of assets (rows).
    #[inline]
    pub fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Number of time steps (columns).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Shock for `asset` at `step`.
    #[inline]
    pub fn get(&self, asset: usize, step: usize) -> f64 {
        self.data[asset * self.n_steps + step]
    }

    /// All shocks of one asset.
    #[inline]
    pub fn row(&self, asset: usize) -> &[f64] {
        let start = asset * self.n_steps;
        &self.data[start..start + self.n_steps]
    }

    /// Raw buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable raw buffer.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

/// Applies `L` to every column of `shocks` in place.
///
/// # Panics
///
/// Panics if `factor.dim() != shocks.n_assets()`.
pub fn correlate_in_place(factor: &CholeskyFactor<f64>, shocks: &mut ShockMatrix) {
    let n = shocks.n_assets;
    let t_count = shocks.n_steps;
    assert_eq!(
        factor.dim(),
        n,
        "correlation factor dimension {} does not match {} shock rows",
        factor.dim(),
        n
    );

    // Column `step` of the row-major buffer starts at `step`, stride `n_steps`.
    for step in 0..t_count {
        factor.correlate_strided(&mut shocks.data, step, t_count);
    }
}

/// Draws correlated shocks for `factor.dim()` assets over `n_steps` steps.
///
/// An identity factor (including the single-asset case) returns the
/// independent draws untouched.
pub fn generate_shocks<R>(factor: &CholeskyFactor<f64>, n_steps: usize, rng: &mut R) -> ShockMatrix
where
    R: NormalSource + ?Sized,
{
    let mut shocks = ShockMatrix::zeros(factor.dim(), n_steps);
    rng.fill_standard_normal(shocks.as_mut_slice());

    if !factor.is_identity() {
        correlate_in_place(factor, &mut shocks);
    }

    shocks
}
