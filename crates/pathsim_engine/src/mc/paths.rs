//! GBM path evolution.
//!
//! Each step applies the exact GBM transition
//! ```text
//! S_t = S_{t-1} * exp((r - 0.5σ²)Δt + σ ε_t √Δt),    S_{-1} = s0
//! ```
//! elementwise across assets. This is the exact transition density, not an
//! Euler-Maruyama approximation, so moments are correct for any step size.
//!
//! # Memory Layout
//!
//! Paths are stored row-major by time: `data[step * n_assets + asset]`.
//! Row `t` holds the prices at the `t`-th evaluation time; the initial
//! price is not stored.

use super::shocks::ShockMatrix;

/// `n_steps x n_assets` simulated prices.
#[derive(Clone, Debug, PartialEq)]
pub struct PricePaths {
    data: Vec<f64>,
    n_steps: usize,
    n_assets: usize,
}

impl PricePaths {
    /// Number of evaluation times (rows).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Number of assets (columns).
    #[inline]
    pub fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_steps, self.n_assets)
    }

    /// Price of `asset` at evaluation `step`.
    #[inline]
    pub fn get(&self, step: usize, asset: usize) -> f64 {
        self.data[step * self.n_assets + asset]
    }

    /// Prices of every asset at evaluation `step`.
    #[inline]
    pub fn row(&self, step: usize) -> &[f64] {
        let start = step * self.n_assets;
        &self.data[start..start + self.n_assets]
    }

    /// Iterator over rows, in evaluation-time order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks(self.n_assets.max(1)).take(self.n_steps)
    }

    /// Path of a single asset.
    pub fn asset_path(&self, asset: usize) -> Vec<f64> {
        (0..self.n_steps).map(|step| self.get(step, asset)).collect()
    }

    /// Prices at the last evaluation time.
    pub fn terminal(&self) -> &[f64] {
        match self.n_steps {
            0 => &[],
            n => self.row(n - 1),
        }
    }

    /// Copies the paths into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Raw buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

}

/// Evolves GBM paths from `s0` under the given shocks.
///
/// # Arguments
///
/// * `s0` - Initial price, shared by every asset
/// * `sigma` - Volatility per asset
/// * `r` - Drift, shared by every asset
/// * `time_deltas` - Step lengths in years
/// * `shocks` - Correlated standard normal shocks, `sigma.len() x time_deltas.len()`
///
/// # Panics
///
/// Panics if the shock matrix shape disagrees with `sigma` or
/// `time_deltas`. Inputs come from the engine, so a mismatch is a bug.
///
/// # Algorithm
///
/// 1. Precompute `drift_i = r - 0.5σ_i²` per asset
/// 2. Per step, compute `√Δt` once
/// 3. `S_i ← S_i × exp(drift_i Δt + σ_i √Δt ε_i)` and record the row
pub fn evolve_paths(
    s0: f64,
    sigma: &[f64],
    r: f64,
    time_deltas: &[f64],
    shocks: &ShockMatrix,
) -> PricePaths {
    let n_assets = sigma.len();
    let n_steps = time_deltas.len();
    assert_eq!(
        shocks.n_assets(),
        n_assets,
        "shock matrix has {} rows for {} volatilities",
        shocks.n_assets(),
        n_assets
    );
    assert_eq!(
        shocks.n_steps(),
        n_steps,
        "shock matrix has {} columns for {} time deltas",
        shocks.n_steps(),
        n_steps
    );

    let drift: Vec<f64> = sigma.iter().map(|s| r - 0.5 * s * s).collect();
    let mut state = vec![s0; n_assets];
    let mut data = vec![0.0; n_steps * n_assets];

    for (step, (&dt, row)) in time_deltas
        .iter()
        .zip(data.chunks_exact_mut(n_assets.max(1)))
        .enumerate()
    {
        let sqrt_dt = dt.sqrt();
        for asset in 0..n_assets {
            let eps = shocks.get(asset, step);
            let increment = drift[asset] * dt + sigma[asset] * eps * sqrt_dt;
            state[asset] *= increment.exp();
            row[asset] = state[asset];
        }
    }

    PricePaths {
        data,
        n_steps,
        n_assets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_single_step_sanity() {
        let shocks = ShockMatrix::zeros(1, 1);
        let paths = evolve_paths(100.0, &[0.0], 0.03, &[1.0], &shocks);

        assert_eq!(paths.shape(), (1, 1));
        assert_relative_eq!(paths.get(0, 0), 103.045_453_395_351_7, epsilon = 1e-9);
        assert_eq!(paths.get(0, 0), 100.0 * 0.03_f64.exp());
    }

    #[test]
    fn test_zero_shocks_pure_drift() {
        let sigma = [0.2, 0.4];
        let r = 0.05;
        let deltas = [0.1, 0.25, 0.4, 1.0];
        let shocks = ShockMatrix::zeros(2, deltas.len());

        let paths = evolve_paths(100.0, &sigma, r, &deltas, &shocks);

        let mut elapsed = 0.0;
        for (step, dt) in deltas.iter().enumerate() {
            elapsed += dt;
            for (asset, s) in sigma.iter().enumerate() {
                let expected = 100.0 * ((r - 0.5 * s * s) * elapsed).exp();
                assert_relative_eq!(paths.get(step, asset), expected, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_known_shock_single_step() {
        let shocks = ShockMatrix::from_rows(&[vec![1.5]]);
        let paths = evolve_paths(50.0, &[0.3], 0.02, &[0.25], &shocks);
        let expected = 50.0 * ((0.02 - 0.5 * 0.09) * 0.25 + 0.3 * 1.5 * 0.5_f64).exp();
        assert_relative_eq!(paths.get(0, 0), expected, max_relative = 1e-14);
    }

    #[test]
    fn test_path_is_multiplicative() {
        let shocks = ShockMatrix::from_rows(&[vec![0.3, -1.1, 0.8]]);
        let deltas = [0.5, 0.5, 0.5];
        let paths = evolve_paths(100.0, &[0.25], 0.01, &deltas, &shocks);

        let mut previous = 100.0;
        for step in 0..3 {
            let eps = shocks.get(0, step);
            let expected = previous * ((0.01 - 0.5 * 0.0625) * 0.5 + 0.25 * eps * 0.5_f64.sqrt()).exp();
            assert_relative_eq!(paths.get(step, 0), expected, max_relative = 1e-14);
            previous = paths.get(step, 0);
        }
    }

    #[test]
    fn test_zero_delta_step_leaves_price() {
        let shocks = ShockMatrix::from_rows(&[vec![2.0, 0.0]]);
        let paths = evolve_paths(100.0, &[0.5], 0.05, &[0.0, 1.0], &shocks);
        assert_eq!(paths.get(0, 0), 100.0);
    }

    #[test]
    fn test_accessors() {
        let shocks = ShockMatrix::zeros(2, 3);
        let paths = evolve_paths(10.0, &[0.0, 0.0], 0.0, &[1.0, 1.0, 1.0], &shocks);

        assert_eq!(paths.rows().count(), 3);
        assert_eq!(paths.row(1), &[10.0, 10.0]);
        assert_eq!(paths.asset_path(1), vec![10.0; 3]);
        assert_eq!(paths.terminal(), &[10.0, 10.0]);
        assert_eq!(paths.to_rows().len(), 3);
        assert_eq!(paths.as_slice().len(), 6);
    }

    #[test]
    #[should_panic(expected = "rows for")]
    fn test_sigma_shock_mismatch_panics() {
        let shocks = ShockMatrix::zeros(2, 1);
        let _ = evolve_paths(100.0, &[0.2], 0.0, &[1.0], &shocks);
    }

    #[test]
    #[should_panic(expected = "columns for")]
    fn test_delta_shock_mismatch_panics() {
        let shocks = ShockMatrix::zeros(1, 2);
        let _ = evolve_paths(100.0, &[0.2], 0.0, &[1.0], &shocks);
    }

    proptest! {
        #[test]
        fn prop_evolver_is_deterministic(
            s0 in 1.0f64..500.0,
            r in -0.05f64..0.1,
            sigma in proptest::collection::vec(0.0f64..1.0, 1..4),
            seed_shocks in proptest::collection::vec(-4.0f64..4.0, 12),
        ) {
            let n = sigma.len();
            let t = seed_shocks.len() / n;
            let rows: Vec<Vec<f64>> = (0..n)
                .map(|i| seed_shocks[i * t..(i + 1) * t].to_vec())
                .collect();
            let shocks = ShockMatrix::from_rows(&rows);
            let deltas = vec![1.0 / 252.0; t];

            let a = evolve_paths(s0, &sigma, r, &deltas, &shocks);
            let b = evolve_paths(s0, &sigma, r, &deltas, &shocks);

            prop_assert_eq!(a.shape(), (t, n));
            let bits_a: Vec<u64> = a.as_slice().iter().map(|x| x.to_bits()).collect();
            let bits_b: Vec<u64> = b.as_slice().iter().map(|x| x.to_bits()).collect();
            prop_assert_eq!(bits_a, bits_b);
        }
    }
}
