//! Sample statistics for checking simulated output.
//!
//! These helpers never feed back into path generation; they exist for tests
//! and reporting.

use crate::mc::PricePaths;

/// Pearson correlation of two equally long samples.
///
/// Returns NaN for fewer than two observations or a constant sample.
///
/// # Panics
///
/// Panics if the samples have different lengths.
pub fn sample_correlation(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "samples must have equal length");
    let n = a.len();
    if n < 2 {
        return f64::NAN;
    }

    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    cov / (var_a * var_b).sqrt()
}

/// Log returns of one asset, starting from `s0`.
pub fn log_returns(paths: &PricePaths, s0: f64, asset: usize) -> Vec<f64> {
    let mut previous = s0;
    paths
        .asset_path(asset)
        .into_iter()
        .map(|current| {
            let ret = (current / previous).ln();
            previous = current;
            ret
        })
        .collect()
}

/// Correlation of log returns between two assets.
pub fn log_return_correlation(paths: &PricePaths, s0: f64, i: usize, j: usize) -> f64 {
    sample_correlation(&log_returns(paths, s0, i), &log_returns(paths, s0, j))
}

/// Pairwise log-return correlation matrix over all assets.
pub fn log_return_correlation_matrix(paths: &PricePaths, s0: f64) -> Vec<Vec<f64>> {
    let returns: Vec<Vec<f64>> = (0..paths.n_assets())
        .map(|asset| log_returns(paths, s0, asset))
        .collect();

    returns
        .iter()
        .map(|a| returns.iter().map(|b| sample_correlation(a, b)).collect())
        .collect()
}
