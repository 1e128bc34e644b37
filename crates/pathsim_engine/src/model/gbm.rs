//! Geometric Brownian Motion configuration.
//!
//! Each asset follows
//! ```text
//! dS_i = r * S_i * dt + sigma_i * S_i * dW_i,    d<W_i, W_j> = rho_ij dt
//! ```
//! with a single drift `r` and a single initial price shared by all assets.
//! Only volatility and correlation vary per asset.

use pathsim_core::math::correlation::{CorrelationMatrix, PSD_TOLERANCE};
use pathsim_core::types::ConfigurationError;

/// Validated GBM parameter set.
///
/// Immutable after construction. The number of assets is always
/// `sigma().len()`; a scalar volatility is simply a one-element vector.
///
/// # Examples
///
/// ```rust
/// use pathsim_engine::model::GbmConfig;
/// use pathsim_core::math::correlation::CorrelationMatrix;
///
/// let rho = CorrelationMatrix::from_rows(&[vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
/// let config = GbmConfig::new(100.0, vec![0.2, 0.3], 0.03, Some(rho)).unwrap();
/// assert_eq!(config.dimension(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GbmConfig {
    initial_price: f64,
    sigma: Vec<f64>,
    r: f64,
    rho: Option<CorrelationMatrix<f64>>,
}

impl GbmConfig {
    /// Validates and builds a configuration.
    ///
    /// With a single asset the correlation matrix plays no role and is
    /// dropped.
    ///
    /// # Errors
    ///
    /// - `InvalidInitialPrice` unless `initial_price` is positive and finite
    /// - `EmptyVolatility` if `sigma` is empty
    /// - `MissingCorrelation` if there are several assets and no `rho`
    /// - `DimensionMismatch` if `rho` is not `n x n`
    pub fn new(
        initial_price: f64,
        sigma: Vec<f64>,
        r: f64,
        rho: Option<CorrelationMatrix<f64>>,
    ) -> Result<Self, ConfigurationError> {
        if !(initial_price > 0.0 && initial_price.is_finite()) {
            return Err(ConfigurationError::InvalidInitialPrice(initial_price));
        }
        if sigma.is_empty() {
            return Err(ConfigurationError::EmptyVolatility);
        }

        let n = sigma.len();
        let rho = if n == 1 {
            if rho.is_some() {
                tracing::debug!("single asset: correlation matrix ignored");
            }
            None
        } else {
            let rho = rho.ok_or(ConfigurationError::MissingCorrelation { dimension: n })?;
            if rho.dim() != n {
                return Err(ConfigurationError::DimensionMismatch {
                    expected: n,
                    got: rho.dim(),
                });
            }
            if let Some(i) = (0..n).find(|&i| (rho.get(i, i) - 1.0).abs() > PSD_TOLERANCE) {
                tracing::warn!(
                    asset = i,
                    diagonal = rho.get(i, i),
                    "correlation matrix diagonal is not 1; shocks for this asset are rescaled"
                );
            }
            Some(rho)
        };

        Ok(Self {
            initial_price,
            sigma,
            r,
            rho,
        })
    }

    /// Single-asset configuration.
    pub fn single(initial_price: f64, sigma: f64, r: f64) -> Result<Self, ConfigurationError> {
        Self::new(initial_price, vec![sigma], r, None)
    }

    /// Initial price s₀, shared by every asset.
    #[inline]
    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Annualised volatility per asset.
    #[inline]
    pub fn sigma(&self) -> &[f64] {
        &self.sigma
    }

    /// Drift, shared by every asset.
    #[inline]
    pub fn r(&self) -> f64 {
        self.r
    }

    /// Correlation matrix; `None` for a single asset.
    #[inline]
    pub fn rho(&self) -> Option<&CorrelationMatrix<f64>> {
        self.rho.as_ref()
    }

    /// Number of simulated assets.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.sigma.len()
    }
}
