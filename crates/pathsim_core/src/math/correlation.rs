//! Correlation matrices and their Cholesky factor.
//!
//! Given `n` independent standard normal variates `Z = [Z1, ..., Zn]`,
//! correlated variates `W` are obtained as
//!
//! ```text
//! W = L * Z,    C = L * L^T
//! ```
//!
//! where `L` is the lower triangular Cholesky factor of the correlation
//! matrix `C`.
//!
//! ## Semi-definite input
//!
//! Perfectly (anti-)correlated assets give a singular but valid correlation
//! matrix. The factoriser accepts positive semi-definite input: a pivot
//! within [`PSD_TOLERANCE`] of zero produces a zero column, provided the
//! rest of that column is numerically zero as well.
//!
//! ## Usage
//!
//! ```
//! use pathsim_core::math::correlation::CorrelationMatrix;
//!
//! let corr = CorrelationMatrix::from_rows(&[
//!     vec![1.0_f64, 0.5],
//!     vec![0.5, 1.0],
//! ]).unwrap();
//!
//! let cholesky = corr.cholesky().unwrap();
//!
//! let mut w = [0.5_f64, 0.8];
//! cholesky.correlate_strided(&mut w, 0, 1);
//! assert_eq!(w[0], 0.5);
//! assert!((w[1] - (0.25 + 0.8 * 0.75_f64.sqrt())).abs() < 1e-15);
//! ```

use num_traits::Float;

use crate::types::{ConfigurationError, DecompositionError, SimulationError};

/// Absolute tolerance for zero pivots and for the symmetry check.
pub const PSD_TOLERANCE: f64 = 1e-10;

/// Square correlation matrix in row-major order.
///
/// Construction only checks the shape. Symmetry, finiteness and positive
/// semi-definiteness are checked by [`CorrelationMatrix::cholesky`], since
/// a failure there is a [`DecompositionError`] rather than a configuration
/// problem.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationMatrix<T: Float> {
    /// Matrix elements in row-major order
    data: Vec<T>,
    /// Matrix dimension (n x n)
    dim: usize,
}

impl<T: Float> CorrelationMatrix<T> {
    /// Builds a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::NotSquare` if any row length differs from the
    /// number of rows.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, ConfigurationError> {
        let dim = rows.len();
        let mut data = Vec::with_capacity(dim * dim);

        for (row, values) in rows.iter().enumerate() {
            if values.len() != dim {
                return Err(ConfigurationError::NotSquare {
                    row,
                    expected: dim,
                    got: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self { data, dim })
    }

    /// Builds a `dim x dim` matrix from row-major data.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::DimensionMismatch` unless `data.len() == dim * dim`.
    pub fn from_flat(data: Vec<T>, dim: usize) -> Result<Self, ConfigurationError> {
        if data.len() != dim * dim {
            return Err(ConfigurationError::DimensionMismatch {
                expected: dim * dim,
                got: data.len(),
            });
        }
        Ok(Self { data, dim })
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.dim + j]
    }

    /// Copies the matrix back into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.dim == 0 {
            return Vec::new();
        }
        self.data.chunks(self.dim).map(|row| row.to_vec()).collect()
    }

    /// Computes the lower triangular factor `L` with `C = L * L^T`.
    ///
    /// # Errors
    ///
    /// - `DecompositionError::NonFinite` for NaN or infinite entries
    /// - `DecompositionError::NotSymmetric` if `C[i][j] != C[j][i]`
    /// - `DecompositionError::NotPositiveSemidefinite` if elimination
    ///   produces a negative pivot, or a zero pivot with a non-zero column
    ///
    /// # Notes
    ///
    /// The diagonal is not required to be 1. A matrix such as
    /// `[[4, 0], [0, 4]]` factorises and scales every shock by 2, which in
    /// turn scales the effective volatilities.
    pub fn cholesky(&self) -> Result<CholeskyFactor<T>, DecompositionError> {
        let n = self.dim;
        let tol = T::from(PSD_TOLERANCE).unwrap_or_else(T::epsilon);

        for i in 0..n {
            for j in 0..n {
                if !self.get(i, j).is_finite() {
                    return Err(DecompositionError::NonFinite { i, j });
                }
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return Err(DecompositionError::NotSymmetric { i, j });
                }
            }
        }

        let mut lower = vec![T::zero(); n * n];

        for j in 0..n {
            let mut sum = T::zero();
            for k in 0..j {
                let l_jk = lower[j * n + k];
                sum = sum + l_jk * l_jk;
            }
            let pivot = self.get(j, j) - sum;

            if pivot < -tol {
                return Err(DecompositionError::NotPositiveSemidefinite {
                    pivot: j,
                    value: pivot.to_f64().unwrap_or(f64::NAN),
                });
            }

            if pivot <= tol {
                // Singular direction when the rest of the column vanishes too.
                let column_vanishes = ((j + 1)..n)
                    .all(|i| (self.get(i, j) - dot_prefix(&lower, n, i, j)).abs() <= tol);
                if column_vanishes {
                    continue;
                }
                // Tiny positive pivots are still factorised normally.
                if pivot <= T::zero() {
                    return Err(DecompositionError::NotPositiveSemidefinite {
                        pivot: j,
                        value: pivot.to_f64().unwrap_or(f64::NAN),
                    });
                }
            }

            let l_jj = pivot.sqrt();
            lower[j * n + j] = l_jj;
            for i in (j + 1)..n {
                lower[i * n + j] = (self.get(i, j) - dot_prefix(&lower, n, i, j)) / l_jj;
            }
        }

        Ok(CholeskyFactor { data: lower, dim: n })
    }
}

/// `sum_{k < j} L[i][k] * L[j][k]`
#[inline]
fn dot_prefix<T: Float>(lower: &[T], n: usize, i: usize, j: usize) -> T {
    let mut sum = T::zero();
    for k in 0..j {
        sum = sum + lower[i * n + k] * lower[j * n + k];
    }
    sum
}

#[cfg(feature = "serde")]
impl serde::Serialize for CorrelationMatrix<f64> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.to_rows(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CorrelationMatrix<f64> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows: Vec<Vec<f64>> = serde::Deserialize::deserialize(deserializer)?;
        Self::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}

/// Lower triangular Cholesky factor of a correlation matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor<T: Float> {
    /// Lower triangular matrix elements (row-major)
    data: Vec<T>,
    /// Matrix dimension
    dim: usize,
}

impl<T: Float> CholeskyFactor<T> {
    /// Identity factor. For `dim == 1` this is the scalar 1.
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![T::zero(); dim * dim];
        for i in 0..dim {
            data[i * dim + i] = T::one();
        }
        Self { data, dim }
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j); zero above the diagonal.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        if j > i {
            T::zero()
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Returns `true` if the factor is exactly the identity.
    ///
    /// Shock generation skips the matrix product in that case, so the
    /// independent draws pass through untouched.
    pub fn is_identity(&self) -> bool {
        let n = self.dim;
        (0..n).all(|i| {
            (0..=i).all(|j| {
                let expected = if i == j { T::one() } else { T::zero() };
                self.data[i * n + j] == expected
            })
        })
    }

    /// Computes `L * L^T`.
    pub fn reconstruct(&self) -> Vec<Vec<T>> {
        let n = self.dim;
        let mut out = vec![vec![T::zero(); n]; n];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let mut sum = T::zero();
                for k in 0..=i.min(j) {
                    sum = sum + self.get(i, k) * self.get(j, k);
                }
                *cell = sum;
            }
        }
        out
    }

    /// Applies `L` in place to the vector stored at
    /// `data[offset], data[offset + stride], ...`.
    ///
    /// Entries are written bottom-up, so entry `i` only reads entries
    /// `0..=i` that are still uncorrelated. A contiguous vector is
    /// `offset = 0, stride = 1`; a column of a row-major matrix with `t`
    /// columns is `offset = column, stride = t`.
    ///
    /// # Panics
    ///
    /// Panics if the last element lies outside `data`.
    pub fn correlate_strided(&self, data: &mut [T], offset: usize, stride: usize) {
        if self.dim == 0 {
            return;
        }
        let last = offset + (self.dim - 1) * stride;
        assert!(
            last < data.len(),
            "strided vector ends at index {} but buffer holds {} values",
            last,
            data.len()
        );

        for i in (0..self.dim).rev() {
            let row = &self.data[i * self.dim..i * self.dim + i + 1];
            let mut sum = T::zero();
            for (j, &l_ij) in row.iter().enumerate() {
                sum = sum + l_ij * data[offset + j * stride];
            }
            data[offset + i * stride] = sum;
        }
    }
}

/// Produces the correlation factor for an `n`-asset simulation.
///
/// - `n == 1`: the scalar factor 1; `rho` is not consulted.
/// - `n > 1`: `rho` must be present and `n x n`, then it is factorised.
///
/// # Errors
///
/// - `ConfigurationError::MissingCorrelation` if `n > 1` and `rho` is absent
/// - `ConfigurationError::DimensionMismatch` if `rho` is not `n x n`
/// - any [`DecompositionError`] from [`CorrelationMatrix::cholesky`]
pub fn correlation_factor<T: Float>(
    n: usize,
    rho: Option<&CorrelationMatrix<T>>,
) -> Result<CholeskyFactor<T>, SimulationError> {
    debug_assert!(n > 0, "asset count must be positive");

    if n == 1 {
        return Ok(CholeskyFactor::identity(1));
    }

    let rho = rho.ok_or(ConfigurationError::MissingCorrelation { dimension: n })?;
    if rho.dim() != n {
        return Err(ConfigurationError::DimensionMismatch {
            expected: n,
            got: rho.dim(),
        }
        .into());
    }

    Ok(rho.cholesky()?)
}
