//! Evaluation time grids.
//!
//! Times are expressed in years from the simulation start. The first step
//! runs from an implicit `t = 0` to the first evaluation time.

use pathsim_core::types::ConfigurationError;

/// Trading days per year used by [`EvaluationTimes::daily`].
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Ordered evaluation times, in years.
///
/// Construction is unchecked; [`EvaluationTimes::time_deltas`] validates at
/// the start of every simulation call.
///
/// # Examples
///
/// ```rust
/// use pathsim_engine::mc::EvaluationTimes;
///
/// let times = EvaluationTimes::from(vec![0.25, 0.5, 1.0]);
/// assert_eq!(times.time_deltas().unwrap(), vec![0.25, 0.25, 0.5]);
///
/// // A scalar is a single evaluation time
/// let single = EvaluationTimes::from(2.0);
/// assert_eq!(single.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationTimes(Vec<f64>);

impl EvaluationTimes {
    /// Wraps a sequence of times.
    pub fn new(times: Vec<f64>) -> Self {
        Self(times)
    }

    /// Evenly spaced grid `step_size, 2 * step_size, ..., steps * step_size`.
    pub fn uniform(steps: usize, step_size: f64) -> Self {
        Self((1..=steps).map(|k| k as f64 * step_size).collect())
    }

    /// `steps` consecutive trading days.
    pub fn daily(steps: usize) -> Self {
        Self::uniform(steps, 1.0 / TRADING_DAYS_PER_YEAR)
    }

    /// Number of evaluation times.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no evaluation times.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw times.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Validates the grid and returns the per-step deltas
    /// `[t0 - 0, t1 - t0, ...]`.
    ///
    /// # Errors
    ///
    /// - `EmptyEvaluationTimes` for an empty grid
    /// - `InvalidEvaluationTime` for a negative or non-finite time
    /// - `NonIncreasingTimes` unless strictly increasing
    pub fn time_deltas(&self) -> Result<Vec<f64>, ConfigurationError> {
        if self.0.is_empty() {
            return Err(ConfigurationError::EmptyEvaluationTimes);
        }

        let mut deltas = Vec::with_capacity(self.0.len());
        let mut previous = 0.0;

        for (index, &current) in self.0.iter().enumerate() {
            if !current.is_finite() || current < 0.0 {
                return Err(ConfigurationError::InvalidEvaluationTime {
                    index,
                    value: current,
                });
            }
            if index > 0 && current <= previous {
                return Err(ConfigurationError::NonIncreasingTimes {
                    index,
                    previous,
                    current,
                });
            }
            deltas.push(current - previous);
            previous = current;
        }

        Ok(deltas)
    }
}

impl From<f64> for EvaluationTimes {
    fn from(time: f64) -> Self {
        Self(vec![time])
    }
}

impl From<Vec<f64>> for EvaluationTimes {
    fn from(times: Vec<f64>) -> Self {
        Self(times)
    }
}

impl From<&[f64]> for EvaluationTimes {
    fn from(times: &[f64]) -> Self {
        Self(times.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for EvaluationTimes {
    fn from(times: [f64; N]) -> Self {
        Self(times.to_vec())
    }
}

impl From<&EvaluationTimes> for EvaluationTimes {
    fn from(times: &EvaluationTimes) -> Self {
        times.clone()
    }
}
