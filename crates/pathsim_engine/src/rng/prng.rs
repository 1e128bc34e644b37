//! Pseudo-random number generator wrapper and the normal-draw seam.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Source of independent standard normal variates.
///
/// Implemented for every `rand::RngCore`, so the engine accepts `StdRng`,
/// `ThreadRng`, [`SimRng`] or any other generator the caller prefers.
pub trait NormalSource {
    /// Fills `buffer` with independent N(0, 1) draws.
    fn fill_standard_normal(&mut self, buffer: &mut [f64]);
}

impl<R: RngCore + ?Sized> NormalSource for R {
    #[inline]
    fn fill_standard_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(self);
        }
    }
}

/// Simulation random number generator.
///
/// Thin wrapper around `StdRng` that remembers how it was initialised, so a
/// trial can be logged and replayed.
///
/// # Examples
///
/// ```rust
/// use pathsim_engine::rng::{NormalSource, SimRng};
///
/// let mut rng1 = SimRng::from_seed(42);
/// let mut rng2 = SimRng::from_seed(42);
///
/// let mut a = [0.0; 4];
/// let mut b = [0.0; 4];
/// rng1.fill_standard_normal(&mut a);
/// rng2.fill_standard_normal(&mut b);
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Debug)]
pub struct SimRng {
    inner: StdRng,
    /// `None` when seeded from OS entropy.
    seed: Option<u64>,
}

impl SimRng {
    /// Creates a generator initialised with the given seed.
    ///
    /// The same seed always produces the same sequence.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Creates a generator seeded from operating system entropy.
    #[inline]
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seed used for initialisation, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Draws a single standard normal variate (Ziggurat, via `rand_distr`).
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }
}

impl RngCore for SimRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
