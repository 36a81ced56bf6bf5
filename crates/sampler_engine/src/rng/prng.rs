//! Pseudo-random number generator wrapper for rejection sampling.
//!
//! This module provides [`SamplerRng`], a seeded PRNG wrapper that offers
//! reproducible uniform variates with efficient batch operations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random number generator used by the rejection sampler.
///
/// Provides seeded, reproducible uniform random number generation. The seed
/// is retained so that any run can be replayed exactly.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::rng::SamplerRng;
///
/// let mut rng = SamplerRng::from_seed(42);
///
/// // Single value generation
/// let u: f64 = rng.gen_uniform();
///
/// // Batch generation (zero allocation)
/// let mut buffer = vec![0.0; 100];
/// rng.fill_uniform(&mut buffer);
/// ```
#[derive(Clone, Debug)]
pub struct SamplerRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation (stored for reproducibility tracking).
    seed: u64,
}

impl SamplerRng {
    /// Creates a new RNG instance initialised with the given seed.
    ///
    /// The same seed will always produce the same sequence of random numbers,
    /// enabling reproducible sampling runs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_engine::rng::SamplerRng;
    ///
    /// let mut rng1 = SamplerRng::from_seed(12345);
    /// let mut rng2 = SamplerRng::from_seed(12345);
    ///
    /// // Same seed produces identical sequences
    /// assert_eq!(rng1.gen_uniform(), rng2.gen_uniform());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a new RNG instance with a seed drawn from the thread-local
    /// entropy source.
    ///
    /// The chosen seed is still recorded, so [`seed`](Self::seed) can be
    /// logged and the run replayed with [`from_seed`](Self::from_seed).
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random::<u64>())
    }

    /// Returns the seed used for initialisation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_engine::rng::SamplerRng;
    ///
    /// let rng = SamplerRng::from_seed(42);
    /// assert_eq!(rng.seed(), 42);
    /// ```
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single uniform random value in [0, 1).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_engine::rng::SamplerRng;
    ///
    /// let mut rng = SamplerRng::from_seed(42);
    /// let value = rng.gen_uniform();
    /// assert!(value >= 0.0 && value < 1.0);
    /// ```
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Fills the buffer with uniform random values in [0, 1).
    ///
    /// This is a zero-allocation operation; the buffer must be pre-allocated
    /// by the caller. Empty buffers are handled gracefully (no operation).
    ///
    /// Filling a buffer consumes the generator exactly as the same number of
    /// [`gen_uniform`](Self::gen_uniform) calls would.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_engine::rng::SamplerRng;
    ///
    /// let mut rng = SamplerRng::from_seed(42);
    /// let mut buffer = vec![0.0; 1000];
    /// rng.fill_uniform(&mut buffer);
    ///
    /// for &value in &buffer {
    ///     assert!(value >= 0.0 && value < 1.0);
    /// }
    /// ```
    #[inline]
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.inner.gen();
        }
    }
}
