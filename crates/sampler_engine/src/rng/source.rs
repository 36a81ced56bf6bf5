//! The uniform-variate capability consumed by the sampling engine.

use super::prng::SamplerRng;

/// A source of independent uniform(0, 1) variates.
///
/// The engine calls [`uniform`](Self::uniform) once per proposal draw and
/// once per acceptance test. Implementations own their state and advance it
/// on every call; a deterministically seeded source must yield the same
/// sequence for the same seed and call pattern.
pub trait UniformSource {
    /// Returns the next variate in [0, 1).
    fn uniform(&mut self) -> f64;
}

impl UniformSource for SamplerRng {
    #[inline]
    fn uniform(&mut self) -> f64 {
        self.gen_uniform()
    }
}

impl<U: UniformSource + ?Sized> UniformSource for &mut U {
    #[inline]
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}
