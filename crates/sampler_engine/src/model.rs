//! Caller-supplied densities and proposal samplers.
//!
//! The engine never inspects a model's internals; it only calls the three
//! capabilities described by [`DistributionModel`]. Any `Fn(f64) -> f64`
//! is a [`Density`], so closures, function pointers and user types all plug
//! in without dynamic dispatch.
//!
//! # Examples
//!
//! ```rust
//! use sampler_engine::model::{DistributionModel, FnModel};
//!
//! // Target x^3 / 3 on [0, 1] with a uniform proposal.
//! let model = FnModel::new(|x: f64| x.powi(3) / 3.0, |_x: f64| 1.0, |u: f64| u);
//!
//! assert_eq!(model.draw(0.5), 0.5);
//! assert_eq!(model.proposal(0.5), 1.0);
//! ```

/// A unary real-valued function called by the engine.
///
/// Implementations must be safe to call repeatedly with arbitrary inputs and
/// should behave as pure functions; the engine calls them sequentially and
/// never concurrently.
pub trait Density {
    /// Evaluates the function at `x`.
    fn evaluate(&self, x: f64) -> f64;
}

impl<F> Density for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}

/// The capability triple the rejection sampler draws from.
///
/// # Envelope precondition
///
/// For an envelope constant `k`, callers must ensure
/// `target(x) <= k * proposal(x)` everywhere [`draw`](Self::draw) can land.
/// The engine does not enforce this: where the bound fails the acceptance
/// ratio exceeds one, the point is always accepted, and the output is biased
/// towards that region.
pub trait DistributionModel {
    /// Unnormalised target density to sample from.
    fn target(&self, x: f64) -> f64;

    /// Unnormalised density of the proposal (envelope) distribution.
    fn proposal(&self, x: f64) -> f64;

    /// Maps a uniform(0, 1) variate to a draw from the proposal distribution,
    /// typically via the proposal's inverse CDF.
    fn draw(&self, u: f64) -> f64;
}

impl<M: DistributionModel + ?Sized> DistributionModel for &M {
    #[inline]
    fn target(&self, x: f64) -> f64 {
        (**self).target(x)
    }

    #[inline]
    fn proposal(&self, x: f64) -> f64 {
        (**self).proposal(x)
    }

    #[inline]
    fn draw(&self, u: f64) -> f64 {
        (**self).draw(u)
    }
}

/// A [`DistributionModel`] assembled from three independent callables.
///
/// This is the shape of the free-function entry point: target density,
/// proposal density and proposal sampler supplied separately.
#[derive(Clone, Copy, Debug)]
pub struct FnModel<T, P, S> {
    target: T,
    proposal: P,
    sampler: S,
}

impl<T, P, S> FnModel<T, P, S>
where
    T: Density,
    P: Density,
    S: Density,
{
    /// Bundles a target density, a proposal density and a proposal sampler.
    pub fn new(target: T, proposal: P, sampler: S) -> Self {
        Self {
            target,
            proposal,
            sampler,
        }
    }
}

impl<T, P, S> DistributionModel for FnModel<T, P, S>
where
    T: Density,
    P: Density,
    S: Density,
{
    #[inline]
    fn target(&self, x: f64) -> f64 {
        self.target.evaluate(x)
    }

    #[inline]
    fn proposal(&self, x: f64) -> f64 {
        self.proposal.evaluate(x)
    }

    #[inline]
    fn draw(&self, u: f64) -> f64 {
        self.sampler.evaluate(u)
    }
}
