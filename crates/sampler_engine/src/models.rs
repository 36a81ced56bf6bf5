//! Ready-made proposal distributions.
//!
//! A [`Proposal`] knows both its density and how to turn a uniform variate
//! into a draw. Pairing one with a target density via
//! [`Proposal::with_target`] yields a [`DistributionModel`].
//!
//! # Examples
//!
//! ```rust
//! use sampler_engine::models::{Proposal, UniformProposal};
//! use sampler_engine::rejection::{RejectionSampler, SamplerConfig};
//! use std::f64::consts::PI;
//!
//! let model = UniformProposal::new(0.0, PI).unwrap().with_target(f64::sin);
//!
//! let config = SamplerConfig::builder().seed(1).build().unwrap();
//! let samples = RejectionSampler::new(config)
//!     .unwrap()
//!     .sample(&model, 5.0, 100)
//!     .unwrap();
//! assert_eq!(samples.len(), 100);
//! ```

use crate::model::{Density, DistributionModel};
use crate::rejection::ConfigError;

/// A proposal distribution with a known density and sampler.
pub trait Proposal {
    /// Density of the proposal at `x`.
    fn density(&self, x: f64) -> f64;

    /// Maps a uniform(0, 1) variate to a proposal draw.
    fn sample(&self, u: f64) -> f64;

    /// Pairs this proposal with a target density.
    fn with_target<T: Density>(self, target: T) -> TargetOver<T, Self>
    where
        Self: Sized,
    {
        TargetOver {
            target,
            proposal: self,
        }
    }
}

/// A target density sampled through a [`Proposal`].
#[derive(Clone, Copy, Debug)]
pub struct TargetOver<T, Q> {
    target: T,
    proposal: Q,
}

impl<T, Q> TargetOver<T, Q> {
    /// Returns the proposal distribution.
    pub fn proposal_distribution(&self) -> &Q {
        &self.proposal
    }
}

impl<T: Density, Q: Proposal> DistributionModel for TargetOver<T, Q> {
    #[inline]
    fn target(&self, x: f64) -> f64 {
        self.target.evaluate(x)
    }

    #[inline]
    fn proposal(&self, x: f64) -> f64 {
        self.proposal.density(x)
    }

    #[inline]
    fn draw(&self, u: f64) -> f64 {
        self.proposal.sample(u)
    }
}

/// Uniform distribution on `[lower, upper)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformProposal {
    lower: f64,
    upper: f64,
}

impl UniformProposal {
    /// Creates a uniform proposal on `[lower, upper)`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` unless both bounds are finite
    /// and `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, ConfigError> {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(ConfigError::InvalidParameter {
                name: "bounds",
                value: format!("require finite lower < upper, got [{}, {})", lower, upper),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Lower bound of the support.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound of the support.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[inline]
    fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl Proposal for UniformProposal {
    #[inline]
    fn density(&self, x: f64) -> f64 {
        if x >= self.lower && x <= self.upper {
            1.0 / self.width()
        } else {
            0.0
        }
    }

    #[inline]
    fn sample(&self, u: f64) -> f64 {
        self.lower + self.width() * u
    }
}

/// Exponential distribution with the given rate on `[0, inf)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExponentialProposal {
    rate: f64,
}

impl ExponentialProposal {
    /// Creates an exponential proposal.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` unless `rate` is positive and finite.
    pub fn new(rate: f64) -> Result<Self, ConfigError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "rate",
                value: format!("must be positive and finite, got {}", rate),
            });
        }
        Ok(Self { rate })
    }

    /// The rate parameter.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Proposal for ExponentialProposal {
    #[inline]
    fn density(&self, x: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else {
            self.rate * (-self.rate * x).exp()
        }
    }

    /// Inverse CDF; `u` in [0, 1) keeps the logarithm finite.
    #[inline]
    fn sample(&self, u: f64) -> f64 {
        -(1.0 - u).ln() / self.rate
    }
}
