//! Built-in sampling scenarios.
//!
//! Each scenario pairs a target density with a proposal whose envelope
//! constant is known in closed form, so runs can be checked against the
//! exact distribution.

use clap::ValueEnum;
use sampler_engine::models::{ExponentialProposal, Proposal, UniformProposal};
use sampler_engine::rejection::{CancellationToken, RejectionSampler, SamplingOutcome};
use sampler_engine::{FnModel, SamplingError};
use serde::Serialize;
use std::f64::consts::PI;

/// A target density with its proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// sin(x) on [0, pi] under a uniform proposal
    Sine,
    /// x^3 / 3 on [0, 1] under a uniform proposal
    Cubic,
    /// exp(-x^2 / 2) on [0, inf) under a unit-rate exponential proposal
    HalfNormal,
}

impl Scenario {
    /// Envelope constant used when none is given.
    pub fn default_k(self) -> f64 {
        match self {
            // pi * sin(x) <= pi; 5 leaves headroom
            Scenario::Sine => 5.0,
            Scenario::Cubic => 1.0,
            // exp(x - x^2 / 2) peaks at x = 1
            Scenario::HalfNormal => 0.5_f64.exp(),
        }
    }

    /// Range covered by the summary histogram.
    pub fn histogram_range(self) -> (f64, f64) {
        match self {
            Scenario::Sine => (0.0, PI),
            Scenario::Cubic => (0.0, 1.0),
            Scenario::HalfNormal => (0.0, 5.0),
        }
    }

    /// CDF of the normalised target, where it has a closed form.
    pub fn reference_cdf(self) -> Option<fn(f64) -> f64> {
        match self {
            Scenario::Sine => Some(|x: f64| (1.0 - x.clamp(0.0, PI).cos()) / 2.0),
            Scenario::Cubic => Some(|x: f64| x.clamp(0.0, 1.0).powi(4)),
            Scenario::HalfNormal => None,
        }
    }

    /// Mean of the normalised target.
    pub fn reference_mean(self) -> f64 {
        match self {
            Scenario::Sine => PI / 2.0,
            Scenario::Cubic => 0.8,
            Scenario::HalfNormal => (2.0 / PI).sqrt(),
        }
    }

    /// Draws `count` samples with `sampler`.
    pub fn sample(
        self,
        sampler: &mut RejectionSampler,
        k: f64,
        count: usize,
        token: &CancellationToken,
    ) -> Result<SamplingOutcome, SamplingError> {
        match self {
            Scenario::Sine => {
                let model = UniformProposal::new(0.0, PI)?.with_target(f64::sin);
                sampler.sample_with_cancel(&model, k, count, token)
            }
            Scenario::Cubic => {
                let model = FnModel::new(|x: f64| x.powi(3) / 3.0, |_x: f64| 1.0, |u: f64| u);
                sampler.sample_with_cancel(&model, k, count, token)
            }
            Scenario::HalfNormal => {
                let model =
                    ExponentialProposal::new(1.0)?.with_target(|x: f64| (-0.5 * x * x).exp());
                sampler.sample_with_cancel(&model, k, count, token)
            }
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Scenario::Sine => "sine",
            Scenario::Cubic => "cubic",
            Scenario::HalfNormal => "half-normal",
        };
        write!(f, "{}", name)
    }
}
