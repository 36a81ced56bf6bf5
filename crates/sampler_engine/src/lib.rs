//! # Sampler Engine
//!
//! Monte Carlo rejection sampling for univariate densities.
//!
//! Given a target density `f`, a proposal density `g` with a sampler, and an
//! envelope constant `k` such that `f(x) <= k * g(x)` on the proposal's
//! support, the engine produces independent draws distributed according to
//! `f` (which need not be normalised).
//!
//! This crate provides:
//! - [`rng`]: seeded uniform variates and the [`UniformSource`](rng::UniformSource) trait
//! - [`model`]: the [`DistributionModel`](model::DistributionModel) capability triple
//! - [`rejection`]: the accept/reject engine with batched proposal generation
//! - [`models`]: ready-made uniform and exponential proposals
//! - [`stats`]: Kolmogorov–Smirnov distance and histograms for checking output
//!
//! ## Usage Example
//!
//! ```rust
//! use sampler_engine::rejection_sampling;
//! use std::f64::consts::PI;
//!
//! // sin(x) on [0, pi], uniform envelope 1/pi, k = 5 bounds pi * sin(x).
//! let samples = rejection_sampling(
//!     f64::sin,
//!     |_x: f64| 1.0 / PI,
//!     |u: f64| PI * u,
//!     5.0,
//!     10_000,
//! )
//! .unwrap();
//!
//! assert_eq!(samples.len(), 10_000);
//! ```
//!
//! ## Known Constraints
//!
//! - **Envelope bound**: not verified unless
//!   [`EnvelopeCheck::Strict`](rejection::EnvelopeCheck::Strict) is configured;
//!   a violated bound silently biases the output
//! - **Termination**: guaranteed only when the acceptance probability is
//!   positive where the proposal lands; configure `max_attempts` or use a
//!   [`CancellationToken`](rejection::CancellationToken) otherwise
//! - **Single-threaded**: one call runs synchronously on the caller's thread

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod model;
pub mod models;
pub mod rejection;
pub mod rng;
pub mod stats;

// Re-export commonly used items for convenience
pub use model::{Density, DistributionModel, FnModel};
pub use rejection::{
    rejection_sampling, CancellationToken, ConfigError, EnvelopeCheck, RejectionSampler,
    SamplerConfig, SamplingError, SamplingOutcome, SamplingStats,
};
pub use rng::{SamplerRng, UniformSource};
