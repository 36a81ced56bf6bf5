//! Rejection sampling kernel.
//!
//! This module provides the accept/reject engine, its configuration, and the
//! batched proposal queue it draws candidates from.
//!
//! # Architecture
//!
//! ```text
//! RejectionSampler
//! ├── SamplerConfig     (batch size, seed, attempt ceiling, envelope policy)
//! ├── UniformSource     (SamplerRng by default)
//! └── Orchestration (per call)
//!     ├── ProposalBatcher::refill()   model.draw(u) × batch_size
//!     ├── acceptance_ratio()          target(x) / (k · proposal(x))
//!     └── accept when u <= ratio
//! ```
//!
//! # Examples
//!
//! ## Sampling a density known up to a constant
//!
//! ```rust
//! use sampler_engine::model::FnModel;
//! use sampler_engine::rejection::{RejectionSampler, SamplerConfig};
//!
//! let config = SamplerConfig::builder()
//!     .batch_size(1_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let mut sampler = RejectionSampler::new(config).unwrap();
//!
//! // Unnormalised Beta(2, 2) on [0, 1]; x(1 - x) <= 1/4 under a uniform envelope.
//! let model = FnModel::new(|x: f64| x * (1.0 - x), |_x: f64| 1.0, |u: f64| u);
//!
//! let outcome = sampler.sample_with_stats(&model, 0.25, 10_000).unwrap();
//! assert_eq!(outcome.samples.len(), 10_000);
//! println!("acceptance rate: {:.3}", outcome.stats.acceptance_rate());
//! ```
//!
//! ## Bounding a run
//!
//! ```rust
//! use sampler_engine::model::FnModel;
//! use sampler_engine::rejection::{RejectionSampler, SamplerConfig, SamplingError};
//!
//! let config = SamplerConfig::builder()
//!     .seed(7)
//!     .max_attempts(1_000)
//!     .build()
//!     .unwrap();
//! let mut sampler = RejectionSampler::new(config).unwrap();
//!
//! // The target lives where the proposal never lands.
//! let model = FnModel::new(|x: f64| if x > 1.0 { 1.0 } else { 0.0 }, |_x: f64| 1.0, |u: f64| u);
//!
//! let result = sampler.sample(&model, 1.0, 10);
//! assert!(matches!(result, Err(SamplingError::ExhaustedAttempts { .. })));
//! ```

pub mod batcher;
pub mod cancel;
pub mod config;
pub mod engine;
pub mod error;

// Re-exports for convenient access
pub use batcher::ProposalBatcher;
pub use cancel::CancellationToken;
pub use config::{
    EnvelopeCheck, SamplerConfig, SamplerConfigBuilder, DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE,
};
pub use engine::{
    acceptance_ratio, rejection_sampling, RejectionSampler, SamplingOutcome, SamplingStats,
};
pub use error::{ConfigError, SamplingError};
