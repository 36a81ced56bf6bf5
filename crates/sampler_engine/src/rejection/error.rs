//! Error types for the rejection sampler.
//!
//! This module defines structured error types for configuration validation
//! and for failures of individual sampling calls.

use thiserror::Error;

/// Configuration error for the rejection sampler.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Batch size outside valid range [1, 10_000_000].
    #[error("Invalid batch size {0}: must be in range [1, 10_000_000]")]
    InvalidBatchSize(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Failure of a single sampling call.
///
/// No partial results are returned with any of these variants.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SamplingError {
    /// An argument or a callback result is unusable.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configured ceiling on acceptance tests was reached.
    #[error("Exhausted {attempts} attempts with {accepted} of {requested} samples accepted")]
    ExhaustedAttempts {
        /// Acceptance tests performed.
        attempts: u64,
        /// Samples accepted before giving up.
        accepted: usize,
        /// Samples requested.
        requested: usize,
    },

    /// The run was cancelled through its cancellation token.
    #[error("Sampling cancelled with {accepted} of {requested} samples accepted")]
    Cancelled {
        /// Samples accepted before cancellation.
        accepted: usize,
        /// Samples requested.
        requested: usize,
    },

    /// `target(x) > k * proposal(x)` was observed under strict envelope checking.
    #[error("Envelope bound violated at x = {x}: acceptance ratio {ratio} exceeds 1")]
    EnvelopeViolation {
        /// The proposal at which the bound failed.
        x: f64,
        /// The observed acceptance ratio.
        ratio: f64,
    },

    /// The sampler configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SamplingError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
