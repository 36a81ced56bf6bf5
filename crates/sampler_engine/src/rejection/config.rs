//! Rejection sampler configuration.
//!
//! This module provides configuration types and builders for the rejection
//! sampling engine. None of these settings changes which samples the
//! accept/reject test produces for a given random stream; they tune batching
//! and bound the run.

use super::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of proposals generated per refill when no batch size is configured.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Maximum number of proposals per batch.
pub const MAX_BATCH_SIZE: usize = 10_000_000;

/// Handling of acceptance ratios above one.
///
/// A ratio above one means the supplied envelope constant does not bound
/// `target / proposal` at that point. The ratio is never clamped; this
/// policy only controls how the violation is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EnvelopeCheck {
    /// Track the maximum ratio in the run statistics only.
    #[default]
    Ignore,

    /// Emit one warning per run the first time a ratio exceeds one.
    Warn,

    /// Fail the run with `SamplingError::EnvelopeViolation`.
    Strict,
}

/// Rejection sampler configuration.
///
/// Immutable configuration specifying engine parameters.
/// Use [`SamplerConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::rejection::{EnvelopeCheck, SamplerConfig};
///
/// let config = SamplerConfig::builder()
///     .batch_size(1_000)
///     .seed(42)
///     .max_attempts(10_000_000)
///     .envelope_check(EnvelopeCheck::Warn)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.batch_size(), 1_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplerConfig {
    /// Proposals generated per refill.
    batch_size: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Optional ceiling on acceptance tests per call.
    max_attempts: Option<u64>,
    /// Envelope violation policy.
    envelope_check: EnvelopeCheck,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            max_attempts: None,
            envelope_check: EnvelopeCheck::default(),
        }
    }
}

impl SamplerConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SamplerConfigBuilder {
        SamplerConfigBuilder::default()
    }

    /// Returns the number of proposals generated per refill.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the optional ceiling on acceptance tests per call.
    #[inline]
    pub fn max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }

    /// Returns the envelope violation policy.
    #[inline]
    pub fn envelope_check(&self) -> EnvelopeCheck {
        self.envelope_check
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `batch_size` is 0 or greater than 10,000,000
    /// - `max_attempts` is set to 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "max_attempts",
                value: "must be positive when set".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`SamplerConfig`].
///
/// Unset fields take the defaults of [`SamplerConfig::default`].
///
/// # Examples
///
/// ```rust
/// use sampler_engine::rejection::SamplerConfig;
///
/// let config = SamplerConfig::builder().build().unwrap();
/// assert_eq!(config, SamplerConfig::default());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SamplerConfigBuilder {
    batch_size: Option<usize>,
    seed: Option<u64>,
    max_attempts: Option<u64>,
    envelope_check: EnvelopeCheck,
}

impl SamplerConfigBuilder {
    /// Sets the number of proposals generated per refill.
    ///
    /// # Arguments
    ///
    /// * `batch_size` - Proposals per batch in [1, 10_000_000]
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the ceiling on acceptance tests per sampling call.
    #[inline]
    pub fn max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Sets the envelope violation policy.
    #[inline]
    pub fn envelope_check(mut self, envelope_check: EnvelopeCheck) -> Self {
        self.envelope_check = envelope_check;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the resulting configuration fails
    /// [`SamplerConfig::validate`].
    pub fn build(self) -> Result<SamplerConfig, ConfigError> {
        let config = SamplerConfig {
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            seed: self.seed,
            max_attempts: self.max_attempts,
            envelope_check: self.envelope_check,
        };

        config.validate()?;
        Ok(config)
    }
}
