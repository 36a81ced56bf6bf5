//! CLI configuration management.
//!
//! Handles loading of sampler settings from a TOML file with environment
//! variable override support. Command-line flags are applied on top by the
//! individual commands.

use sampler_engine::rejection::{EnvelopeCheck, SamplerConfig, DEFAULT_BATCH_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Sampler settings shared by all commands.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Proposals generated per refill
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Seed for reproducible runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Ceiling on acceptance tests per run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u64>,

    /// Handling of acceptance ratios above one
    #[serde(default)]
    pub envelope_check: EnvelopeCheck,

    /// Bins in the table-format histogram
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_histogram_bins() -> usize {
    20
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            batch_size: default_batch_size(),
            seed: None,
            max_attempts: None,
            envelope_check: EnvelopeCheck::default(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or the defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by `SAMPLER_*` variable names.
    ///
    /// Values that fail to parse are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(log_level) = lookup("SAMPLER_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(batch_size) = lookup("SAMPLER_BATCH_SIZE").and_then(|v| v.parse().ok()) {
            self.batch_size = batch_size;
        }

        if let Some(seed) = lookup("SAMPLER_SEED") {
            self.seed = seed.parse().ok();
        }

        if let Some(max_attempts) = lookup("SAMPLER_MAX_ATTEMPTS") {
            self.max_attempts = max_attempts.parse().ok();
        }

        if let Some(check) = lookup("SAMPLER_ENVELOPE_CHECK") {
            self.envelope_check = match check.to_lowercase().as_str() {
                "ignore" => EnvelopeCheck::Ignore,
                "warn" => EnvelopeCheck::Warn,
                "strict" => EnvelopeCheck::Strict,
                _ => self.envelope_check,
            };
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if let Err(e) = self.sampler_config() {
            errors.push(e.to_string());
        }

        if self.histogram_bins == 0 {
            errors.push("histogram_bins must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Builds the engine configuration from these settings.
    pub fn sampler_config(&self) -> Result<SamplerConfig, sampler_engine::ConfigError> {
        let mut builder = SamplerConfig::builder()
            .batch_size(self.batch_size)
            .envelope_check(self.envelope_check);
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        if let Some(max_attempts) = self.max_attempts {
            builder = builder.max_attempts(max_attempts);
        }
        builder.build()
    }
}
