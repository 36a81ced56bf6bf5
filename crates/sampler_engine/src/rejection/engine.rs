//! Rejection sampling engine.
//!
//! This module provides the orchestration layer for rejection sampling.
//!
//! # Overview
//!
//! [`RejectionSampler`] coordinates:
//! 1. Uniform variates (via [`UniformSource`], [`SamplerRng`] by default)
//! 2. Proposal generation in batches (via [`ProposalBatcher`])
//! 3. The accept/reject test against the caller's [`DistributionModel`]
//!
//! For each queued proposal `x` the engine computes
//! `ratio = target(x) / (k * proposal(x))`, draws a fresh `u` and accepts
//! `x` when `u <= ratio`. Accepted values are returned in acceptance order.
//!
//! # Preconditions
//!
//! The envelope bound `target(x) <= k * proposal(x)` must hold wherever the
//! proposal sampler can land. Where it does not, the ratio exceeds one and is
//! used as is: such points are always accepted and the output is biased.
//! [`EnvelopeCheck`] controls whether this is reported.
//!
//! The run terminates only if the acceptance probability is positive on a
//! set the proposal reaches. Use [`SamplerConfigBuilder::max_attempts`] or a
//! [`CancellationToken`] to bound runs where that is in doubt.
//!
//! [`SamplerConfigBuilder::max_attempts`]: super::SamplerConfigBuilder::max_attempts

use tracing::{debug, trace, warn};

use super::batcher::ProposalBatcher;
use super::cancel::CancellationToken;
use super::config::{EnvelopeCheck, SamplerConfig};
use super::error::{ConfigError, SamplingError};
use crate::model::{Density, DistributionModel, FnModel};
use crate::rng::{SamplerRng, UniformSource};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters describing one sampling run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingStats {
    /// Proposals generated, including any left unused in the final batch.
    pub proposals_drawn: u64,
    /// Acceptance tests performed.
    pub attempts: u64,
    /// Proposals accepted.
    pub accepted: usize,
    /// Batch refills performed.
    pub batches: u64,
    /// Proposals at which the proposal density was zero.
    pub zero_density_proposals: u64,
    /// Largest acceptance ratio observed; above one signals an envelope violation.
    pub max_ratio: f64,
}

impl SamplingStats {
    /// Returns the fraction of acceptance tests that accepted, or 0 before any test.
    #[inline]
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempts as f64
        }
    }

    /// Returns `true` if some acceptance ratio exceeded one.
    #[inline]
    pub fn envelope_violated(&self) -> bool {
        self.max_ratio > 1.0
    }
}

/// Accepted samples together with the statistics of the run that produced them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingOutcome {
    /// Accepted samples in acceptance order.
    pub samples: Vec<f64>,
    /// Run statistics.
    pub stats: SamplingStats,
}

/// Computes the acceptance ratio `target / (k * proposal)`.
///
/// A zero proposal density yields a ratio of zero, so the point is never
/// accepted. Ratios above one are returned unclamped.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::rejection::acceptance_ratio;
///
/// assert_eq!(acceptance_ratio(1.0, 0.5, 4.0), 0.5);
/// assert_eq!(acceptance_ratio(1.0, 0.0, 4.0), 0.0);
/// assert_eq!(acceptance_ratio(3.0, 1.0, 1.0), 3.0);
/// ```
#[inline]
pub fn acceptance_ratio(target_value: f64, proposal_value: f64, k: f64) -> f64 {
    if proposal_value == 0.0 {
        0.0
    } else {
        target_value / (k * proposal_value)
    }
}

/// Rejection sampling engine.
///
/// Owns its random source; each call to [`sample`](Self::sample) continues
/// the source's stream, so two engines built with the same seed produce
/// identical outputs for identical call sequences.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::model::FnModel;
/// use sampler_engine::rejection::{RejectionSampler, SamplerConfig};
///
/// let config = SamplerConfig::builder().seed(42).build().unwrap();
/// let mut sampler = RejectionSampler::new(config).unwrap();
///
/// // sin(x) on [0, pi] under a uniform envelope.
/// let pi = std::f64::consts::PI;
/// let model = FnModel::new(f64::sin, move |_x: f64| 1.0 / pi, move |u: f64| pi * u);
///
/// let samples = sampler.sample(&model, 5.0, 1_000).unwrap();
/// assert_eq!(samples.len(), 1_000);
/// assert!(samples.iter().all(|&x| (0.0..pi).contains(&x)));
/// ```
#[derive(Debug)]
pub struct RejectionSampler<R = SamplerRng> {
    config: SamplerConfig,
    source: R,
    last_stats: Option<SamplingStats>,
}

impl RejectionSampler<SamplerRng> {
    /// Creates a new sampler with the given configuration.
    ///
    /// Uses the configured seed, or an entropy-derived seed when none is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration is invalid.
    pub fn new(config: SamplerConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed() {
            Some(seed) => SamplerRng::from_seed(seed),
            None => SamplerRng::from_entropy(),
        };
        Self::with_source(config, rng)
    }

    /// Creates a new sampler with a specific seed, overriding the config seed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration is invalid.
    pub fn with_seed(config: SamplerConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_source(config, SamplerRng::from_seed(seed))
    }

    /// Returns the seed of the underlying generator.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.source.seed()
    }

    /// Rewinds the generator to its initial seed and clears the last statistics.
    pub fn reset(&mut self) {
        self.reset_with_seed(self.source.seed());
    }

    /// Reseeds the generator and clears the last statistics.
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.source = SamplerRng::from_seed(seed);
        self.last_stats = None;
    }
}

impl<R: UniformSource> RejectionSampler<R> {
    /// Creates a new sampler drawing its uniforms from `source`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration is invalid.
    pub fn with_source(config: SamplerConfig, source: R) -> Result<Self, ConfigError> {
        config.validate()?;

        debug!(
            batch_size = config.batch_size(),
            max_attempts = ?config.max_attempts(),
            envelope_check = ?config.envelope_check(),
            "Rejection sampler initialised"
        );

        Ok(Self {
            config,
            source,
            last_stats: None,
        })
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Returns the statistics of the most recent call, including failed ones.
    #[inline]
    pub fn last_stats(&self) -> Option<&SamplingStats> {
        self.last_stats.as_ref()
    }

    /// Draws exactly `count` samples from the model's target density.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `count` is 0, `k` is not positive and finite
    ///   (no callback is invoked in either case), or a density returns a
    ///   negative or NaN value
    /// - `ExhaustedAttempts` if the configured attempt ceiling is reached
    /// - `EnvelopeViolation` under [`EnvelopeCheck::Strict`]
    pub fn sample<M>(&mut self, model: &M, k: f64, count: usize) -> Result<Vec<f64>, SamplingError>
    where
        M: DistributionModel + ?Sized,
    {
        self.run(model, k, count, None).map(|outcome| outcome.samples)
    }

    /// Like [`sample`](Self::sample), also returning the run statistics.
    ///
    /// # Errors
    ///
    /// As for [`sample`](Self::sample).
    pub fn sample_with_stats<M>(
        &mut self,
        model: &M,
        k: f64,
        count: usize,
    ) -> Result<SamplingOutcome, SamplingError>
    where
        M: DistributionModel + ?Sized,
    {
        self.run(model, k, count, None)
    }

    /// Like [`sample_with_stats`](Self::sample_with_stats), checking `token`
    /// once per accept/reject iteration.
    ///
    /// # Errors
    ///
    /// As for [`sample`](Self::sample), plus `Cancelled` once the token is
    /// cancelled.
    pub fn sample_with_cancel<M>(
        &mut self,
        model: &M,
        k: f64,
        count: usize,
        token: &CancellationToken,
    ) -> Result<SamplingOutcome, SamplingError>
    where
        M: DistributionModel + ?Sized,
    {
        self.run(model, k, count, Some(token))
    }

    fn run<M>(
        &mut self,
        model: &M,
        k: f64,
        count: usize,
        token: Option<&CancellationToken>,
    ) -> Result<SamplingOutcome, SamplingError>
    where
        M: DistributionModel + ?Sized,
    {
        validate_arguments(k, count)?;

        debug!(count, k, batch_size = self.config.batch_size(), "Sampling started");

        let mut stats = SamplingStats::default();
        let result = self.accept_reject(model, k, count, token, &mut stats);

        match &result {
            Ok(_) => debug!(
                accepted = stats.accepted,
                attempts = stats.attempts,
                batches = stats.batches,
                acceptance_rate = stats.acceptance_rate(),
                zero_density_proposals = stats.zero_density_proposals,
                max_ratio = stats.max_ratio,
                "Sampling complete"
            ),
            Err(err) => debug!(
                accepted = stats.accepted,
                attempts = stats.attempts,
                error = %err,
                "Sampling failed"
            ),
        }

        self.last_stats = Some(stats.clone());
        result.map(|samples| SamplingOutcome { samples, stats })
    }

    fn accept_reject<M>(
        &mut self,
        model: &M,
        k: f64,
        count: usize,
        token: Option<&CancellationToken>,
        stats: &mut SamplingStats,
    ) -> Result<Vec<f64>, SamplingError>
    where
        M: DistributionModel + ?Sized,
    {
        let batch_size = self.config.batch_size();
        let max_attempts = self.config.max_attempts();
        let envelope_check = self.config.envelope_check();

        let mut accepted = Vec::with_capacity(count);
        let mut batcher = ProposalBatcher::with_capacity(batch_size);
        let mut warned = false;

        while accepted.len() < count {
            if token.is_some_and(CancellationToken::is_cancelled) {
                return Err(SamplingError::Cancelled {
                    accepted: accepted.len(),
                    requested: count,
                });
            }
            if max_attempts.is_some_and(|max| stats.attempts >= max) {
                return Err(SamplingError::ExhaustedAttempts {
                    attempts: stats.attempts,
                    accepted: accepted.len(),
                    requested: count,
                });
            }

            if batcher.is_empty() {
                batcher.refill(model, &mut self.source, batch_size);
                stats.proposals_drawn = batcher.generated();
                stats.batches = batcher.refills();
                trace!(batch = stats.batches, batch_size, "Proposal batch refilled");
            }
            let Some(x) = batcher.take_one() else {
                continue;
            };

            let target_value = checked_density("target_density", x, model.target(x))?;
            let proposal_value = checked_density("proposal_density", x, model.proposal(x))?;
            if proposal_value == 0.0 {
                stats.zero_density_proposals += 1;
            }
            let ratio = acceptance_ratio(target_value, proposal_value, k);

            if ratio > stats.max_ratio {
                stats.max_ratio = ratio;
            }
            if ratio > 1.0 {
                match envelope_check {
                    EnvelopeCheck::Ignore => {}
                    EnvelopeCheck::Warn if !warned => {
                        warn!(
                            x,
                            ratio,
                            k,
                            "Acceptance ratio exceeds 1; envelope constant does not bound the target"
                        );
                        warned = true;
                    }
                    EnvelopeCheck::Warn => {}
                    EnvelopeCheck::Strict => {
                        return Err(SamplingError::EnvelopeViolation { x, ratio });
                    }
                }
            }

            let u = self.source.uniform();
            stats.attempts += 1;
            if u <= ratio {
                accepted.push(x);
                stats.accepted += 1;
            }
        }

        Ok(accepted)
    }
}

/// Draws `count` samples from `target_density` using a default-configured,
/// entropy-seeded sampler.
///
/// `proposal_sampler` maps a uniform(0, 1) variate to a draw from the
/// proposal distribution whose density is `proposal_density`; `k` must satisfy
/// `target_density(x) <= k * proposal_density(x)` on the proposal's support.
///
/// # Errors
///
/// As for [`RejectionSampler::sample`].
///
/// # Examples
///
/// ```rust
/// use sampler_engine::rejection_sampling;
///
/// // x^3 / 3 on [0, 1] under a uniform envelope; the ratio never exceeds 1/3.
/// let samples = rejection_sampling(|x: f64| x.powi(3) / 3.0, |_x: f64| 1.0, |u: f64| u, 1.0, 100)
///     .unwrap();
/// assert_eq!(samples.len(), 100);
/// ```
pub fn rejection_sampling<T, P, S>(
    target_density: T,
    proposal_density: P,
    proposal_sampler: S,
    k: f64,
    count: usize,
) -> Result<Vec<f64>, SamplingError>
where
    T: Density,
    P: Density,
    S: Density,
{
    let model = FnModel::new(target_density, proposal_density, proposal_sampler);
    let mut sampler = RejectionSampler::new(SamplerConfig::default())?;
    sampler.sample(&model, k, count)
}

fn validate_arguments(k: f64, count: usize) -> Result<(), SamplingError> {
    if count == 0 {
        return Err(SamplingError::invalid_argument("count", "must be positive, got 0"));
    }
    if !(k.is_finite() && k > 0.0) {
        return Err(SamplingError::invalid_argument(
            "k",
            format!("must be positive and finite, got {}", k),
        ));
    }
    Ok(())
}

fn checked_density(name: &'static str, x: f64, value: f64) -> Result<f64, SamplingError> {
    if value.is_nan() || value < 0.0 {
        return Err(SamplingError::invalid_argument(
            name,
            format!("returned {} at x = {}", value, x),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::Cell;
    use std::f64::consts::PI;

    fn seeded(seed: u64) -> RejectionSampler {
        let config = SamplerConfig::builder().seed(seed).build().unwrap();
        RejectionSampler::new(config).unwrap()
    }

    fn sine_model() -> FnModel<fn(f64) -> f64, impl Fn(f64) -> f64, impl Fn(f64) -> f64> {
        FnModel::new(f64::sin as fn(f64) -> f64, |_x: f64| 1.0 / PI, |u: f64| PI * u)
    }

    /// Counts invocations of each capability.
    #[derive(Default)]
    struct CountingModel {
        targets: Cell<usize>,
        proposals: Cell<usize>,
        draws: Cell<usize>,
    }

    impl DistributionModel for CountingModel {
        fn target(&self, x: f64) -> f64 {
            self.targets.set(self.targets.get() + 1);
            x
        }

        fn proposal(&self, _x: f64) -> f64 {
            self.proposals.set(self.proposals.get() + 1);
            1.0
        }

        fn draw(&self, u: f64) -> f64 {
            self.draws.set(self.draws.get() + 1);
            u
        }
    }

    /// Replays a fixed list of variates, then repeats the last one.
    struct Script {
        values: Vec<f64>,
        next: usize,
    }

    impl UniformSource for Script {
        fn uniform(&mut self) -> f64 {
            let index = self.next.min(self.values.len() - 1);
            self.next += 1;
            self.values[index]
        }
    }

    // ------------------------------------------------------------------------
    // Argument validation
    // ------------------------------------------------------------------------

    #[test]
    fn test_zero_count_is_invalid_and_calls_nothing() {
        let model = CountingModel::default();
        let result = seeded(1).sample(&model, 1.0, 0);

        assert!(matches!(
            result,
            Err(SamplingError::InvalidArgument { name: "count", .. })
        ));
        assert_eq!(model.targets.get(), 0);
        assert_eq!(model.proposals.get(), 0);
        assert_eq!(model.draws.get(), 0);
    }

    #[test]
    fn test_non_positive_k_is_invalid_and_calls_nothing() {
        for k in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let model = CountingModel::default();
            let result = seeded(1).sample(&model, k, 10);

            assert!(
                matches!(result, Err(SamplingError::InvalidArgument { name: "k", .. })),
                "k = {} should be rejected",
                k
            );
            assert_eq!(model.targets.get() + model.proposals.get() + model.draws.get(), 0);
        }
    }

    #[test]
    fn test_invalid_config_is_rejected_at_construction() {
        let config = SamplerConfig::builder().batch_size(0).build();
        assert!(config.is_err());
    }

    #[test]
    fn test_negative_target_density_is_invalid() {
        let model = FnModel::new(|_x: f64| -1.0, |_x: f64| 1.0, |u: f64| u);
        let result = seeded(2).sample(&model, 1.0, 5);

        assert!(matches!(
            result,
            Err(SamplingError::InvalidArgument {
                name: "target_density",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_proposal_density_is_invalid() {
        let model = FnModel::new(|_x: f64| 1.0, |_x: f64| f64::NAN, |u: f64| u);
        let result = seeded(2).sample(&model, 1.0, 5);

        assert!(matches!(
            result,
            Err(SamplingError::InvalidArgument {
                name: "proposal_density",
                ..
            })
        ));
    }

    // ------------------------------------------------------------------------
    // Accept/reject behaviour
    // ------------------------------------------------------------------------

    #[test]
    fn test_returns_exactly_count_samples() {
        let mut sampler = seeded(3);
        let model = sine_model();

        for count in [1, 2, 99, 100, 101, 1_000] {
            let samples = sampler.sample(&model, 5.0, count).unwrap();
            assert_eq!(samples.len(), count);
        }
    }

    #[test]
    fn test_identical_densities_accept_every_proposal() {
        let density = |x: f64| 1.0 + x;
        let model = FnModel::new(density, density, |u: f64| u);
        let mut sampler = seeded(4);

        let outcome = sampler.sample_with_stats(&model, 1.0, 1_000).unwrap();

        assert_eq!(outcome.stats.attempts, 1_000);
        assert_eq!(outcome.stats.accepted, 1_000);
        assert_relative_eq!(outcome.stats.acceptance_rate(), 1.0);
        assert_relative_eq!(outcome.stats.max_ratio, 1.0);
    }

    #[test]
    fn test_accepts_when_uniform_equals_ratio() {
        // Draw order: one proposal (batch of 1), then the acceptance uniform.
        let model = FnModel::new(|_x: f64| 0.5, |_x: f64| 1.0, |u: f64| u);
        let source = Script {
            values: vec![0.25, 0.5],
            next: 0,
        };
        let config = SamplerConfig::builder().batch_size(1).build().unwrap();
        let mut sampler = RejectionSampler::with_source(config, source).unwrap();

        let samples = sampler.sample(&model, 1.0, 1).unwrap();

        assert_eq!(samples, vec![0.25]);
        assert_eq!(sampler.last_stats().unwrap().attempts, 1);
    }

    #[test]
    fn test_rejects_when_uniform_exceeds_ratio() {
        let model = FnModel::new(|_x: f64| 0.5, |_x: f64| 1.0, |u: f64| u);
        // First test draws u = 0.75 > 0.5 (reject); afterwards u = 0.1 forever.
        let source = Script {
            values: vec![0.2, 0.75, 0.3, 0.1],
            next: 0,
        };
        let config = SamplerConfig::builder().batch_size(1).build().unwrap();
        let mut sampler = RejectionSampler::with_source(config, source).unwrap();

        let outcome = sampler.sample_with_stats(&model, 1.0, 1).unwrap();

        assert_eq!(outcome.samples, vec![0.3]);
        assert_eq!(outcome.stats.attempts, 2);
        assert_eq!(outcome.stats.batches, 2);
    }

    #[test]
    fn test_zero_proposal_density_is_never_accepted() {
        // The proposal density vanishes on [0, 0.5), where the target is large.
        let model = FnModel::new(
            |_x: f64| 1.0,
            |x: f64| if x < 0.5 { 0.0 } else { 2.0 },
            |u: f64| u,
        );
        let mut sampler = seeded(5);

        let outcome = sampler.sample_with_stats(&model, 1.0, 5_000).unwrap();

        assert!(outcome.samples.iter().all(|&x| x >= 0.5));
        assert!(outcome.stats.zero_density_proposals > 0);
        assert!(outcome.stats.max_ratio <= 0.5);
    }

    #[test]
    fn test_ratio_above_one_is_not_clamped() {
        assert_eq!(acceptance_ratio(3.0, 1.0, 1.0), 3.0);
        assert_eq!(acceptance_ratio(0.0, 0.0, 1.0), 0.0);
        assert_relative_eq!(acceptance_ratio(1.0, 2.0, 5.0), 0.1);
    }

    #[test]
    fn test_envelope_violation_ignored_by_default() {
        // k = 0.5 under-bounds a uniform target: ratio 2 everywhere.
        let model = FnModel::new(|_x: f64| 1.0, |_x: f64| 1.0, |u: f64| u);
        let mut sampler = seeded(6);

        let outcome = sampler.sample_with_stats(&model, 0.5, 100).unwrap();

        assert_eq!(outcome.stats.attempts, 100);
        assert!(outcome.stats.envelope_violated());
        assert_relative_eq!(outcome.stats.max_ratio, 2.0);
    }

    #[test]
    fn test_envelope_violation_warn_keeps_semantics() {
        let model = FnModel::new(|_x: f64| 1.0, |_x: f64| 1.0, |u: f64| u);
        let ignore = SamplerConfig::builder().seed(6).build().unwrap();
        let warn = SamplerConfig::builder()
            .seed(6)
            .envelope_check(EnvelopeCheck::Warn)
            .build()
            .unwrap();

        let a = RejectionSampler::new(ignore)
            .unwrap()
            .sample(&model, 0.5, 100)
            .unwrap();
        let b = RejectionSampler::new(warn)
            .unwrap()
            .sample(&model, 0.5, 100)
            .unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_envelope_violation_strict_fails() {
        let model = FnModel::new(|x: f64| x, |_x: f64| 1.0, |u: f64| u);
        let config = SamplerConfig::builder()
            .seed(7)
            .envelope_check(EnvelopeCheck::Strict)
            .build()
            .unwrap();
        let mut sampler = RejectionSampler::new(config).unwrap();

        // ratio = x / 0.5 exceeds 1 for any x > 0.5.
        let result = sampler.sample(&model, 0.5, 10_000);

        match result {
            Err(SamplingError::EnvelopeViolation { x, ratio }) => {
                assert!(x > 0.5);
                assert!(ratio > 1.0);
            }
            other => panic!("expected envelope violation, got {:?}", other),
        }
    }

    // ------------------------------------------------------------------------
    // Termination controls
    // ------------------------------------------------------------------------

    #[test]
    fn test_disjoint_supports_exhaust_attempts() {
        let model = FnModel::new(
            |x: f64| if x > 2.0 { 1.0 } else { 0.0 },
            |_x: f64| 1.0,
            |u: f64| u,
        );
        let config = SamplerConfig::builder()
            .seed(8)
            .max_attempts(10_000)
            .build()
            .unwrap();
        let mut sampler = RejectionSampler::new(config).unwrap();

        let result = sampler.sample(&model, 1.0, 1);

        assert_eq!(
            result,
            Err(SamplingError::ExhaustedAttempts {
                attempts: 10_000,
                accepted: 0,
                requested: 1,
            })
        );
        assert_eq!(sampler.last_stats().unwrap().attempts, 10_000);
    }

    #[test]
    fn test_attempt_ceiling_not_hit_when_count_reached() {
        let density = |_x: f64| 1.0;
        let model = FnModel::new(density, density, |u: f64| u);
        let config = SamplerConfig::builder()
            .seed(8)
            .max_attempts(50)
            .build()
            .unwrap();
        let mut sampler = RejectionSampler::new(config).unwrap();

        let samples = sampler.sample(&model, 1.0, 50).unwrap();
        assert_eq!(samples.len(), 50);
    }

    #[test]
    fn test_cancelled_token_stops_before_any_test() {
        let token = CancellationToken::new();
        token.cancel();
        let model = CountingModel::default();

        let result = seeded(9).sample_with_cancel(&model, 1.0, 10, &token);

        assert_eq!(
            result,
            Err(SamplingError::Cancelled {
                accepted: 0,
                requested: 10,
            })
        );
        assert_eq!(model.targets.get(), 0);
    }

    #[test]
    fn test_cancel_from_inside_a_callback() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        let calls = Cell::new(0u32);
        let model = FnModel::new(
            |_x: f64| {
                calls.set(calls.get() + 1);
                if calls.get() == 25 {
                    trigger.cancel();
                }
                1.0
            },
            |_x: f64| 1.0,
            |u: f64| u,
        );

        let result = seeded(9).sample_with_cancel(&model, 1.0, 1_000, &token);

        assert_eq!(
            result,
            Err(SamplingError::Cancelled {
                accepted: 25,
                requested: 1_000,
            })
        );
    }

    // ------------------------------------------------------------------------
    // Reproducibility and batching
    // ------------------------------------------------------------------------

    #[test]
    fn test_same_seed_same_output() {
        let model = sine_model();

        let a = seeded(10).sample(&model, 5.0, 2_000).unwrap();
        let b = seeded(10).sample(&model, 5.0, 2_000).unwrap();
        let c = seeded(11).sample(&model, 5.0, 2_000).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_reset_replays_the_stream() {
        let model = sine_model();
        let mut sampler = seeded(12);

        let first = sampler.sample(&model, 5.0, 500).unwrap();
        let second = sampler.sample(&model, 5.0, 500).unwrap();
        assert_ne!(first, second);

        sampler.reset();
        assert!(sampler.last_stats().is_none());
        assert_eq!(sampler.sample(&model, 5.0, 500).unwrap(), first);

        sampler.reset_with_seed(13);
        assert_eq!(sampler.seed(), 13);
    }

    #[test]
    fn test_with_seed_overrides_config_seed() {
        let config = SamplerConfig::builder().seed(1).build().unwrap();
        let sampler = RejectionSampler::with_seed(config, 99).unwrap();
        assert_eq!(sampler.seed(), 99);
    }

    #[test]
    fn test_batches_refilled_only_when_drained() {
        let density = |_x: f64| 1.0;
        let model = FnModel::new(density, density, |u: f64| u);
        let config = SamplerConfig::builder()
            .seed(14)
            .batch_size(64)
            .build()
            .unwrap();
        let mut sampler = RejectionSampler::new(config).unwrap();

        let outcome = sampler.sample_with_stats(&model, 1.0, 130).unwrap();

        assert_eq!(outcome.stats.batches, 3);
        assert_eq!(outcome.stats.proposals_drawn, 192);
        assert_eq!(outcome.stats.attempts, 130);
    }

    #[test]
    fn test_sampler_invocations_match_batches() {
        let model = CountingModel::default();
        let config = SamplerConfig::builder()
            .seed(15)
            .batch_size(10)
            .build()
            .unwrap();
        let mut sampler = RejectionSampler::new(config).unwrap();

        let outcome = sampler.sample_with_stats(&model, 1.0, 50).unwrap();

        assert_eq!(model.draws.get() as u64, outcome.stats.proposals_drawn);
        assert_eq!(model.targets.get() as u64, outcome.stats.attempts);
        assert_eq!(model.proposals.get() as u64, outcome.stats.attempts);
        assert_eq!(outcome.stats.proposals_drawn % 10, 0);
    }

    #[test]
    fn test_acceptance_rate_decreases_with_k() {
        let model = sine_model();
        let mut previous = f64::INFINITY;

        for k in [4.0, 5.0, 8.0, 16.0, 32.0] {
            let outcome = seeded(16).sample_with_stats(&model, k, 5_000).unwrap();
            let rate = outcome.stats.acceptance_rate();
            assert!(
                rate <= previous,
                "acceptance rate {} at k = {} exceeds {}",
                rate,
                k,
                previous
            );
            previous = rate;
        }
    }

    #[test]
    fn test_sine_acceptance_rate_matches_theory() {
        // Mass of sin on [0, pi] is 2, envelope mass is k.
        let outcome = seeded(17)
            .sample_with_stats(&sine_model(), 5.0, 100_000)
            .unwrap();
        assert_relative_eq!(outcome.stats.acceptance_rate(), 0.4, epsilon = 0.01);
    }

    #[test]
    fn test_free_function_entry_point() {
        let samples =
            rejection_sampling(|x: f64| x.powi(3) / 3.0, |_x: f64| 1.0, |u: f64| u, 1.0, 100)
                .unwrap();

        assert_eq!(samples.len(), 100);
        assert!(samples.iter().all(|&x| (0.0..1.0).contains(&x)));

        let err = rejection_sampling(|x: f64| x, |_x: f64| 1.0, |u: f64| u, 1.0, 0);
        assert!(matches!(err, Err(SamplingError::InvalidArgument { .. })));
    }
}
