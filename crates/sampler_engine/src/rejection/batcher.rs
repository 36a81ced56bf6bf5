//! Batched proposal generation.
//!
//! This module provides [`ProposalBatcher`], the FIFO of proposal draws
//! awaiting an acceptance test. Proposals are generated a batch at a time so
//! that the caller's sampler is invoked in runs rather than interleaved with
//! one density evaluation per rejected draw.
//!
//! # Lifetime
//!
//! A batcher lives for exactly one sampling call. It is created empty,
//! refilled whenever it runs dry, and dropped with any unused proposals when
//! the call returns.

use std::collections::VecDeque;

use crate::model::DistributionModel;
use crate::rng::UniformSource;

/// Pending queue of proposal draws.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::model::FnModel;
/// use sampler_engine::rejection::ProposalBatcher;
/// use sampler_engine::rng::SamplerRng;
///
/// let model = FnModel::new(|x: f64| x, |_x: f64| 1.0, |u: f64| 2.0 * u);
/// let mut rng = SamplerRng::from_seed(1);
/// let mut batcher = ProposalBatcher::with_capacity(4);
///
/// batcher.refill(&model, &mut rng, 4);
/// assert_eq!(batcher.len(), 4);
///
/// while let Some(x) = batcher.take_one() {
///     assert!((0.0..2.0).contains(&x));
/// }
/// assert!(batcher.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ProposalBatcher {
    /// Proposals in generation order.
    queue: VecDeque<f64>,
    /// Total proposals generated.
    generated: u64,
    /// Number of refills performed.
    refills: u64,
}

impl ProposalBatcher {
    /// Creates an empty batcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty batcher with room for `capacity` proposals.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Appends `batch_size` proposals, each `model.draw(source.uniform())`.
    ///
    /// Proposals are appended behind any still queued, so draw order is
    /// preserved across refills.
    pub fn refill<M, U>(&mut self, model: &M, source: &mut U, batch_size: usize)
    where
        M: DistributionModel + ?Sized,
        U: UniformSource + ?Sized,
    {
        self.queue.reserve(batch_size);
        for _ in 0..batch_size {
            self.queue.push_back(model.draw(source.uniform()));
        }
        self.generated += batch_size as u64;
        self.refills += 1;
    }

    /// Pops the oldest queued proposal, or `None` once the queue is drained.
    #[inline]
    pub fn take_one(&mut self) -> Option<f64> {
        self.queue.pop_front()
    }

    /// Returns the number of queued proposals.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if no proposals are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the total number of proposals generated so far.
    #[inline]
    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Returns the number of refills performed so far.
    #[inline]
    pub fn refills(&self) -> u64 {
        self.refills
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FnModel;
    use crate::rng::SamplerRng;
    use std::cell::Cell;

    /// Replays a fixed cycle of variates.
    struct Cycle {
        values: Vec<f64>,
        next: usize,
    }

    impl UniformSource for Cycle {
        fn uniform(&mut self) -> f64 {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            value
        }
    }

    #[test]
    fn test_new_batcher_is_empty() {
        let mut batcher = ProposalBatcher::new();

        assert!(batcher.is_empty());
        assert_eq!(batcher.len(), 0);
        assert_eq!(batcher.take_one(), None);
        assert_eq!(batcher.generated(), 0);
        assert_eq!(batcher.refills(), 0);
    }

    #[test]
    fn test_refill_applies_sampler_to_each_uniform() {
        let model = FnModel::new(|x: f64| x, |_x: f64| 1.0, |u: f64| 10.0 * u);
        let mut source = Cycle {
            values: vec![0.1, 0.2, 0.3],
            next: 0,
        };
        let mut batcher = ProposalBatcher::new();

        batcher.refill(&model, &mut source, 3);

        assert_eq!(batcher.take_one(), Some(1.0));
        assert_eq!(batcher.take_one(), Some(2.0));
        assert_eq!(batcher.take_one(), Some(3.0));
        assert_eq!(batcher.take_one(), None);
    }

    #[test]
    fn test_fifo_order_across_refills() {
        let model = FnModel::new(|x: f64| x, |_x: f64| 1.0, |u: f64| u);
        let mut source = Cycle {
            values: vec![0.0, 0.25, 0.5, 0.75],
            next: 0,
        };
        let mut batcher = ProposalBatcher::new();

        batcher.refill(&model, &mut source, 2);
        assert_eq!(batcher.take_one(), Some(0.0));
        batcher.refill(&model, &mut source, 2);

        let drained: Vec<f64> = std::iter::from_fn(|| batcher.take_one()).collect();
        assert_eq!(drained, vec![0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_refill_invokes_sampler_once_per_proposal() {
        let draws = Cell::new(0usize);
        let model = FnModel::new(
            |x: f64| x,
            |_x: f64| 1.0,
            |u: f64| {
                draws.set(draws.get() + 1);
                u
            },
        );
        let mut rng = SamplerRng::from_seed(3);
        let mut batcher = ProposalBatcher::with_capacity(64);

        batcher.refill(&model, &mut rng, 64);
        batcher.refill(&model, &mut rng, 16);

        assert_eq!(draws.get(), 80);
        assert_eq!(batcher.len(), 80);
        assert_eq!(batcher.generated(), 80);
        assert_eq!(batcher.refills(), 2);
    }

    #[test]
    fn test_zero_sized_refill_is_a_no_op_on_the_queue() {
        let model = FnModel::new(|x: f64| x, |_x: f64| 1.0, |u: f64| u);
        let mut rng = SamplerRng::from_seed(3);
        let mut batcher = ProposalBatcher::new();

        batcher.refill(&model, &mut rng, 0);

        assert!(batcher.is_empty());
        assert_eq!(batcher.generated(), 0);
    }
}
