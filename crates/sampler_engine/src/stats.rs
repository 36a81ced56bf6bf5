//! Goodness-of-fit helpers for checking sampler output.

use crate::rejection::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One-sample Kolmogorov–Smirnov distance between `samples` and `cdf`.
///
/// Returns `None` for an empty sample. NaN samples are ordered last.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::stats::ks_statistic;
///
/// let samples = [0.1, 0.3, 0.5, 0.7, 0.9];
/// let d = ks_statistic(&samples, |x| x).unwrap();
/// assert!((d - 0.1).abs() < 1e-12);
/// ```
pub fn ks_statistic<F>(samples: &[f64], cdf: F) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let distance = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf(x);
            let above = (i + 1) as f64 / n - f;
            let below = f - i as f64 / n;
            above.max(below)
        })
        .fold(0.0, f64::max);

    Some(distance)
}

/// Fixed-width histogram over `[lower, upper)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Histogram {
    lower: f64,
    upper: f64,
    counts: Vec<u64>,
    below: u64,
    above: u64,
}

impl Histogram {
    /// Bins `samples` into `bins` equal-width bins over `[lower, upper)`.
    ///
    /// Samples outside the range are tallied separately; `upper` itself
    /// falls in the last bin.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` if `bins` is zero or the range
    /// is empty or not finite.
    pub fn new(samples: &[f64], lower: f64, upper: f64, bins: usize) -> Result<Self, ConfigError> {
        if bins == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "bins",
                value: "must be positive".to_string(),
            });
        }
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(ConfigError::InvalidParameter {
                name: "range",
                value: format!("require finite lower < upper, got [{}, {})", lower, upper),
            });
        }

        let mut histogram = Self {
            lower,
            upper,
            counts: vec![0; bins],
            below: 0,
            above: 0,
        };
        let width = histogram.bin_width();

        for &x in samples {
            if x < lower {
                histogram.below += 1;
            } else if x > upper || x.is_nan() {
                histogram.above += 1;
            } else {
                let index = (((x - lower) / width) as usize).min(bins - 1);
                histogram.counts[index] += 1;
            }
        }

        Ok(histogram)
    }

    /// Width of each bin.
    #[inline]
    pub fn bin_width(&self) -> f64 {
        (self.upper - self.lower) / self.counts.len() as f64
    }

    /// Per-bin counts.
    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Samples below the range.
    #[inline]
    pub fn below(&self) -> u64 {
        self.below
    }

    /// Samples above the range, including NaN.
    #[inline]
    pub fn above(&self) -> u64 {
        self.above
    }

    /// Midpoint of bin `index`.
    #[inline]
    pub fn bin_centre(&self, index: usize) -> f64 {
        self.lower + (index as f64 + 0.5) * self.bin_width()
    }

    /// Total number of samples binned, in range or not.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum::<u64>() + self.below + self.above
    }

    /// Per-bin empirical density, normalised so in-range mass integrates to
    /// the in-range fraction of all samples.
    pub fn densities(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.counts.len()];
        }
        let scale = 1.0 / (total as f64 * self.bin_width());
        self.counts.iter().map(|&c| c as f64 * scale).collect()
    }
}
