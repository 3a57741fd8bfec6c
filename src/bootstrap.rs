//! Empirical bootstrap confidence intervals.
//!
//! Resamples the input with replacement to approximate the sampling
//! distribution of a point estimator (mean or median), and reads the
//! interval bounds off the percentiles of the resampled deltas.
//!
//! **Delta convention**: the returned bounds are *relative to the observed
//! point estimate* — they bracket the distribution of
//! `estimator(replicate) − estimator(sample)`, not the estimate itself. Add
//! the observed estimate back to obtain an absolute interval.
//!
//! The random source is caller-injected, so results are reproducible with a
//! seeded generator.
//!
//! # Examples
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use u_inference::bootstrap::{bootstrap_ci, BootstrapOptions};
//!
//! let sample = [2.1, 1.9, 2.4, 2.0, 1.8, 2.2, 2.3, 1.7];
//! let mut rng = StdRng::seed_from_u64(7);
//! let ci = bootstrap_ci(&sample, &BootstrapOptions::default(), &mut rng).unwrap();
//! assert!(ci.lower <= ci.upper);
//! ```

use rand::Rng;

use crate::error::{InferenceError, Result};
use crate::stats;

/// Point estimator resampled by the bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Estimator {
    /// Arithmetic mean.
    #[default]
    Mean,
    /// Median.
    Median,
}

/// Options for [`bootstrap_ci`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapOptions {
    /// Confidence level as a fraction in (0, 1]. Default 0.95. The value
    /// 1.0 is the limiting case: the bounds span the full delta range.
    pub level: f64,
    /// Statistic whose sampling distribution is approximated. Default mean.
    pub estimator: Estimator,
    /// Number of bootstrap replicates. Default 10 000; at least 1 000 is
    /// recommended for stable percentile estimates, but not enforced.
    pub replicates: usize,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            level: 0.95,
            estimator: Estimator::Mean,
            replicates: 10_000,
        }
    }
}

/// Confidence-interval bounds as deltas around the observed estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapInterval {
    /// Lower percentile of the delta distribution (≤ `upper`).
    pub lower: f64,
    /// Upper percentile of the delta distribution.
    pub upper: f64,
}

/// Empirical bootstrap confidence interval for the chosen estimator.
///
/// # Algorithm
///
/// NaN entries are dropped up front (with a `tracing` warning — partial
/// data is still statistically usable). Then `replicates` resamples of the
/// cleaned sample are drawn with replacement, each of the cleaned sample's
/// size; the sorted deltas `estimator(resample) − estimator(sample)` are
/// reduced to the `100·(1−level)/2` and complementary percentiles by linear
/// interpolation.
///
/// Runs in `O(replicates · n)` time (`O(replicates · n log n)` for the
/// median) and `O(replicates)` auxiliary memory. Replicates are mutually
/// independent; only the final sort is order-sensitive.
///
/// # Errors
///
/// `Domain` if the sample is empty after NaN removal, `level` is outside
/// `(0, 1]`, or `replicates` is zero.
pub fn bootstrap_ci<R: Rng + ?Sized>(
    sample: &[f64],
    opts: &BootstrapOptions,
    rng: &mut R,
) -> Result<BootstrapInterval> {
    if !(opts.level > 0.0 && opts.level <= 1.0) {
        return Err(InferenceError::Domain(format!(
            "confidence level {} must be in (0, 1]",
            opts.level
        )));
    }
    if opts.replicates == 0 {
        return Err(InferenceError::Domain(
            "replicate count must be positive".into(),
        ));
    }

    let clean: Vec<f64> = sample.iter().copied().filter(|v| !v.is_nan()).collect();
    let dropped = sample.len() - clean.len();
    if dropped > 0 {
        tracing::warn!(dropped, "dropping NaN value(s) prior to bootstrap");
    }
    if clean.is_empty() {
        return Err(InferenceError::Domain(
            "sample is empty after NaN removal".into(),
        ));
    }

    let observed = point_estimate(opts.estimator, &clean)
        .ok_or_else(|| InferenceError::Domain("point estimate is undefined".into()))?;

    let n = clean.len();
    let mut replicate = vec![0.0; n];
    let mut deltas = Vec::with_capacity(opts.replicates);
    for _ in 0..opts.replicates {
        for slot in replicate.iter_mut() {
            *slot = clean[rng.gen_range(0..n)];
        }
        let est = point_estimate(opts.estimator, &replicate)
            .ok_or_else(|| InferenceError::Domain("point estimate is undefined".into()))?;
        deltas.push(est - observed);
    }
    deltas.sort_unstable_by(f64::total_cmp);

    let lower_fraction = (1.0 - opts.level) / 2.0;
    let lower = stats::quantile_sorted(&deltas, lower_fraction)
        .ok_or_else(|| InferenceError::Domain("empty delta distribution".into()))?;
    let upper = stats::quantile_sorted(&deltas, 1.0 - lower_fraction)
        .ok_or_else(|| InferenceError::Domain("empty delta distribution".into()))?;

    Ok(BootstrapInterval { lower, upper })
}

fn point_estimate(estimator: Estimator, data: &[f64]) -> Option<f64> {
    match estimator {
        Estimator::Mean => stats::mean(data),
        Estimator::Median => stats::median(data),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
