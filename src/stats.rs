//! Numeric support: stable reductions and NaN-aware variants.
//!
//! The estimator modules build on these primitives. Plain reductions assume
//! the caller has already dealt with missing values; the `nan_*` variants
//! skip NaN entries explicitly, so the skipping semantics are auditable
//! rather than hidden inside a library call.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier compensated summation, O(ε) error independent of n.
//! - **Variance**: Welford's online algorithm.
//!   Reference: Welford (1962), "Note on a Method for Calculating Corrected
//!   Sums of Squares and Products", *Technometrics* 4(3).
//! - **Quantile**: R-7 linear interpolation (default in R and NumPy).
//!   Reference: Hyndman & Fan (1996), *The American Statistician* 50(4).

/// Compensated (Neumaier) summation.
///
/// Maintains a running compensation term so low-order bits lost by naive
/// accumulation are recovered, even when an addend exceeds the running sum.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Arithmetic mean via compensated summation.
///
/// Returns `None` for empty input. NaN entries propagate; use [`nan_mean`]
/// when missing values must be skipped.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Sample variance (Bessel-corrected, denominator n − 1) via Welford's method.
///
/// Returns `None` if fewer than 2 observations.
pub fn variance(data: &[f64]) -> Option<f64> {
    let mut acc = Welford::new();
    for &x in data {
        acc.update(x);
    }
    acc.sample_variance()
}

/// Sample standard deviation, `sqrt(variance(data))`.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Population variance (denominator n).
///
/// Returns `None` for empty input.
pub fn population_variance(data: &[f64]) -> Option<f64> {
    let mut acc = Welford::new();
    for &x in data {
        acc.update(x);
    }
    acc.population_variance()
}

/// Population standard deviation, `sqrt(population_variance(data))`.
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    population_variance(data).map(f64::sqrt)
}

/// Sample covariance of paired observations (denominator n − 1).
///
/// Returns `None` if the slices differ in length or have fewer than
/// 2 observations.
pub fn covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return None;
    }
    let x_mean = mean(x)?;
    let y_mean = mean(y)?;
    let cross: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - x_mean) * (yi - y_mean))
        .sum();
    Some(cross / (n - 1) as f64)
}

/// Median without mutating the input.
///
/// Returns `None` if `data` is empty or contains NaN.
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() || data.iter().any(|x| x.is_nan()) {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// The `p`-th quantile of **pre-sorted** data, R-7 linear interpolation.
///
/// For sorted data `x[0..n]` and `p ∈ [0, 1]`: `h = (n − 1)·p`,
/// `j = ⌊h⌋`, `g = h − j`, result `(1 − g)·x[j] + g·x[j+1]`.
///
/// Returns `None` if `sorted_data` is empty or `p` is outside `[0, 1]`.
pub fn quantile_sorted(sorted_data: &[f64], p: f64) -> Option<f64> {
    let n = sorted_data.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted_data[0]);
    }
    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();
    if j + 1 >= n {
        Some(sorted_data[n - 1])
    } else {
        Some((1.0 - g) * sorted_data[j] + g * sorted_data[j + 1])
    }
}

/// Mean over the non-NaN entries only.
///
/// Returns `None` if every entry is NaN (or the slice is empty).
pub fn nan_mean(data: &[f64]) -> Option<f64> {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    let mut count = 0_usize;
    for &x in data {
        if x.is_nan() {
            continue;
        }
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some((sum + c) / count as f64)
    }
}

/// Sample variance (denominator m − 1) over the non-NaN entries only,
/// where m is the number of non-NaN entries.
///
/// Returns `None` if fewer than 2 non-NaN entries.
pub fn nan_variance(data: &[f64]) -> Option<f64> {
    let mut acc = Welford::new();
    for &x in data {
        if !x.is_nan() {
            acc.update(x);
        }
    }
    acc.sample_variance()
}

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Streaming mean/variance accumulator (Welford 1962).
#[derive(Debug, Clone, Default)]
struct Welford {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Welford {
    fn new() -> Self {
        Self::default()
    }

    fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    fn sample_variance(&self) -> Option<f64> {
        if self.count < 2 {
            None
        } else {
            Some(self.m2 / (self.count - 1) as f64)
        }
    }

    fn population_variance(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.m2 / self.count as f64)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
