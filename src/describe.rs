//! Descriptive summary of a sample.
//!
//! Computes the usual aggregate statistics of a numeric sample in one pass
//! over the NaN-filtered data, plus bookkeeping about how much of the input
//! was usable. The [`Display`](std::fmt::Display) impl renders the summary
//! as an aligned text block for quick inspection.

use std::fmt;

use crate::error::{InferenceError, Result};
use crate::stats;

/// Aggregate statistics of a sample. NaN entries are excluded from every
/// reduction; `n_analyzed` says how many values actually contributed.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSummary {
    /// Total number of elements, NaN included.
    pub n_elements: usize,
    /// Number of NaN elements.
    pub n_nan: usize,
    /// Number of non-NaN elements (`n_elements − n_nan`).
    pub n_analyzed: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Maximum.
    pub max: f64,
    /// Minimum.
    pub min: f64,
    /// Median.
    pub median: f64,
    /// Sample standard deviation (ddof = 1); NaN when fewer than 2 values.
    pub std_dev: f64,
    /// Mean of absolute values.
    pub mean_abs: f64,
    /// Smallest non-zero absolute value, if any value is non-zero.
    pub min_abs_nonzero: Option<f64>,
    /// Fraction of analyzed elements equal to zero.
    pub frac_zero: f64,
    /// Fraction of all elements that are NaN.
    pub frac_nan: f64,
}

/// Computes the descriptive summary of `data`.
///
/// # Errors
///
/// `Domain` if no non-NaN elements remain.
///
/// # Examples
///
/// ```
/// use u_inference::describe::describe;
///
/// let s = describe(&[1.0, 2.0, 3.0, f64::NAN]).unwrap();
/// assert_eq!(s.n_analyzed, 3);
/// assert!((s.mean - 2.0).abs() < 1e-12);
/// assert!((s.frac_nan - 0.25).abs() < 1e-12);
/// ```
pub fn describe(data: &[f64]) -> Result<SampleSummary> {
    let n_elements = data.len();
    let clean: Vec<f64> = data.iter().copied().filter(|v| !v.is_nan()).collect();
    let n_analyzed = clean.len();
    let n_nan = n_elements - n_analyzed;

    if n_analyzed == 0 {
        return Err(InferenceError::Domain(
            "no non-NaN elements to summarize".into(),
        ));
    }

    let abs: Vec<f64> = clean.iter().map(|v| v.abs()).collect();

    let undefined = || InferenceError::Domain("sample moments are undefined".into());
    let mean = stats::mean(&clean).ok_or_else(undefined)?;
    let median = stats::median(&clean).ok_or_else(undefined)?;
    let mean_abs = stats::mean(&abs).ok_or_else(undefined)?;

    let max = clean.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = clean.iter().copied().fold(f64::INFINITY, f64::min);
    let std_dev = stats::std_dev(&clean).unwrap_or(f64::NAN);

    let min_abs_nonzero = abs
        .iter()
        .copied()
        .filter(|&v| v > 0.0)
        .fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.min(v)))
        });

    let n_zero = clean.iter().filter(|&&v| v == 0.0).count();

    Ok(SampleSummary {
        n_elements,
        n_nan,
        n_analyzed,
        mean,
        max,
        min,
        median,
        std_dev,
        mean_abs,
        min_abs_nonzero,
        frac_zero: n_zero as f64 / n_analyzed as f64,
        frac_nan: n_nan as f64 / n_elements as f64,
    })
}

impl fmt::Display for SampleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "============== sample summary ==============")?;
        writeln!(f, "        elements: {}", self.n_elements)?;
        writeln!(f, "        analyzed: {}", self.n_analyzed)?;
        writeln!(f, "            mean: {:.6}", self.mean)?;
        writeln!(f, "             max: {:.6}", self.max)?;
        writeln!(f, "             min: {:.6}", self.min)?;
        writeln!(f, "          median: {:.6}", self.median)?;
        writeln!(f, "         std dev: {:.6}", self.std_dev)?;
        writeln!(f, "        mean abs: {:.6}", self.mean_abs)?;
        if let Some(v) = self.min_abs_nonzero {
            writeln!(f, " min abs nonzero: {v:.6}")?;
        }
        writeln!(f, "       frac zero: {:.6}", self.frac_zero)?;
        writeln!(f, "        frac nan: {:.6}", self.frac_nan)?;
        write!(f, "============================================")
    }
}
