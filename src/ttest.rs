//! Paired and unpaired mean-difference testing with confidence intervals.
//!
//! Given a control sample `x` and an experiment sample `y`, computes the
//! difference in means together with the confidence-interval half-width
//! (error bar) at the requested level. All reductions skip NaN entries
//! using explicit masks, independently per feature column.
//!
//! Significance classification is the caller's responsibility: an entry is
//! statistically significant when `|mean_difference| > error_bar`. The
//! result intentionally carries both pieces rather than a flag, so callers
//! can mask whole fields elementwise.
//!
//! # Examples
//!
//! ```
//! use u_inference::ttest::{ttest, TTestOptions};
//!
//! let control = [5.0, 6.0, 7.0, 8.0, 9.0];
//! let experiment = [5.5, 6.2, 7.1, 8.3, 9.4];
//! let r = ttest(&control, Some(&experiment), &TTestOptions::default()).unwrap();
//! assert!(r.mean_difference > 0.0);
//! ```

use crate::critical::t_critical_value;
use crate::error::{InferenceError, Result};
use crate::stats;

/// Options for [`ttest`] and [`ttest_columns`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestOptions {
    /// Confidence level as a percentage in (0, 100). Default 95.
    pub confidence_percent: f64,
    /// Paired test (observations matched one-to-one) vs. independent groups.
    /// Default paired.
    pub paired: bool,
    /// Rescale difference and error bar by `100 / mean(x)` — percent of
    /// control. Default off.
    pub scale_percent: bool,
}

impl Default for TTestOptions {
    fn default() -> Self {
        Self {
            confidence_percent: 95.0,
            paired: true,
            scale_percent: false,
        }
    }
}

/// Result for a single-feature sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    /// `mean(y) − mean(x)`, NaN entries skipped.
    pub mean_difference: f64,
    /// Confidence-interval half-width around the difference.
    pub error_bar: f64,
}

/// Result for a multi-feature sample, one entry per feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTTestResult {
    /// Per-column `mean(y) − mean(x)`.
    pub mean_difference: Vec<f64>,
    /// Per-column confidence-interval half-width.
    pub error_bar: Vec<f64>,
}

/// Mean difference and error bar between two single-feature samples.
///
/// When `y` is `None` the control is compared against itself, which gives a
/// zero difference in paired mode; this degenerate case exists for API
/// symmetry.
///
/// # Algorithm
///
/// With n observations and critical value `t = t_crit(ci, 2(n−1))`:
///
/// ```text
/// paired:   stderr = √(nanvar(y − x, ddof=1) / n)
/// unpaired: stderr = √((nanvar(x) + nanvar(y)) / (n − 1))
/// diff      = nanmean(y) − nanmean(x)
/// error_bar = t · stderr
/// ```
///
/// # Errors
///
/// - `ShapeMismatch` if `y` differs from `x` in length.
/// - `Domain` if `n < 2`, if fewer than 2 non-NaN values survive in a
///   reduction, if the confidence level is invalid, or if `scale_percent`
///   is set and the control mean is zero.
pub fn ttest(x: &[f64], y: Option<&[f64]>, opts: &TTestOptions) -> Result<TTestResult> {
    let n = x.len();
    if n < 2 {
        return Err(InferenceError::Domain(format!(
            "need at least 2 observations, got {n}"
        )));
    }
    let y = y.unwrap_or(x);
    if y.len() != n {
        return Err(InferenceError::ShapeMismatch {
            expected: n,
            got: y.len(),
        });
    }

    let tcrit = t_critical_value(opts.confidence_percent, 2 * (n - 1))?;
    let (mean_difference, error_bar) = column_difference(x, y, tcrit, opts)?;
    Ok(TTestResult {
        mean_difference,
        error_bar,
    })
}

/// Mean difference and error bar per feature column.
///
/// `x` and `y` are row-major: the outer slice indexes observations, the
/// inner slices are feature vectors of uniform width. Each column is
/// reduced independently, with its own NaN mask.
///
/// # Errors
///
/// As [`ttest`]; additionally `ShapeMismatch` for ragged rows or differing
/// feature widths between `x` and `y`.
pub fn ttest_columns(
    x: &[&[f64]],
    y: Option<&[&[f64]]>,
    opts: &TTestOptions,
) -> Result<ColumnTTestResult> {
    let n = x.len();
    if n < 2 {
        return Err(InferenceError::Domain(format!(
            "need at least 2 observations, got {n}"
        )));
    }
    let y = y.unwrap_or(x);
    if y.len() != n {
        return Err(InferenceError::ShapeMismatch {
            expected: n,
            got: y.len(),
        });
    }

    let ncols = x[0].len();
    for row in x.iter().chain(y.iter()) {
        if row.len() != ncols {
            return Err(InferenceError::ShapeMismatch {
                expected: ncols,
                got: row.len(),
            });
        }
    }

    let tcrit = t_critical_value(opts.confidence_percent, 2 * (n - 1))?;

    let mut mean_difference = Vec::with_capacity(ncols);
    let mut error_bar = Vec::with_capacity(ncols);
    let mut xcol = vec![0.0; n];
    let mut ycol = vec![0.0; n];
    for j in 0..ncols {
        for i in 0..n {
            xcol[i] = x[i][j];
            ycol[i] = y[i][j];
        }
        let (diff, eb) = column_difference(&xcol, &ycol, tcrit, opts)?;
        mean_difference.push(diff);
        error_bar.push(eb);
    }

    Ok(ColumnTTestResult {
        mean_difference,
        error_bar,
    })
}

/// Shared per-column computation. `x` and `y` are equal-length columns.
fn column_difference(
    x: &[f64],
    y: &[f64],
    tcrit: f64,
    opts: &TTestOptions,
) -> Result<(f64, f64)> {
    let n = x.len() as f64;

    let x_mean = stats::nan_mean(x)
        .ok_or_else(|| InferenceError::Domain("control column is all NaN".into()))?;
    let y_mean = stats::nan_mean(y)
        .ok_or_else(|| InferenceError::Domain("experiment column is all NaN".into()))?;

    let mut diff = y_mean - x_mean;

    let variance_gap =
        || InferenceError::Domain("fewer than 2 non-NaN values in a reduction".into());

    let std_err = if opts.paired {
        // A pair is masked out when either side is NaN; the subtraction
        // propagates the NaN into the mask.
        let pair_diffs: Vec<f64> = x.iter().zip(y.iter()).map(|(&xi, &yi)| yi - xi).collect();
        let var = stats::nan_variance(&pair_diffs).ok_or_else(variance_gap)?;
        (var / n).sqrt()
    } else {
        let var_x = stats::nan_variance(x).ok_or_else(variance_gap)?;
        let var_y = stats::nan_variance(y).ok_or_else(variance_gap)?;
        ((var_x + var_y) / (n - 1.0)).sqrt()
    };

    let mut error_bar = tcrit * std_err;

    if opts.scale_percent {
        if x_mean.abs() < 1e-300 {
            return Err(InferenceError::Domain(
                "control mean is zero, cannot rescale to percent".into(),
            ));
        }
        let factor = 100.0 / x_mean;
        diff *= factor;
        error_bar *= factor;
    }

    Ok((diff, error_bar))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_against_itself_is_zero() {
        let x = [5.1, 4.9, 5.2, 5.0, 4.8];
        let r = ttest(&x, None, &TTestOptions::default()).expect("should compute");
        assert!(r.mean_difference.abs() < 1e-12);
        assert!(r.error_bar.abs() < 1e-12);
    }

    #[test]
    fn swapping_samples_negates_difference() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.5, 2.5, 3.4, 5.0, 6.1];
        let opts = TTestOptions::default();
        let fwd = ttest(&x, Some(&y), &opts).expect("should compute");
        let rev = ttest(&y, Some(&x), &opts).expect("should compute");
        assert!((fwd.mean_difference + rev.mean_difference).abs() < 1e-12);
        assert!((fwd.error_bar - rev.error_bar).abs() < 1e-12);
    }

    #[test]
    fn paired_constant_shift() {
        // y = x + 1 exactly: difference 1, no spread in the pair differences.
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 3.0, 4.0, 5.0];
        let r = ttest(&x, Some(&y), &TTestOptions::default()).expect("should compute");
        assert!((r.mean_difference - 1.0).abs() < 1e-12);
        assert!(r.error_bar.abs() < 1e-12);
    }

    #[test]
    fn unpaired_matches_hand_computation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let opts = TTestOptions {
            paired: false,
            ..TTestOptions::default()
        };
        let r = ttest(&x, Some(&y), &opts).expect("should compute");
        // var(x) = 2.5, var(y) = 10, stderr = sqrt(12.5/4)
        let stderr = (12.5_f64 / 4.0).sqrt();
        let tcrit = crate::critical::t_critical_value(95.0, 8).unwrap();
        assert!((r.mean_difference - 3.0).abs() < 1e-12);
        assert!((r.error_bar - tcrit * stderr).abs() < 1e-10);
    }

    #[test]
    fn nan_entries_are_skipped() {
        let x = [1.0, 2.0, 3.0, f64::NAN];
        let y = [2.0, 3.0, 4.0, 5.0];
        let r = ttest(&x, Some(&y), &TTestOptions::default()).expect("should compute");
        // nanmean(y) = 3.5, nanmean(x) = 2.0
        assert!((r.mean_difference - 1.5).abs() < 1e-12);
        // The surviving pair differences are all 1, so the error bar vanishes.
        assert!(r.error_bar.abs() < 1e-12);
    }

    #[test]
    fn scale_percent_normalizes_by_control_mean() {
        let x = [2.0, 2.0, 2.0, 2.0];
        let y = [3.0, 3.0, 3.0, 3.0];
        let opts = TTestOptions {
            scale_percent: true,
            ..TTestOptions::default()
        };
        let r = ttest(&x, Some(&y), &opts).expect("should compute");
        assert!((r.mean_difference - 50.0).abs() < 1e-12);
        assert!(r.error_bar.abs() < 1e-12);
    }

    #[test]
    fn scale_percent_zero_control_mean_fails() {
        let x = [-1.0, 1.0, -1.0, 1.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        let opts = TTestOptions {
            scale_percent: true,
            ..TTestOptions::default()
        };
        assert!(matches!(
            ttest(&x, Some(&y), &opts),
            Err(InferenceError::Domain(_))
        ));
    }

    #[test]
    fn columns_reduce_independently() {
        // Column 0 is a clean shift; column 1 has a NaN hole in the control.
        let x: [&[f64]; 3] = [&[1.0, 10.0], &[2.0, f64::NAN], &[3.0, 30.0]];
        let y: [&[f64]; 3] = [&[2.0, 20.0], &[3.0, 25.0], &[4.0, 40.0]];
        let r = ttest_columns(&x, Some(&y), &TTestOptions::default()).expect("should compute");
        assert_eq!(r.mean_difference.len(), 2);
        assert!((r.mean_difference[0] - 1.0).abs() < 1e-12);
        assert!(r.error_bar[0].abs() < 1e-12);
        // Column 1: nanmean(y) = 85/3, nanmean(x) = 20.
        assert!((r.mean_difference[1] - (85.0 / 3.0 - 20.0)).abs() < 1e-12);
        // Surviving pair differences are [10, 10]; zero spread.
        assert!(r.error_bar[1].abs() < 1e-12);
    }

    #[test]
    fn columns_against_itself_is_zero_everywhere() {
        let x: [&[f64]; 4] = [&[1.0, 5.0], &[2.0, 6.0], &[3.0, 7.0], &[4.0, 8.0]];
        let r = ttest_columns(&x, None, &TTestOptions::default()).expect("should compute");
        for (&d, &e) in r.mean_difference.iter().zip(r.error_bar.iter()) {
            assert!(d.abs() < 1e-12);
            assert!(e.abs() < 1e-12);
        }
    }

    #[test]
    fn shape_errors() {
        let x = [1.0, 2.0, 3.0];
        assert!(matches!(
            ttest(&x, Some(&[1.0, 2.0]), &TTestOptions::default()),
            Err(InferenceError::ShapeMismatch {
                expected: 3,
                got: 2
            })
        ));
        assert!(ttest(&[1.0], None, &TTestOptions::default()).is_err()); // n < 2

        let ragged: [&[f64]; 2] = [&[1.0, 2.0], &[3.0]];
        assert!(matches!(
            ttest_columns(&ragged, None, &TTestOptions::default()),
            Err(InferenceError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn all_nan_column_fails() {
        let x = [f64::NAN, f64::NAN, f64::NAN];
        let y = [1.0, 2.0, 3.0];
        assert!(matches!(
            ttest(&x, Some(&y), &TTestOptions::default()),
            Err(InferenceError::Domain(_))
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn paired_vecs() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        proptest::collection::vec(-1e3_f64..1e3, 3..=40).prop_flat_map(|x| {
            let n = x.len();
            (Just(x), proptest::collection::vec(-1e3_f64..1e3, n..=n))
        })
    }

    proptest! {
        #[test]
        fn swap_negates_difference_and_keeps_error_bar((x, y) in paired_vecs()) {
            let opts = TTestOptions::default();
            let fwd = ttest(&x, Some(&y), &opts).unwrap();
            let rev = ttest(&y, Some(&x), &opts).unwrap();
            let scale = fwd.mean_difference.abs().max(1.0);
            prop_assert!((fwd.mean_difference + rev.mean_difference).abs() < 1e-9 * scale);
            prop_assert!((fwd.error_bar - rev.error_bar).abs() < 1e-9 * fwd.error_bar.max(1.0));
        }

        #[test]
        fn error_bar_non_negative((x, y) in paired_vecs()) {
            for paired in [true, false] {
                let opts = TTestOptions { paired, ..TTestOptions::default() };
                let r = ttest(&x, Some(&y), &opts).unwrap();
                prop_assert!(r.error_bar >= 0.0);
            }
        }
    }
}
