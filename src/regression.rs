//! Regression estimators.
//!
//! Covariance-based slope estimation with a confidence-interval significance
//! decision, and ordinary least squares with R².
//!
//! # Examples
//!
//! ```
//! use u_inference::regression::{fit_linear, slope_significance};
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [2.0, 4.0, 6.0, 8.0, 10.0];
//!
//! let s = slope_significance(&x, &y, 95.0).unwrap();
//! assert!((s.slope - 2.0).abs() < 1e-10);
//! assert!(s.is_significant);
//!
//! let fit = fit_linear(&x, &y).unwrap();
//! assert!((fit.r_squared - 1.0).abs() < 1e-10);
//! ```

use crate::critical::t_critical_value;
use crate::error::{InferenceError, Result};
use crate::stats;

/// Result of the covariance-based slope test: y ≈ slope · x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeSignificance {
    /// Regression coefficient, cov(x, y) / var(x).
    pub slope: f64,
    /// Standard error of the slope.
    pub standard_error: f64,
    /// Whether |slope| exceeds the confidence-interval half-width.
    pub is_significant: bool,
}

/// Result of an ordinary least-squares fit: y ≈ slope · x + intercept.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit {
    /// Fitted values, `slope · x[i] + intercept` for each input point.
    pub predictions: Vec<f64>,
    /// Coefficient of determination, 1 − SSres/SStot.
    pub r_squared: f64,
    /// Intercept (β₀).
    pub intercept: f64,
    /// Slope (β₁).
    pub slope: f64,
}

impl LinearFit {
    /// Predicted value at `x`. The stored [`predictions`](Self::predictions)
    /// come from this same expression, so the two are bit-identical.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

// ---------------------------------------------------------------------------
// Slope significance
// ---------------------------------------------------------------------------

/// Regression coefficient with standard error and significance at the given
/// confidence level (percent).
///
/// # Algorithm
///
/// With sample covariances at ddof = 1:
///
/// ```text
/// rc = cov_xy / cov_xx
/// se = (cov_yy − rc²·cov_xx)·(n−1)/(n−2)      residual variance
/// sb = √(se / (cov_xx·(n−1)))                  standard error of rc
/// eb = t_crit(ci, 2n−2) · sb                   error bar
/// ```
///
/// The slope is significant iff `|rc| − |eb| > 0`.
///
/// # Errors
///
/// - `ShapeMismatch` if `x` and `y` differ in length.
/// - `Domain` if `n < 3` (the residual-variance factor `(n−1)/(n−2)` needs
///   n ≥ 3), if `x` is constant (undefined slope), if inputs contain
///   non-finite values, or if the confidence level is invalid.
pub fn slope_significance(
    x: &[f64],
    y: &[f64],
    confidence_percent: f64,
) -> Result<SlopeSignificance> {
    let n = x.len();
    if n != y.len() {
        return Err(InferenceError::ShapeMismatch {
            expected: n,
            got: y.len(),
        });
    }
    if n < 3 {
        return Err(InferenceError::Domain(format!(
            "need at least 3 observations, got {n}"
        )));
    }
    if x.iter().any(|v| !v.is_finite()) || y.iter().any(|v| !v.is_finite()) {
        return Err(InferenceError::Domain("inputs must be finite".into()));
    }

    let cov_xx = stats::variance(x).ok_or_else(undefined_moments)?;
    let cov_yy = stats::variance(y).ok_or_else(undefined_moments)?;
    let cov_xy = stats::covariance(x, y).ok_or_else(undefined_moments)?;

    if cov_xx < 1e-300 {
        return Err(InferenceError::Domain(
            "x has zero variance, slope is undefined".into(),
        ));
    }

    let nf = n as f64;
    let rc = cov_xy / cov_xx;
    // Exact fits can round slightly negative.
    let se = ((cov_yy - rc * rc * cov_xx) * (nf - 1.0) / (nf - 2.0)).max(0.0);
    let sb = (se / (cov_xx * (nf - 1.0))).sqrt();
    let eb = t_critical_value(confidence_percent, 2 * n - 2)? * sb;

    Ok(SlopeSignificance {
        slope: rc,
        standard_error: sb,
        is_significant: rc.abs() - eb.abs() > 0.0,
    })
}

fn undefined_moments() -> InferenceError {
    InferenceError::Domain("sample moments are undefined".into())
}

// ---------------------------------------------------------------------------
// Ordinary least squares
// ---------------------------------------------------------------------------

/// Closed-form OLS fit of y ≈ slope · x + intercept.
///
/// # Algorithm
///
/// β₁ = cov(x, y) / var(x), β₀ = ȳ − β₁·x̄. R² is computed on the training
/// data; when the response has no variance (SStot ≈ 0) the fit is exact and
/// R² is reported as 1.
///
/// # Errors
///
/// - `ShapeMismatch` if `x` and `y` differ in length.
/// - `Domain` if `n < 2`, `x` is constant, or inputs contain non-finite
///   values.
pub fn fit_linear(x: &[f64], y: &[f64]) -> Result<LinearFit> {
    let n = x.len();
    if n != y.len() {
        return Err(InferenceError::ShapeMismatch {
            expected: n,
            got: y.len(),
        });
    }
    if n < 2 {
        return Err(InferenceError::Domain(format!(
            "need at least 2 observations, got {n}"
        )));
    }
    if x.iter().any(|v| !v.is_finite()) || y.iter().any(|v| !v.is_finite()) {
        return Err(InferenceError::Domain("inputs must be finite".into()));
    }

    let x_mean = stats::mean(x).ok_or_else(undefined_moments)?;
    let y_mean = stats::mean(y).ok_or_else(undefined_moments)?;
    let x_var = stats::variance(x).ok_or_else(undefined_moments)?;
    let cov = stats::covariance(x, y).ok_or_else(undefined_moments)?;

    if x_var < 1e-300 {
        return Err(InferenceError::Domain(
            "x has zero variance, slope is undefined".into(),
        ));
    }

    let slope = cov / x_var;
    let intercept = y_mean - slope * x_mean;

    let mut fit = LinearFit {
        predictions: Vec::new(),
        r_squared: 1.0,
        intercept,
        slope,
    };
    fit.predictions = x.iter().map(|&xi| fit.predict(xi)).collect();

    let ss_res: f64 = y
        .iter()
        .zip(fit.predictions.iter())
        .map(|(&yi, &fi)| (yi - fi) * (yi - fi))
        .sum();
    let ss_tot: f64 = y.iter().map(|&yi| (yi - y_mean) * (yi - y_mean)).sum();

    if ss_tot > 1e-300 {
        fit.r_squared = 1.0 - ss_res / ss_tot;
    }

    Ok(fit)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn paired_vecs() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        proptest::collection::vec(-1e3_f64..1e3, 5..=30).prop_flat_map(|x| {
            let n = x.len();
            (Just(x), proptest::collection::vec(-1e3_f64..1e3, n..=n))
        })
    }

    proptest! {
        #[test]
        fn fit_r_squared_bounded((x, y) in paired_vecs()) {
            if let Ok(fit) = fit_linear(&x, &y) {
                prop_assert!(fit.r_squared >= -0.01 && fit.r_squared <= 1.01,
                    "R² = {}", fit.r_squared);
            }
        }

        #[test]
        fn slope_matches_ols_slope((x, y) in paired_vecs()) {
            if let (Ok(s), Ok(fit)) = (slope_significance(&x, &y, 95.0), fit_linear(&x, &y)) {
                let tol = 1e-8 * s.slope.abs().max(1.0);
                prop_assert!((s.slope - fit.slope).abs() < tol,
                    "covariance slope {} vs OLS slope {}", s.slope, fit.slope);
            }
        }

        #[test]
        fn standard_error_non_negative((x, y) in paired_vecs()) {
            if let Ok(s) = slope_significance(&x, &y, 95.0) {
                prop_assert!(s.standard_error >= 0.0);
            }
        }
    }
}
