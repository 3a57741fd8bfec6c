//! Two-sided critical values of the Student's t distribution.
//!
//! Shared by the slope-significance test and the paired/unpaired mean test
//! to turn a standard error into a confidence-interval half-width.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{InferenceError, Result};

/// Two-sided Student-t critical value for a confidence level given as a
/// percentage.
///
/// The two-sided level is converted to the one-sided cumulative probability
/// `p = 1 − (1 − ci/100)/2`, and the quantile of the t distribution with
/// `df` degrees of freedom at `p` is returned. As `df` grows the value
/// approaches the normal critical value (≈ 1.96 at 95 %).
///
/// # Errors
///
/// `Domain` if `confidence_percent` is outside `(0, 100)` or `df` is zero.
///
/// # Examples
///
/// ```
/// use u_inference::critical::t_critical_value;
///
/// let t = t_critical_value(95.0, 10_000).unwrap();
/// assert!((t - 1.96).abs() < 0.01);
/// ```
pub fn t_critical_value(confidence_percent: f64, df: usize) -> Result<f64> {
    if !(confidence_percent > 0.0 && confidence_percent < 100.0) {
        return Err(InferenceError::Domain(format!(
            "confidence level {confidence_percent} must be in (0, 100)"
        )));
    }
    if df == 0 {
        return Err(InferenceError::Domain(
            "degrees of freedom must be positive".into(),
        ));
    }

    let p = 1.0 - (1.0 - confidence_percent / 100.0) / 2.0;
    let dist = StudentsT::new(0.0, 1.0, df as f64)
        .map_err(|e| InferenceError::Domain(e.to_string()))?;
    Ok(dist.inverse_cdf(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        // Standard t-table entries, 95 % two-sided.
        assert!((t_critical_value(95.0, 1).unwrap() - 12.706).abs() < 1e-2);
        assert!((t_critical_value(95.0, 10).unwrap() - 2.228).abs() < 1e-3);
        assert!((t_critical_value(95.0, 30).unwrap() - 2.042).abs() < 1e-3);
    }

    #[test]
    fn decreases_toward_normal_limit() {
        let mut prev = f64::INFINITY;
        for df in [1, 2, 5, 10, 50, 100, 1000, 100_000] {
            let t = t_critical_value(95.0, df).unwrap();
            assert!(t < prev, "t({df}) = {t} should be below {prev}");
            prev = t;
        }
        assert!((prev - 1.959964).abs() < 1e-3);
    }

    #[test]
    fn higher_confidence_gives_wider_interval() {
        let t90 = t_critical_value(90.0, 20).unwrap();
        let t99 = t_critical_value(99.0, 20).unwrap();
        assert!(t99 > t90);
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(t_critical_value(0.0, 10).is_err());
        assert!(t_critical_value(100.0, 10).is_err());
        assert!(t_critical_value(-5.0, 10).is_err());
        assert!(t_critical_value(f64::NAN, 10).is_err());
        assert!(t_critical_value(95.0, 0).is_err());
    }
}
