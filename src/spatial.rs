//! Spatial weighting helpers for latitude-gridded data.
//!
//! Area weighting by the cosine of latitude, and the weighted mean that
//! consumes those weights.

use crate::error::{InferenceError, Result};

/// Cosine-of-latitude weights for area-weighted averaging.
///
/// Latitudes are in degrees; the weight at the equator is 1 and falls off
/// toward the poles.
///
/// # Examples
///
/// ```
/// use u_inference::spatial::latitude_weights;
///
/// let w = latitude_weights(&[0.0, 60.0]);
/// assert!((w[0] - 1.0).abs() < 1e-12);
/// assert!((w[1] - 0.5).abs() < 1e-12);
/// ```
pub fn latitude_weights(lats_deg: &[f64]) -> Vec<f64> {
    lats_deg
        .iter()
        .map(|&lat| (lat * std::f64::consts::PI / 180.0).cos())
        .collect()
}

/// Weighted arithmetic mean, `Σ wᵢ·xᵢ / Σ wᵢ`.
///
/// # Errors
///
/// - `ShapeMismatch` if `data` and `weights` differ in length.
/// - `Domain` if the input is empty or the total weight is zero.
pub fn weighted_mean(data: &[f64], weights: &[f64]) -> Result<f64> {
    if data.len() != weights.len() {
        return Err(InferenceError::ShapeMismatch {
            expected: data.len(),
            got: weights.len(),
        });
    }
    if data.is_empty() {
        return Err(InferenceError::Domain("empty input".into()));
    }

    let total: f64 = weights.iter().sum();
    if total.abs() < 1e-300 {
        return Err(InferenceError::Domain("total weight is zero".into()));
    }

    let weighted_sum: f64 = data
        .iter()
        .zip(weights.iter())
        .map(|(&x, &w)| x * w)
        .sum();
    Ok(weighted_sum / total)
}
