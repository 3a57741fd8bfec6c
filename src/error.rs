//! Error types shared by all estimators.
//!
//! Every failure is detected synchronously at the call site and reported
//! through [`InferenceError`]; there is no retry or recovery path. The one
//! exception is NaN dropping in the bootstrap, which is a diagnostic notice
//! rather than an error.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Errors raised by the estimators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// Input sequences required to have equal length/shape do not.
    #[error("shape mismatch: expected {expected} observations, got {got}")]
    ShapeMismatch {
        /// Length of the reference input.
        expected: usize,
        /// Length of the offending input.
        got: usize,
    },

    /// A mathematically undefined configuration: zero variance, confidence
    /// level outside its valid range, non-positive degrees of freedom,
    /// empty sample after NaN removal, and similar.
    #[error("domain error: {0}")]
    Domain(String),
}
