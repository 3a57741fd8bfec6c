//! # u-inference
//!
//! Statistical inference estimators for numeric sample data: descriptive
//! summaries, paired/unpaired significance testing, weighted spatial
//! averaging, linear regression, and bootstrap confidence intervals.
//!
//! This crate is domain-agnostic — everything operates on raw `f64` data —
//! but the shapes of the estimators come from analyzing geophysical and
//! atmospheric observation samples, where missing values (NaN) are routine
//! and every point estimate needs an uncertainty bound next to it.
//!
//! ## Modules
//!
//! - [`critical`] — Two-sided Student-t critical values
//! - [`regression`] — Covariance slope with significance; OLS with R²
//! - [`ttest`] — Paired/unpaired mean differences with error bars
//! - [`bootstrap`] — Empirical bootstrap confidence intervals (delta form)
//! - [`describe`] — Descriptive summary of a sample
//! - [`spatial`] — Latitude weights and weighted means
//! - [`channel`] — Per-channel summaries of QC'd radiance observations
//! - [`stats`] — NaN-aware reductions underlying the estimators
//!
//! ## Design Philosophy
//!
//! - **Explicit missing-data semantics**: NaN skipping happens through
//!   visible masks in [`stats`], not inside opaque library calls
//! - **Explicit randomness**: the bootstrap takes a caller-provided RNG,
//!   so seeded runs reproduce exactly
//! - **Typed results**: each estimator returns a dedicated result struct
//!   rather than loose tuples

pub mod bootstrap;
pub mod channel;
pub mod critical;
pub mod describe;
pub mod error;
pub mod regression;
pub mod spatial;
pub mod stats;
pub mod ttest;
