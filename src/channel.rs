//! Channel-by-channel summary of quality-controlled radiance observations.
//!
//! Aggregates observation-minus-forecast (OMF) departures per instrument
//! channel, keeping only observations that passed quality control. An
//! observation is accepted when its QC flag is zero *and* its inverse
//! observation error is positive — the inverse error is the more reliable
//! of the two rejection signals.

use std::collections::BTreeMap;

use crate::stats;

/// One radiance observation with its quality-control metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelObservation {
    /// Instrument channel number.
    pub channel: u32,
    /// Quality-control flag; 0.0 means the observation passed QC.
    pub qc_flag: f64,
    /// Inverse of the assigned observation error; non-positive values mark
    /// rejected observations.
    pub inverse_observation_error: f64,
    /// Observation minus forecast, without bias adjustment.
    pub omf_unadjusted: f64,
    /// Observation minus forecast, bias-adjusted.
    pub omf_adjusted: f64,
}

/// Per-channel OMF statistics over the accepted observations.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSummary {
    /// Instrument channel number.
    pub channel: u32,
    /// Number of accepted observations.
    pub count: usize,
    /// Mean of the unadjusted departures; NaN when `count` is zero.
    pub omf_unadjusted_mean: f64,
    /// Mean of the bias-adjusted departures; NaN when `count` is zero.
    pub omf_adjusted_mean: f64,
    /// Population standard deviation of the unadjusted departures.
    pub omf_unadjusted_stddev: f64,
    /// Population standard deviation of the bias-adjusted departures.
    pub omf_adjusted_stddev: f64,
}

/// Summarizes observations channel by channel, in ascending channel order.
///
/// Every channel present in the input appears in the output; channels whose
/// observations were all rejected report a count of 0 and NaN statistics.
pub fn channel_summary(observations: &[ChannelObservation]) -> Vec<ChannelSummary> {
    let mut by_channel: BTreeMap<u32, Vec<&ChannelObservation>> = BTreeMap::new();
    for obs in observations {
        by_channel.entry(obs.channel).or_default().push(obs);
    }

    by_channel
        .into_iter()
        .map(|(channel, obs)| {
            let accepted: Vec<&ChannelObservation> = obs
                .into_iter()
                .filter(|o| o.qc_flag == 0.0 && o.inverse_observation_error > 0.0)
                .collect();

            let unadjusted: Vec<f64> = accepted.iter().map(|o| o.omf_unadjusted).collect();
            let adjusted: Vec<f64> = accepted.iter().map(|o| o.omf_adjusted).collect();

            ChannelSummary {
                channel,
                count: accepted.len(),
                omf_unadjusted_mean: stats::mean(&unadjusted).unwrap_or(f64::NAN),
                omf_adjusted_mean: stats::mean(&adjusted).unwrap_or(f64::NAN),
                omf_unadjusted_stddev: stats::population_std_dev(&unadjusted)
                    .unwrap_or(f64::NAN),
                omf_adjusted_stddev: stats::population_std_dev(&adjusted).unwrap_or(f64::NAN),
            }
        })
        .collect()
}
