//! Per-band reverberation-time drivers.
//!
//! Each band is computed independently: band-pass filter the raw impulse
//! response, build its decay curve, run the estimator. A failed band never
//! aborts later bands; the multi-band entry point returns one result per
//! input band, index-aligned with the band list, with errors tagged by the
//! offending band.

use crate::bands::FrequencyBand;
use crate::decay::{Estimator, decay_curve, decay_time};
use crate::error::Result;
use crate::filter::{DECAY_FILTER_ORDER, bandpass};

/// Reverberation time of one frequency band, in seconds.
pub fn reverberation_time_in_band(
    signal: &[f64],
    sample_rate: f64,
    band: FrequencyBand,
    estimator: Estimator,
) -> Result<f64> {
    let run = || {
        let filtered = bandpass(signal, sample_rate, band, DECAY_FILTER_ORDER)?;
        let curve = decay_curve(&filtered, sample_rate);
        decay_time(&curve, estimator)
    };
    run().map_err(|e| e.in_band(band))
}

/// Reverberation time for each band of `bands`, in seconds.
///
/// Results are index-aligned with the input band list. Each entry is the
/// band's reverberation time or the error that band produced.
pub fn reverberation_time(
    signal: &[f64],
    sample_rate: f64,
    bands: &[FrequencyBand],
    estimator: Estimator,
) -> Vec<Result<f64>> {
    bands
        .iter()
        .map(|&band| reverberation_time_in_band(signal, sample_rate, band, estimator))
        .collect()
}
