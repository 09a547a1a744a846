//! Energy-ratio metrics: clarity and definition.
//!
//! Clarity (C50/C80) compares early-arriving to late-arriving band energy;
//! definition (D50/D80) compares early-arriving to total band energy. Both
//! are computed directly from filtered signal energy and do not involve the
//! decay-curve regression.

use crate::bands::FrequencyBand;
use crate::error::{AnalysisError, Result};
use crate::filter::{ENERGY_FILTER_ORDER, bandpass};

/// Onset threshold relative to the signal peak, in dB.
///
/// Leading samples below this level are treated as pre-arrival silence and
/// trimmed so the direct sound lands at time zero.
pub const ONSET_THRESHOLD_DB: f64 = -60.0;

/// Trim leading near-silence from an impulse response.
///
/// Returns the tail starting at the first sample whose magnitude exceeds
/// [`ONSET_THRESHOLD_DB`] relative to the signal peak. Fails with
/// [`AnalysisError::EmptySignal`] when no sample rises above the threshold
/// (empty or all-zero input).
pub fn trim_onset(signal: &[f64]) -> Result<&[f64]> {
    let peak = signal.iter().fold(0.0_f64, |acc, &x| acc.max(x.abs()));
    if peak <= 0.0 {
        return Err(AnalysisError::EmptySignal);
    }

    let threshold = peak * 10.0_f64.powf(ONSET_THRESHOLD_DB / 20.0);
    let onset = signal
        .iter()
        .position(|&x| x.abs() > threshold)
        .ok_or(AnalysisError::EmptySignal)?;
    Ok(&signal[onset..])
}

/// Early/late split index for a boundary in milliseconds.
fn split_index(t_early_ms: f64, sample_rate: f64) -> usize {
    (t_early_ms / 1000.0 * sample_rate).round() as usize
}

/// Band-filter the trimmed signal and sum squared samples on each side of
/// the split.
fn band_energy_split(
    trimmed: &[f64],
    sample_rate: f64,
    band: FrequencyBand,
    split: usize,
) -> Result<(f64, f64)> {
    let filtered = bandpass(trimmed, sample_rate, band, ENERGY_FILTER_ORDER)?;
    let split = split.min(filtered.len());
    let early = filtered[..split].iter().map(|x| x * x).sum();
    let late = filtered[split..].iter().map(|x| x * x).sum();
    Ok((early, late))
}

/// Clarity of one frequency band, in dB.
///
/// `10 * log10(early energy / late energy)` with the early window spanning
/// `t_early_ms` (typically 50 or 80) from the trimmed onset. An early window
/// past the end of the signal yields `+inf`.
pub fn clarity_in_band(
    signal: &[f64],
    sample_rate: f64,
    band: FrequencyBand,
    t_early_ms: f64,
) -> Result<f64> {
    let trimmed = trim_onset(signal)?;
    let split = split_index(t_early_ms, sample_rate);
    let (early, late) = band_energy_split(trimmed, sample_rate, band, split)
        .map_err(|e| e.in_band(band))?;
    Ok(10.0 * (early / late).log10())
}

/// Definition of one frequency band, in dB.
///
/// `10 * log10(early energy / total energy)`; the linear ratio lies in
/// [0, 1], so the result is at most 0 dB. Uses the exact same split index
/// as [`clarity_in_band`] for the same `t_early_ms`.
pub fn definition_in_band(
    signal: &[f64],
    sample_rate: f64,
    band: FrequencyBand,
    t_early_ms: f64,
) -> Result<f64> {
    let trimmed = trim_onset(signal)?;
    let split = split_index(t_early_ms, sample_rate);
    let (early, late) = band_energy_split(trimmed, sample_rate, band, split)
        .map_err(|e| e.in_band(band))?;
    Ok(10.0 * (early / (early + late)).log10())
}

/// Clarity for each band of `bands`, in dB.
///
/// The outer error reports a signal with no content above the onset
/// threshold; the inner entries are per-band results, index-aligned with the
/// input band list.
pub fn clarity(
    signal: &[f64],
    sample_rate: f64,
    bands: &[FrequencyBand],
    t_early_ms: f64,
) -> Result<Vec<Result<f64>>> {
    let trimmed = trim_onset(signal)?;
    let split = split_index(t_early_ms, sample_rate);
    Ok(bands
        .iter()
        .map(|&band| {
            let (early, late) = band_energy_split(trimmed, sample_rate, band, split)
                .map_err(|e| e.in_band(band))?;
            Ok(10.0 * (early / late).log10())
        })
        .collect())
}

/// Definition for each band of `bands`, in dB.
///
/// Same shape as [`clarity`]; both use the identical early/late split.
pub fn definition(
    signal: &[f64],
    sample_rate: f64,
    bands: &[FrequencyBand],
    t_early_ms: f64,
) -> Result<Vec<Result<f64>>> {
    let trimmed = trim_onset(signal)?;
    let split = split_index(t_early_ms, sample_rate);
    Ok(bands
        .iter()
        .map(|&band| {
            let (early, late) = band_energy_split(trimmed, sample_rate, band, split)
                .map_err(|e| e.in_band(band))?;
            Ok(10.0 * (early / (early + late)).log10())
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn decaying_sine(freq_hz: f64, rt60: f64, sample_rate: f64, duration_secs: f64) -> Vec<f64> {
        let num_samples = (duration_secs * sample_rate) as usize;
        let rate = (1000.0_f64).ln() / rt60;
        (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                (-rate * t).exp() * (2.0 * PI * freq_hz * t).sin()
            })
            .collect()
    }

    #[test]
    fn trim_onset_drops_leading_silence() {
        let mut signal = vec![0.0; 100];
        signal.extend([0.5, 0.4, 0.3]);
        let trimmed = trim_onset(&signal).unwrap();
        assert_eq!(trimmed.len(), 3);
        assert_eq!(trimmed[0], 0.5);
    }

    #[test]
    fn trim_onset_keeps_scaling_invariant() {
        let mut signal = vec![0.0; 50];
        signal.extend([0.001, 0.0008]);
        // The threshold is relative to the peak, so a quiet but valid
        // measurement is not flagged as empty.
        let trimmed = trim_onset(&signal).unwrap();
        assert_eq!(trimmed.len(), 2);
    }

    #[test]
    fn silence_fails_with_empty_signal() {
        assert!(matches!(
            trim_onset(&[0.0; 64]),
            Err(AnalysisError::EmptySignal)
        ));
        assert!(matches!(trim_onset(&[]), Err(AnalysisError::EmptySignal)));
    }

    #[test]
    fn split_index_rounds_to_nearest_sample() {
        assert_eq!(split_index(50.0, 8000.0), 400);
        assert_eq!(split_index(80.0, 44100.0), 3528);
        assert_eq!(split_index(50.0, 44100.0), 2205);
    }

    #[test]
    fn clarity_definition_identity_holds() {
        // 10^(C/10) = D / (1 - D) with D = 10^(definition/10), for the same
        // band and split.
        let sample_rate = 8000.0;
        let signal = decaying_sine(1000.0, 0.7, sample_rate, 1.5);
        let band = FrequencyBand::new(707.107, 1414.214);

        let c = clarity_in_band(&signal, sample_rate, band, 80.0).unwrap();
        let d_db = definition_in_band(&signal, sample_rate, band, 80.0).unwrap();
        let d = 10.0_f64.powf(d_db / 10.0);

        let lhs = 10.0_f64.powf(c / 10.0);
        let rhs = d / (1.0 - d);
        assert!(
            (lhs - rhs).abs() / rhs < 1e-9,
            "identity violated: {lhs} vs {rhs}"
        );
    }

    #[test]
    fn fast_decay_has_high_clarity() {
        let sample_rate = 8000.0;
        let band = FrequencyBand::new(707.107, 1414.214);

        let fast = decaying_sine(1000.0, 0.2, sample_rate, 1.0);
        let slow = decaying_sine(1000.0, 2.0, sample_rate, 1.0);

        let c_fast = clarity_in_band(&fast, sample_rate, band, 50.0).unwrap();
        let c_slow = clarity_in_band(&slow, sample_rate, band, 50.0).unwrap();
        assert!(
            c_fast > c_slow,
            "faster decay should be clearer: {c_fast} vs {c_slow}"
        );
        assert!(c_fast > 0.0, "most energy is early, got {c_fast} dB");
    }

    #[test]
    fn definition_is_at_most_zero_db() {
        let sample_rate = 8000.0;
        let signal = decaying_sine(500.0, 0.6, sample_rate, 1.0);
        let band = FrequencyBand::new(353.553, 707.107);

        let d = definition_in_band(&signal, sample_rate, band, 50.0).unwrap();
        assert!(d <= 0.0, "definition ratio cannot exceed 1, got {d} dB");
    }

    #[test]
    fn per_band_errors_do_not_abort_the_batch() {
        let sample_rate = 8000.0;
        let signal = decaying_sine(1000.0, 0.5, sample_rate, 1.0);
        let bands = [
            FrequencyBand::new(500.0, 5000.0), // upper edge past Nyquist
            FrequencyBand::new(707.107, 1414.214),
        ];

        let results = clarity(&signal, sample_rate, &bands, 50.0).unwrap();
        assert!(matches!(
            results[0].as_ref(),
            Err(AnalysisError::Band { .. })
        ));
        assert!(results[1].is_ok());
    }

    #[test]
    fn empty_signal_fails_before_any_band() {
        let bands = [FrequencyBand::new(500.0, 2000.0)];
        let err = clarity(&[0.0; 256], 8000.0, &bands, 50.0);
        assert!(matches!(err, Err(AnalysisError::EmptySignal)));
    }
}
