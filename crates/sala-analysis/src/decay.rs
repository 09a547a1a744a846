//! Energy decay curves and reverberation-time estimation.
//!
//! The decay curve is obtained by Schroeder backward integration of the
//! squared impulse response; reverberation time is then extracted by linear
//! regression over a level region selected by the estimator policy.

use std::fmt;
use std::str::FromStr;

use crate::error::{AnalysisError, Result};

/// A decay curve: level over time, normalized to 0 dB at the start of the
/// backward integration.
///
/// `times` and `levels_db` are index-aligned. Levels are non-increasing in
/// principle; a silent tail shows up as `-inf` (and pure silence as NaN)
/// entries, which the estimator treats as an invalid region.
#[derive(Debug, Clone)]
pub struct DecayCurve {
    /// Time of each point in seconds.
    pub times: Vec<f64>,
    /// Level of each point in dB relative to the curve maximum.
    pub levels_db: Vec<f64>,
}

impl DecayCurve {
    /// Number of points in the curve.
    pub fn len(&self) -> usize {
        self.levels_db.len()
    }

    /// Whether the curve holds no points.
    pub fn is_empty(&self) -> bool {
        self.levels_db.is_empty()
    }
}

/// Build the energy decay curve of a filtered impulse response
/// (Schroeder backward integration).
///
/// The signal is normalized by its peak magnitude, squared, and cumulatively
/// summed from the tail toward the front, so each point holds the total
/// energy remaining from that instant to the end. The result is expressed in
/// dB relative to its maximum, on a time axis derived from `sample_rate`.
pub fn decay_curve(signal: &[f64], sample_rate: f64) -> DecayCurve {
    let peak = signal.iter().fold(0.0_f64, |acc, &x| acc.max(x.abs()));

    let mut remaining = Vec::with_capacity(signal.len());
    let mut sum = 0.0;
    for &x in signal.iter().rev() {
        let normalized = x.abs() / peak;
        sum += normalized * normalized;
        remaining.push(sum);
    }
    remaining.reverse();

    let total = remaining.first().copied().unwrap_or(0.0);
    let levels_db = remaining.iter().map(|&e| 10.0 * (e / total).log10()).collect();
    let times = (0..signal.len()).map(|i| i as f64 / sample_rate).collect();

    DecayCurve { times, levels_db }
}

/// Reverberation-time estimator policy.
///
/// Each estimator reads a different level window of the decay curve and
/// scales the regression result so all of them report the time of a full
/// 60 dB decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimator {
    /// Early decay time: 0 to -10 dB, scaled by 6.
    Edt,
    /// -5 to -15 dB, scaled by 6.
    T10,
    /// -5 to -25 dB, scaled by 3.
    T20,
    /// -5 to -35 dB, scaled by 2.
    T30,
    /// -5 to -65 dB, unscaled.
    T60,
}

/// Level window and scaling of one estimator.
#[derive(Debug, Clone, Copy)]
pub struct DecayPolicy {
    /// Level at which the regression region starts, dB.
    pub start_db: f64,
    /// Level at which the regression region ends, dB.
    pub end_db: f64,
    /// Factor extrapolating the regression window to a 60 dB decay.
    pub multiplier: f64,
}

impl Estimator {
    /// All estimators, in increasing decay-range order.
    pub const ALL: [Estimator; 5] = [
        Estimator::Edt,
        Estimator::T10,
        Estimator::T20,
        Estimator::T30,
        Estimator::T60,
    ];

    /// The level window and scaling of this estimator.
    pub fn policy(self) -> DecayPolicy {
        let (start_db, end_db, multiplier) = match self {
            Estimator::Edt => (0.0, -10.0, 6.0),
            Estimator::T10 => (-5.0, -15.0, 6.0),
            Estimator::T20 => (-5.0, -25.0, 3.0),
            Estimator::T30 => (-5.0, -35.0, 2.0),
            Estimator::T60 => (-5.0, -65.0, 1.0),
        };
        DecayPolicy {
            start_db,
            end_db,
            multiplier,
        }
    }

    /// Canonical lowercase name of this estimator.
    pub fn name(self) -> &'static str {
        match self {
            Estimator::Edt => "edt",
            Estimator::T10 => "t10",
            Estimator::T20 => "t20",
            Estimator::T30 => "t30",
            Estimator::T60 => "t60",
        }
    }
}

impl fmt::Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Estimator {
    type Err = AnalysisError;

    /// Case-insensitive lookup; fails with
    /// [`AnalysisError::InvalidEstimator`] for unknown names.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "edt" => Ok(Estimator::Edt),
            "t10" => Ok(Estimator::T10),
            "t20" => Ok(Estimator::T20),
            "t30" => Ok(Estimator::T30),
            "t60" => Ok(Estimator::T60),
            _ => Err(AnalysisError::InvalidEstimator(s.to_string())),
        }
    }
}

/// Slope and intercept of an ordinary-least-squares line fit.
fn linear_regression(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for &(x, y) in points {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Some((slope, intercept))
}

/// First index whose level is finite and at or below `threshold_db`.
///
/// Non-finite levels (the silent tail of a truncated recording) never count
/// as reaching a threshold.
fn first_crossing(levels_db: &[f64], threshold_db: f64) -> Option<usize> {
    levels_db
        .iter()
        .position(|&level| level.is_finite() && level <= threshold_db)
}

/// Extract a reverberation time from a decay curve.
///
/// Locates the estimator's level region, fits a line to the finite
/// `(time, level)` pairs in `[start, end)`, and scales the time the fitted
/// line spends between the two levels up to a 60 dB decay.
///
/// Fails with [`AnalysisError::InsufficientDecayRange`] when the curve never
/// reaches one of the policy thresholds (or leaves fewer than two points to
/// fit), and with [`AnalysisError::NonDecayingCurve`] when the fitted slope
/// is not negative.
pub fn decay_time(curve: &DecayCurve, estimator: Estimator) -> Result<f64> {
    let policy = estimator.policy();

    let start = first_crossing(&curve.levels_db, policy.start_db).ok_or(
        AnalysisError::InsufficientDecayRange {
            threshold_db: policy.start_db,
        },
    )?;
    let end = first_crossing(&curve.levels_db, policy.end_db).ok_or(
        AnalysisError::InsufficientDecayRange {
            threshold_db: policy.end_db,
        },
    )?;

    let region: Vec<(f64, f64)> = (start..end)
        .filter(|&i| curve.levels_db[i].is_finite())
        .map(|i| (curve.times[i], curve.levels_db[i]))
        .collect();

    let (slope, intercept) =
        linear_regression(&region).ok_or(AnalysisError::InsufficientDecayRange {
            threshold_db: policy.end_db,
        })?;

    if slope >= 0.0 {
        return Err(AnalysisError::NonDecayingCurve { slope });
    }

    let t_start = (policy.start_db - intercept) / slope;
    let t_end = (policy.end_db - intercept) / slope;
    Ok(policy.multiplier * (t_end - t_start))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Exponential decay with a known 60 dB decay time.
    fn exponential_ir(rt60: f64, sample_rate: f64, duration_secs: f64) -> Vec<f64> {
        let num_samples = (duration_secs * sample_rate) as usize;
        // ln(1000) so the envelope falls 60 dB over rt60 seconds.
        let rate = (1000.0_f64).ln() / rt60;
        (0..num_samples)
            .map(|i| (-rate * i as f64 / sample_rate).exp())
            .collect()
    }

    #[test]
    fn curve_starts_at_zero_db() {
        let ir = exponential_ir(0.5, 8000.0, 1.0);
        let curve = decay_curve(&ir, 8000.0);
        assert_eq!(curve.len(), ir.len());
        assert!(curve.levels_db[0].abs() < 1e-9);
        assert_eq!(curve.times[0], 0.0);
    }

    #[test]
    fn curve_is_non_increasing() {
        let ir = exponential_ir(0.5, 8000.0, 1.0);
        let curve = decay_curve(&ir, 8000.0);
        for pair in curve.levels_db.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-12);
        }
    }

    #[test]
    fn silence_yields_invalid_levels() {
        let curve = decay_curve(&[0.0; 256], 8000.0);
        assert!(curve.levels_db.iter().all(|l| !l.is_finite()));
    }

    #[test]
    fn estimator_parses_case_insensitively() {
        assert_eq!("T30".parse::<Estimator>().unwrap(), Estimator::T30);
        assert_eq!("edt".parse::<Estimator>().unwrap(), Estimator::Edt);
        assert_eq!("T60".parse::<Estimator>().unwrap(), Estimator::T60);
    }

    #[test]
    fn unknown_estimator_is_rejected() {
        let err = "t25".parse::<Estimator>();
        assert!(matches!(err, Err(AnalysisError::InvalidEstimator(name)) if name == "t25"));
    }

    #[test]
    fn policy_table_matches_standard() {
        let p = Estimator::T30.policy();
        assert_eq!((p.start_db, p.end_db, p.multiplier), (-5.0, -35.0, 2.0));
        let p = Estimator::Edt.policy();
        assert_eq!((p.start_db, p.end_db, p.multiplier), (0.0, -10.0, 6.0));
        let p = Estimator::T60.policy();
        assert_eq!((p.start_db, p.end_db, p.multiplier), (-5.0, -65.0, 1.0));
    }

    #[test]
    fn recovers_known_decay_time() {
        let rt60 = 0.6;
        let sample_rate = 8000.0;
        let ir = exponential_ir(rt60, sample_rate, 1.5);
        let curve = decay_curve(&ir, sample_rate);

        for estimator in Estimator::ALL {
            let rt = decay_time(&curve, estimator).unwrap();
            assert!(
                (rt - rt60).abs() / rt60 < 0.05,
                "{estimator}: got {rt}, expected {rt60}"
            );
        }
    }

    #[test]
    fn silence_reports_insufficient_range() {
        let curve = decay_curve(&[0.0; 1024], 8000.0);
        let err = decay_time(&curve, Estimator::T30);
        assert!(matches!(
            err,
            Err(AnalysisError::InsufficientDecayRange { threshold_db }) if threshold_db == -5.0
        ));
    }

    #[test]
    fn short_decay_reports_unreached_threshold() {
        // A constant signal of 100 samples bottoms out at -20 dB of
        // remaining energy, so -35 dB is never reached.
        let curve = decay_curve(&[1.0; 100], 8000.0);
        let err = decay_time(&curve, Estimator::T30);
        assert!(matches!(
            err,
            Err(AnalysisError::InsufficientDecayRange { threshold_db }) if threshold_db == -35.0
        ));
    }

    #[test]
    fn non_decaying_region_is_flagged() {
        // Non-physical curve: the level rises back up between the two
        // thresholds, so the fitted slope is positive.
        let mut levels = vec![0.0, -6.0];
        levels.extend((0..50).map(|i| -6.0 + 0.1 * f64::from(i)));
        levels.push(-36.0);
        let times = (0..levels.len()).map(|i| i as f64 / 1000.0).collect();
        let curve = DecayCurve {
            times,
            levels_db: levels,
        };

        let err = decay_time(&curve, Estimator::T30);
        assert!(
            matches!(err, Err(AnalysisError::NonDecayingCurve { slope }) if slope > 0.0),
            "got {err:?}"
        );
    }
}
