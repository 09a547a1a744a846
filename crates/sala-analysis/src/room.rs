//! Theoretical reverberation time of rooms.
//!
//! Closed-form estimates from room geometry and boundary absorption, used to
//! sanity-check measured decay times. One absorption coefficient per
//! boundary; multi-band predictions are a per-band loop at the call site.

use crate::error::{AnalysisError, Result};

/// Surface area of each boundary of a shoebox room, in m².
///
/// Order: the two side walls, front and rear walls, floor and ceiling.
pub fn shoebox_surfaces(length: f64, width: f64, height: f64) -> [f64; 6] {
    let sidewall = length * height;
    let front_rear = width * height;
    let floor_ceiling = width * length;

    [
        sidewall,
        sidewall,
        front_rear,
        front_rear,
        floor_ceiling,
        floor_ceiling,
    ]
}

/// Surface-weighted mean absorption coefficient.
fn mean_absorption(surfaces: &[f64], alphas: &[f64]) -> Result<(f64, f64)> {
    if surfaces.len() != alphas.len() {
        return Err(AnalysisError::MismatchedLengths {
            surfaces: surfaces.len(),
            alphas: alphas.len(),
        });
    }

    let total: f64 = surfaces.iter().sum();
    let absorbed: f64 = surfaces.iter().zip(alphas.iter()).map(|(s, a)| s * a).sum();
    Ok((total, absorbed / total))
}

/// Reverberation time by Sabine's equation, in seconds.
///
/// `T60 = 0.161 * V / (S * mean_alpha)` where `mean_alpha` is the
/// surface-weighted mean absorption coefficient.
pub fn t60_sabine(volume: f64, surfaces: &[f64], alphas: &[f64]) -> Result<f64> {
    let (total_surface, alpha) = mean_absorption(surfaces, alphas)?;
    Ok(0.161 * volume / (total_surface * alpha))
}

/// Reverberation time by the Eyring-Norris equation, in seconds.
///
/// `T60 = 0.161 * V / (-S * ln(1 - mean_alpha))`. Tighter than Sabine for
/// absorbent rooms.
pub fn t60_eyring(volume: f64, surfaces: &[f64], alphas: &[f64]) -> Result<f64> {
    let (total_surface, alpha) = mean_absorption(surfaces, alphas)?;
    Ok(0.161 * volume / (-total_surface * (1.0 - alpha).ln()))
}
