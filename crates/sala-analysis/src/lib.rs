//! Sala Analysis - Room-acoustic metrics from measured impulse responses
//!
//! This crate computes the standard decay metrics of a room from a mono
//! impulse response:
//!
//! - [`bands`] - Octave and third-octave band tables
//! - [`filter`] - Butterworth band-pass filtering as cascaded biquad sections
//! - [`decay`] - Schroeder energy decay curves and EDT/T10/T20/T30/T60
//!   estimation
//! - [`reverb`] - Per-band reverberation-time drivers
//! - [`metrics`] - Clarity (C50/C80) and definition (D50/D80)
//! - [`room`] - Theoretical T60 (Sabine, Eyring) from room geometry
//! - [`environment`] - Sound speed, air density, wavelength conversion
//!
//! All analysis is offline and single-threaded: signals are `&[f64]` slices
//! owned by the caller, every per-band computation is independent, and
//! failures are deterministic functions of the input data.
//!
//! ## Example Workflow
//!
//! ```rust
//! use sala_analysis::{Estimator, octave_bands, reverberation_time};
//!
//! // 1. Load a mono impulse response (external, e.g. sala-io)
//! let sample_rate = 48000.0;
//! let ir: Vec<f64> = (0..48000)
//!     .map(|i| (-8.0 * i as f64 / sample_rate).exp())
//!     .collect();
//!
//! // 2. Pick the band list and the estimator
//! let table = octave_bands();
//!
//! // 3. One result per band, in band order
//! let results = reverberation_time(&ir, sample_rate, &table.bounds, Estimator::T30);
//! for (band, rt) in table.bounds.iter().zip(&results) {
//!     match rt {
//!         Ok(seconds) => println!("{:>9.3} Hz  {seconds:.2} s", band.center_hz()),
//!         Err(e) => println!("{:>9.3} Hz  {e}", band.center_hz()),
//!     }
//! }
//! ```

pub mod bands;
pub mod decay;
pub mod environment;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod reverb;
pub mod room;

// Re-export main types
pub use bands::{BandKind, BandTable, FrequencyBand, band_table, octave_bands, third_octave_bands};
pub use decay::{DecayCurve, DecayPolicy, Estimator, decay_curve, decay_time};
pub use error::{AnalysisError, Result};
pub use filter::{BandpassFilter, DECAY_FILTER_ORDER, ENERGY_FILTER_ORDER, bandpass};
pub use metrics::{
    ONSET_THRESHOLD_DB, clarity, clarity_in_band, definition, definition_in_band, trim_onset,
};
pub use reverb::{reverberation_time, reverberation_time_in_band};
pub use room::{shoebox_surfaces, t60_eyring, t60_sabine};
