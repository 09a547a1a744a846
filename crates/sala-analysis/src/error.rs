//! Error types for acoustic analysis operations.

use thiserror::Error;

use crate::bands::FrequencyBand;

/// Errors that can occur during room-acoustic analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Malformed frequency range for a bandpass filter.
    ///
    /// Raised when the lower edge is not positive, the upper edge does not
    /// exceed the lower edge, or the upper edge reaches the Nyquist frequency.
    #[error("invalid frequency band {low_hz} Hz - {high_hz} Hz")]
    InvalidBand {
        /// Lower band edge in Hz.
        low_hz: f64,
        /// Upper band edge in Hz.
        high_hz: f64,
    },

    /// Unknown reverberation-time estimator name.
    #[error("unknown estimator: {0}")]
    InvalidEstimator(String),

    /// The decay curve never reaches a drop threshold required by the
    /// selected estimator. The signal is too short, too quiet, or too
    /// reverberant for the requested decay range.
    #[error("decay curve never reaches {threshold_db} dB")]
    InsufficientDecayRange {
        /// The unreached level in dB relative to the curve start.
        threshold_db: f64,
    },

    /// The regression over the decay region produced a non-negative slope,
    /// which means the input is not a decaying impulse response.
    #[error("decay region is not decaying (regression slope {slope})")]
    NonDecayingCurve {
        /// Fitted slope in dB per second.
        slope: f64,
    },

    /// The signal holds no content above the onset threshold.
    #[error("signal contains no samples above the onset threshold")]
    EmptySignal,

    /// Room formula inputs disagree on the number of boundaries.
    #[error("{surfaces} surfaces but {alphas} absorption coefficients")]
    MismatchedLengths {
        /// Number of boundary surfaces supplied.
        surfaces: usize,
        /// Number of absorption coefficients supplied.
        alphas: usize,
    },

    /// A per-band failure, tagged with the band it occurred in.
    #[error("band {low_hz} Hz - {high_hz} Hz: {source}")]
    Band {
        /// Lower band edge in Hz.
        low_hz: f64,
        /// Upper band edge in Hz.
        high_hz: f64,
        /// The underlying failure.
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Tag this error with the frequency band it occurred in.
    ///
    /// Used by the multi-band drivers so a per-band entry in a result
    /// collection names the offending band. Band-tagged errors are returned
    /// unchanged.
    pub fn in_band(self, band: FrequencyBand) -> Self {
        match self {
            AnalysisError::Band { .. } => self,
            other => AnalysisError::Band {
                low_hz: band.low_hz,
                high_hz: band.high_hz,
                source: Box::new(other),
            },
        }
    }
}

/// Convenience result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
