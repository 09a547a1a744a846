//! Impulse-response file loading for the Sala acoustics toolkit.
//!
//! This crate provides:
//!
//! - **WAV loading**: [`read_wav`] decodes a WAV file to mono f64 samples
//!   with its sample rate ([`write_wav`] is the matching writer, mainly for
//!   fixtures and round-trip tests)
//! - **Text loading**: [`read_text`] reads one-sample-per-line delimited
//!   text exports, the common interchange format for measured impulse
//!   responses
//!
//! Audio decoding is deliberately thin: the analysis crates consume plain
//! `Vec<f64>` slices and never touch the filesystem themselves.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sala_io::read_wav;
//!
//! let (samples, sample_rate) = read_wav("hall.wav")?;
//! println!("{} samples at {} Hz", samples.len(), sample_rate);
//! ```

mod text;
mod wav;

pub use text::read_text;
pub use wav::{read_wav, write_wav};

/// Error types for impulse-response loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A text line that does not parse as a sample value.
    #[error("line {line}: cannot parse sample value '{value}'")]
    Parse {
        /// 1-based line number of the offending entry.
        line: usize,
        /// The text that failed to parse.
        value: String,
    },
}

/// Convenience result type for impulse-response loading.
pub type Result<T> = std::result::Result<T, Error>;
