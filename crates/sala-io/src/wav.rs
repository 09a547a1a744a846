//! WAV impulse-response reading and writing.

use crate::Result;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Read a WAV file into mono f64 samples.
///
/// Integer PCM is normalized to [-1, 1] by its bit depth; IEEE float passes
/// through. Multi-channel files are mixed down to mono by averaging
/// channels, which is adequate for impulse responses captured with an
/// incidental second channel.
///
/// Returns the samples and the file's sample rate in Hz.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, u32)> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let samples: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = f64::from(1u32 << (spec.bits_per_sample - 1));
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f64>() / channels as f64)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec.sample_rate))
}

/// Write mono f64 samples to a 32-bit float WAV file.
///
/// Counterpart to [`read_wav`]; used for fixtures and round-trip tests.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f64], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample as f32)?;
    }
    writer.finalize()?;
    Ok(())
}
