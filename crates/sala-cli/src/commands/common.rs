//! Shared helpers for the analysis subcommands: signal loading, band
//! selection, and report rendering.

use anyhow::{Context, bail};
use clap::ValueEnum;
use sala_analysis::bands::{FrequencyBand, octave_bands, third_octave_bands};
use sala_analysis::error::AnalysisError;
use serde::Serialize;
use std::path::Path;

/// Which generated band table to analyze over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableKind {
    /// Octave-spaced bands.
    Octave,
    /// Third-octave-spaced bands.
    ThirdOctave,
}

/// Load a mono impulse response from a WAV or delimited-text file.
///
/// WAV files carry their own sample rate; text files need `--sample-rate`.
pub fn load_signal(
    path: &Path,
    sample_rate: Option<f64>,
    separator: char,
) -> anyhow::Result<(Vec<f64>, f64)> {
    let is_wav = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));

    let (samples, rate) = if is_wav {
        let (samples, rate) = sala_io::read_wav(path)
            .with_context(|| format!("failed to load '{}'", path.display()))?;
        (samples, f64::from(rate))
    } else {
        let samples = sala_io::read_text(path, separator)
            .with_context(|| format!("failed to load '{}'", path.display()))?;
        let Some(rate) = sample_rate else {
            bail!("'{}' is a text file; pass --sample-rate", path.display());
        };
        (samples, rate)
    };

    tracing::info!(
        samples = samples.len(),
        sample_rate = rate,
        "loaded impulse response"
    );
    Ok((samples, rate))
}

/// Resolve the band list for a run: explicit `--band low:high` pairs when
/// given, otherwise the selected generated table.
pub fn resolve_bands(table: TableKind, custom: &[String]) -> anyhow::Result<Vec<FrequencyBand>> {
    if custom.is_empty() {
        let table = match table {
            TableKind::Octave => octave_bands(),
            TableKind::ThirdOctave => third_octave_bands(),
        };
        return Ok(table.bounds);
    }

    custom
        .iter()
        .map(|spec| {
            let (low, high) = spec
                .split_once(':')
                .with_context(|| format!("band '{spec}' is not of the form LOW:HIGH"))?;
            let low: f64 = low
                .trim()
                .parse()
                .with_context(|| format!("band '{spec}': bad lower edge"))?;
            let high: f64 = high
                .trim()
                .parse()
                .with_context(|| format!("band '{spec}': bad upper edge"))?;
            Ok(FrequencyBand::new(low, high))
        })
        .collect()
}

/// One row of a per-band report.
#[derive(Debug, Serialize)]
pub struct BandReport {
    /// Lower band edge in Hz.
    pub low_hz: f64,
    /// Upper band edge in Hz.
    pub high_hz: f64,
    /// Geometric center frequency in Hz.
    pub center_hz: f64,
    /// The computed metric, when the band succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// The band's failure, when it did not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A whole analysis run, serializable as `--json` output.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Input file path.
    pub file: String,
    /// Sample rate the analysis ran at, Hz.
    pub sample_rate: f64,
    /// Metric name (e.g. `t30`, `clarity`).
    pub metric: String,
    /// Unit of the per-band values.
    pub unit: &'static str,
    /// Early-time boundary in ms, for the energy-ratio metrics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t_early_ms: Option<f64>,
    /// Per-band rows, in input band order.
    pub bands: Vec<BandReport>,
}

impl Report {
    /// Assemble a report from per-band results aligned with `bands`.
    pub fn from_results(
        file: &Path,
        sample_rate: f64,
        metric: String,
        unit: &'static str,
        t_early_ms: Option<f64>,
        bands: &[FrequencyBand],
        results: Vec<Result<f64, AnalysisError>>,
    ) -> Self {
        let bands = bands
            .iter()
            .zip(results)
            .map(|(band, result)| {
                let (value, error) = match result {
                    Ok(v) => (Some(v), None),
                    Err(e) => (None, Some(e.to_string())),
                };
                BandReport {
                    low_hz: band.low_hz,
                    high_hz: band.high_hz,
                    center_hz: band.center_hz(),
                    value,
                    error,
                }
            })
            .collect();

        Report {
            file: file.display().to_string(),
            sample_rate,
            metric,
            unit,
            t_early_ms,
            bands,
        }
    }

    /// Render the report, as JSON or as an aligned text table, and fail the
    /// run if not a single band succeeded.
    pub fn emit(&self, json: bool) -> anyhow::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(self)?);
        } else {
            println!("{} ({}) of {}:", self.metric, self.unit, self.file);
            println!("  {:>12}  {:>24}", "Center (Hz)", "Value");
            println!("  {:>12}  {:>24}", "-----------", "-----");
            for band in &self.bands {
                match (band.value, &band.error) {
                    (Some(value), _) => {
                        println!("  {:>12.3}  {:>24.3}", band.center_hz, value);
                    }
                    (None, Some(error)) => println!("  {:>12.3}  {error}", band.center_hz),
                    (None, None) => {}
                }
            }
        }

        if self.bands.iter().all(|b| b.value.is_none()) {
            bail!("no band could be computed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_bands_defaults_to_octave_table() {
        let bands = resolve_bands(TableKind::Octave, &[]).unwrap();
        assert_eq!(bands.len(), 11);
        assert_eq!(bands[0].low_hz, 11.049);
    }

    #[test]
    fn resolve_bands_parses_custom_pairs() {
        let custom = vec!["500:2000".to_string(), " 20 : 80 ".to_string()];
        let bands = resolve_bands(TableKind::Octave, &custom).unwrap();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].low_hz, 500.0);
        assert_eq!(bands[0].high_hz, 2000.0);
        assert_eq!(bands[1].low_hz, 20.0);
    }

    #[test]
    fn resolve_bands_rejects_malformed_pairs() {
        assert!(resolve_bands(TableKind::Octave, &["500-2000".to_string()]).is_err());
        assert!(resolve_bands(TableKind::Octave, &["abc:2000".to_string()]).is_err());
    }

    #[test]
    fn report_emit_fails_when_every_band_failed() {
        let report = Report {
            file: "ir.wav".to_string(),
            sample_rate: 48000.0,
            metric: "t30".to_string(),
            unit: "s",
            t_early_ms: None,
            bands: vec![BandReport {
                low_hz: 500.0,
                high_hz: 2000.0,
                center_hz: 1000.0,
                value: None,
                error: Some("decay curve never reaches -35 dB".to_string()),
            }],
        };
        assert!(report.emit(false).is_err());
    }
}
