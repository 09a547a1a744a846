//! Clarity and definition subcommands.

use clap::Args;
use sala_analysis::metrics::{clarity, definition};
use std::path::PathBuf;

use super::common::{self, TableKind};

/// Which energy-ratio metric to compute.
#[derive(Debug, Clone, Copy)]
pub enum Metric {
    /// Early-to-late energy ratio.
    Clarity,
    /// Early-to-total energy ratio.
    Definition,
}

impl Metric {
    fn name(self) -> &'static str {
        match self {
            Metric::Clarity => "clarity",
            Metric::Definition => "definition",
        }
    }
}

/// Arguments for `sala clarity` and `sala definition`.
#[derive(Args)]
pub struct EnergyArgs {
    /// Input impulse response (WAV, or delimited text with --sample-rate)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Early-time boundary in milliseconds (50 for C50/D50, 80 for C80/D80)
    #[arg(long, default_value = "80")]
    early_ms: f64,

    /// Sample rate in Hz (required for text input, ignored for WAV)
    #[arg(long)]
    sample_rate: Option<f64>,

    /// Generated band table to analyze over
    #[arg(long, value_enum, default_value = "octave")]
    table: TableKind,

    /// Explicit band as LOW:HIGH in Hz; repeatable, overrides --table
    #[arg(long = "band", value_name = "LOW:HIGH")]
    bands: Vec<String>,

    /// Field separator for text input
    #[arg(long, default_value = ",")]
    separator: char,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

/// Run `sala clarity` or `sala definition`.
pub fn run(args: EnergyArgs, metric: Metric) -> anyhow::Result<()> {
    let (signal, sample_rate) = common::load_signal(&args.input, args.sample_rate, args.separator)?;
    let bands = common::resolve_bands(args.table, &args.bands)?;

    tracing::info!(
        metric = metric.name(),
        early_ms = args.early_ms,
        bands = bands.len(),
        "computing energy ratio"
    );
    let results = match metric {
        Metric::Clarity => clarity(&signal, sample_rate, &bands, args.early_ms)?,
        Metric::Definition => definition(&signal, sample_rate, &bands, args.early_ms)?,
    };

    let report = common::Report::from_results(
        &args.input,
        sample_rate,
        metric.name().to_string(),
        "dB",
        Some(args.early_ms),
        &bands,
        results,
    );
    report.emit(args.json)
}
