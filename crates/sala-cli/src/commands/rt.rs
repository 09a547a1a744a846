//! Reverberation-time subcommand.

use clap::Args;
use sala_analysis::decay::Estimator;
use sala_analysis::reverb::reverberation_time;
use std::path::PathBuf;

use super::common::{self, TableKind};

/// Arguments for `sala rt`.
#[derive(Args)]
pub struct RtArgs {
    /// Input impulse response (WAV, or delimited text with --sample-rate)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Estimator: edt, t10, t20, t30 or t60
    #[arg(long, default_value = "t30")]
    estimator: String,

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

/// Run `sala rt`.
pub fn run(args: RtArgs) -> anyhow::Result<()> {
    let estimator: Estimator = args.estimator.parse()?;
    let (signal, sample_rate) = common::load_signal(&args.input, args.sample_rate, args.separator)?;
    let bands = common::resolve_bands(args.table, &args.bands)?;

    tracing::info!(%estimator, bands = bands.len(), "estimating reverberation time");
    let results = reverberation_time(&signal, sample_rate, &bands, estimator);

    let report = common::Report::from_results(
        &args.input,
        sample_rate,
        estimator.to_string(),
        "s",
        None,
        &bands,
        results,
    );
    report.emit(args.json)
}
