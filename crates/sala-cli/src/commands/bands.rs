//! Band-table subcommand.

use clap::Args;
use sala_analysis::bands::{octave_bands, third_octave_bands};
use serde::Serialize;

use super::common::TableKind;

/// Arguments for `sala bands`.
#[derive(Args)]
pub struct BandsArgs {
    /// Which table to print
    #[arg(value_enum, default_value = "octave")]
    table: TableKind,

    /// Emit the table as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct BandRow {
    center_hz: f64,
    low_hz: f64,
    high_hz: f64,
}

/// Run `sala bands`.
pub fn run(args: BandsArgs) -> anyhow::Result<()> {
    let table = match args.table {
        TableKind::Octave => octave_bands(),
        TableKind::ThirdOctave => third_octave_bands(),
    };

    let rows: Vec<BandRow> = table
        .centers
        .iter()
        .zip(table.bounds.iter())
        .map(|(&center_hz, bound)| BandRow {
            center_hz,
            low_hz: bound.low_hz,
            high_hz: bound.high_hz,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("  {:>12}  {:>12}  {:>12}", "Center (Hz)", "Low (Hz)", "High (Hz)");
        println!("  {:>12}  {:>12}  {:>12}", "-----------", "--------", "---------");
        for row in &rows {
            println!(
                "  {:>12.3}  {:>12.3}  {:>12.3}",
                row.center_hz, row.low_hz, row.high_hz
            );
        }
    }
    Ok(())
}
