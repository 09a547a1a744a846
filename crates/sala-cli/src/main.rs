//! Sala CLI - room-acoustics analysis from measured impulse responses.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sala")]
#[command(author, version, about = "Room acoustics analysis from measured impulse responses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reverberation time per frequency band
    Rt(commands::rt::RtArgs),

    /// Clarity (early-to-late energy ratio) per frequency band
    Clarity(commands::energy::EnergyArgs),

    /// Definition (early-to-total energy ratio) per frequency band
    Definition(commands::energy::EnergyArgs),

    /// Print a band table
    Bands(commands::bands::BandsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rt(args) => commands::rt::run(args),
        Commands::Clarity(args) => commands::energy::run(args, commands::energy::Metric::Clarity),
        Commands::Definition(args) => {
            commands::energy::run(args, commands::energy::Metric::Definition)
        }
        Commands::Bands(args) => commands::bands::run(args),
    }
}
