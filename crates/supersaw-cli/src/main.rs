//! Supersaw CLI - offline rendering and inspection of the supersaw voice.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "supersaw")]
#[command(author, version, about = "Supersaw voice CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a patch to a WAV file
    Render(commands::render::RenderArgs),

    /// Print the detune curve table
    Detune(commands::detune::DetuneArgs),

    /// List or show factory patches
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Detune(args) => commands::detune::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
