//! Dolphin CLI - Waveform Audio Transport
//!
//! Command-line interface for the Dolphin waveform transport widget.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dolphin::cli::commands::{self, RenderOptions, SimulateOptions};
use dolphin::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Dolphin v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Dolphin v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

/// Logs go to stderr so JSON on stdout stays parseable
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Format { seconds } => commands::format(&seconds).context("format failed"),
        Commands::Peaks { wav, bars, output } => commands::peaks(&wav, bars, output.as_deref())
            .with_context(|| format!("failed to compute peaks of {}", wav.display())),
        Commands::PeaksDir { dir, bars } => commands::peaks_dir(&dir, bars)
            .with_context(|| format!("failed to scan {}", dir.display())),
        Commands::Render {
            wav,
            seed,
            position,
            duration,
            width,
            color,
            json,
            config,
        } => {
            let options = RenderOptions {
                wav: wav.as_deref(),
                seed,
                position,
                duration,
                width,
                color,
                json,
                config: config.as_deref(),
            };
            commands::render(&options).context("render failed")
        }
        Commands::Simulate {
            wav,
            duration,
            tick,
            seek,
            skip,
            realtime,
            config,
        } => {
            let options = SimulateOptions {
                wav: wav.as_deref(),
                duration,
                tick,
                seek,
                skips: &skip,
                realtime,
                config: config.as_deref(),
            };
            commands::simulate(&options).context("simulation failed")
        }
    }
}
