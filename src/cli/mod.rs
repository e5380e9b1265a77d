//! CLI Module
//!
//! Command-line interface for exercising the waveform transport widget.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dolphin - waveform audio transport
#[derive(Parser, Debug)]
#[command(name = "dolphin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format seconds as M:SS
    #[command(name = "format")]
    Format {
        /// Times in seconds
        #[arg(required = true, allow_negative_numbers = true)]
        seconds: Vec<f64>,
    },

    /// Compute the amplitude sequence of a WAV file
    #[command(name = "peaks")]
    Peaks {
        /// Input WAV file
        wav: PathBuf,

        /// Number of bars
        #[arg(short, long, default_value_t = crate::config::DEFAULT_BAR_COUNT)]
        bars: usize,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write <name>.peaks.json next to every WAV file under a directory
    #[command(name = "peaks-dir")]
    PeaksDir {
        /// Directory to walk
        dir: PathBuf,

        /// Number of bars
        #[arg(short, long, default_value_t = crate::config::DEFAULT_BAR_COUNT)]
        bars: usize,
    },

    /// Render the widget at a playback position
    #[command(name = "render")]
    Render {
        /// WAV file to draw the waveform from
        #[arg(long)]
        wav: Option<PathBuf>,

        /// Seed for the generated waveform when no WAV is given
        #[arg(long, conflicts_with = "wav")]
        seed: Option<u64>,

        /// Playback position in seconds
        #[arg(short, long, default_value_t = 0.0)]
        position: f64,

        /// Duration in seconds (defaults to the WAV duration)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Number of bars (defaults to the configured bar count)
        #[arg(short, long)]
        width: Option<usize>,

        /// Color the waveform with ANSI escapes
        #[arg(long)]
        color: bool,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,

        /// Slider configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Play a simulated source to the end, printing the widget per tick
    #[command(name = "simulate")]
    Simulate {
        /// WAV file supplying duration and waveform
        #[arg(long)]
        wav: Option<PathBuf>,

        /// Duration in seconds when no WAV is given
        #[arg(short, long, default_value_t = 30.0)]
        duration: f64,

        /// Simulated seconds per tick
        #[arg(short, long, default_value_t = 1.0)]
        tick: f64,

        /// Seek to this fraction of the track before playing
        #[arg(long)]
        seek: Option<f64>,

        /// Skips (seconds, negative for backward) applied on successive ticks
        #[arg(long, allow_negative_numbers = true)]
        skip: Vec<f64>,

        /// Sleep for each tick in wall-clock time
        #[arg(long)]
        realtime: bool,

        /// Slider configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
