//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::SliderConfig;
use crate::engine::{load_peaks, probe_wav, SimulatedMedia};
use crate::error::{DolphinError, Result};
use crate::format::format_time;
use crate::waveform::AmplitudeSequence;
use crate::widget::{render_text, SliderView, WaveformSlider};

/// Ticks allowed beyond the nominal track length before giving up
const EXTRA_TICKS: usize = 16;

/// Upper bound on ticks a single simulation may take
const MAX_TICKS: f64 = 1_000_000.0;

/// Print each time as M:SS.
pub fn format(seconds: &[f64]) -> Result<()> {
    for &value in seconds {
        println!("{}", format_time(value));
    }
    Ok(())
}

/// Compute the amplitude sequence of a WAV file.
pub fn peaks(wav: &Path, bars: usize, output: Option<&Path>) -> Result<()> {
    info!("Computing {} peaks for: {}", bars, wav.display());
    check_bars(bars)?;

    let amplitudes = load_peaks(wav, bars)?;
    let json = serde_json::to_string_pretty(&amplitudes)?;

    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!("Peaks written: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Write a peaks file next to every WAV file under `dir`.
pub fn peaks_dir(dir: &Path, bars: usize) -> Result<()> {
    info!("Scanning for WAV files in: {}", dir.display());
    check_bars(bars)?;
    if !dir.is_dir() {
        return Err(DolphinError::FileNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut written = 0usize;
    let mut failed = 0usize;
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_wav(path) {
            continue;
        }

        let target = path.with_extension("peaks.json");
        let result = load_peaks(path, bars).and_then(|amplitudes| {
            fs::write(&target, serde_json::to_string(&amplitudes)?)?;
            Ok(())
        });
        match result {
            Ok(()) => {
                println!("{}", target.display());
                written += 1;
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    println!("{} peaks files written, {} failed", written, failed);
    Ok(())
}

/// Options of the `render` command.
#[derive(Debug, Default)]
pub struct RenderOptions<'a> {
    pub wav: Option<&'a Path>,
    pub seed: Option<u64>,
    pub position: f64,
    pub duration: Option<f64>,
    pub width: Option<usize>,
    pub color: bool,
    pub json: bool,
    pub config: Option<&'a Path>,
}

/// Render the widget at a playback position.
pub fn render(options: &RenderOptions<'_>) -> Result<()> {
    let config = load_config(options.config)?;
    let bars = options.width.unwrap_or(config.bar_count);
    check_bars(bars)?;

    let (source, amplitudes, media_duration) = match options.wav {
        Some(wav) => {
            info!("Rendering {}", wav.display());
            let info = probe_wav(wav)?;
            (
                wav.display().to_string(),
                load_peaks(wav, bars)?,
                Some(info.duration_secs),
            )
        }
        None => ("demo".to_string(), demo_amplitudes(bars, options.seed), None),
    };

    let media = match options.duration.or(media_duration) {
        Some(duration) => SimulatedMedia::with_duration(source.clone(), duration),
        None => SimulatedMedia::new(source.clone()),
    };

    let mut slider = WaveformSlider::new(source, amplitudes, config);
    slider.mount(media);
    load_metadata(&mut slider);
    slider.controller_mut().seek_to(options.position);

    let view = slider.view();
    if options.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render_text(&view, options.color));
    }
    Ok(())
}

/// Options of the `simulate` command.
#[derive(Debug, Default)]
pub struct SimulateOptions<'a> {
    pub wav: Option<&'a Path>,
    pub duration: f64,
    pub tick: f64,
    pub seek: Option<f64>,
    pub skips: &'a [f64],
    pub realtime: bool,
    pub config: Option<&'a Path>,
}

/// Play a simulated source from start to end-of-stream.
pub fn simulate(options: &SimulateOptions<'_>) -> Result<()> {
    if !(options.tick.is_finite() && options.tick > 0.0) {
        return Err(DolphinError::InvalidConfig {
            reason: format!("tick must be positive, got {}", options.tick),
        });
    }
    if options.wav.is_none() {
        check_duration(options.duration, options.tick)?;
    }
    let config = load_config(options.config)?;

    let (media, amplitudes) = match options.wav {
        Some(wav) => (
            SimulatedMedia::from_wav(wav)?,
            load_peaks(wav, config.bar_count)?,
        ),
        None => (
            SimulatedMedia::with_duration("simulated", options.duration),
            AmplitudeSequence::demo(config.bar_count),
        ),
    };
    let source = media.source().to_string();
    info!("Simulating playback of {}", source);

    let mut slider = WaveformSlider::new(source, amplitudes, config);
    slider.mount(media);
    let duration = load_metadata(&mut slider).unwrap_or(0.0);
    check_duration(duration, options.tick)?;

    if let Some(fraction) = options.seek {
        slider.controller_mut().seek(fraction);
    }
    slider.toggle_play_pause();
    print_progress(&slider.view());

    let max_ticks = ((duration / options.tick).ceil() as usize)
        .saturating_add(options.skips.len())
        .saturating_add(EXTRA_TICKS);
    let mut skips = options.skips.iter();
    for _ in 0..max_ticks {
        if let Some(&delta) = skips.next() {
            slider.controller_mut().skip(delta);
        }
        if let Some(media) = slider.controller_mut().media_mut() {
            media.advance(options.tick);
        }
        if options.realtime {
            thread::sleep(Duration::from_secs_f64(options.tick));
        }
        print_progress(&slider.view());

        let media_stopped = slider.controller().media().map_or(true, |m| !m.is_playing());
        if media_stopped {
            break;
        }
    }

    let state = slider.controller().state();
    slider.unmount();
    println!("Finished at {} ({})", format_time(duration), state);
    Ok(())
}

fn print_progress(view: &SliderView) {
    let text = render_text(view, false);
    let lines: Vec<&str> = text.lines().skip(1).collect();
    println!("{}", lines.join("  "));
}

fn check_duration(duration: f64, tick: f64) -> Result<()> {
    if !(duration.is_finite() && duration >= 0.0) {
        return Err(DolphinError::InvalidConfig {
            reason: format!("duration must be a non-negative number, got {}", duration),
        });
    }
    if duration / tick > MAX_TICKS {
        return Err(DolphinError::InvalidConfig {
            reason: format!("{}s at {}s per tick exceeds {} ticks", duration, tick, MAX_TICKS),
        });
    }
    Ok(())
}

fn load_metadata(slider: &mut WaveformSlider<SimulatedMedia>) -> Option<f64> {
    slider
        .controller_mut()
        .media_mut()
        .and_then(|media| media.load_metadata())
}

fn load_config(path: Option<&Path>) -> Result<SliderConfig> {
    match path {
        Some(path) => SliderConfig::load(path),
        None => Ok(SliderConfig::default()),
    }
}

fn demo_amplitudes(bars: usize, seed: Option<u64>) -> AmplitudeSequence {
    match seed {
        Some(seed) => AmplitudeSequence::seeded(bars, seed),
        None => AmplitudeSequence::demo(bars),
    }
}

fn check_bars(bars: usize) -> Result<()> {
    SliderConfig {
        bar_count: bars,
        ..SliderConfig::default()
    }
    .validate()
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}
