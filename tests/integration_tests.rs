//! Integration Tests
//!
//! End-to-end tests for the waveform transport: media events flowing into
//! the controller, the widget view and the waveform projection.

use std::path::Path;

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tempfile::TempDir;

use dolphin::config::SliderConfig;
use dolphin::engine::{
    load_peaks, MediaHandle, PlaybackController, SimulatedMedia, TransportPolicy, TransportState,
};
use dolphin::format::format_time;
use dolphin::waveform::{played_bar_count, render_bars, AmplitudeSequence};
use dolphin::widget::{render_text, Color, TrackBounds, WaveformSlider};

/// Helper to write a mono sine WAV file
fn write_sine_wav(path: &Path, sample_rate: u32, duration_secs: f64) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let frames = (sample_rate as f64 * duration_secs) as usize;
    for i in 0..frames {
        let t = i as f64 / sample_rate as f64;
        // Fade in so later bars are louder
        let envelope = t / duration_secs;
        let sample = (2.0 * std::f64::consts::PI * 220.0 * t).sin() * envelope;
        writer
            .write_sample((sample * i16::MAX as f64) as i16)
            .unwrap();
    }
    writer.finalize().unwrap();
}

fn mounted_controller(duration: f64) -> PlaybackController<SimulatedMedia> {
    let mut controller = PlaybackController::new(TransportPolicy::default());
    let mut media = SimulatedMedia::with_duration("track.wav", duration);
    media.load_metadata();
    controller.attach(media);
    controller
}

// === Full Playback Tests ===

#[test]
fn test_play_through_to_end() {
    let mut slider = WaveformSlider::new(
        "track.wav",
        AmplitudeSequence::seeded(10, 42),
        SliderConfig::default(),
    );
    slider.mount(SimulatedMedia::with_duration("track.wav", 10.0));
    slider
        .controller_mut()
        .media_mut()
        .unwrap()
        .load_metadata();

    slider.toggle_play_pause();
    assert_eq!(slider.view().toggle_label, "Pause");

    for _ in 0..4 {
        slider.controller_mut().media_mut().unwrap().advance(1.0);
    }
    let view = slider.view();
    assert_eq!(view.elapsed_label, "0:04");
    assert_eq!(view.bars.iter().filter(|b| b.played).count(), 4);

    for _ in 0..10 {
        slider.controller_mut().media_mut().unwrap().advance(1.0);
    }
    let view = slider.view();
    assert_eq!(view.elapsed_label, "0:10");
    assert_eq!(view.toggle_label, "Play");
    assert_eq!(view.state, TransportState::Paused);
    assert!(view.bars.iter().all(|b| b.played && b.color == Color::PLAYED));
}

#[test]
fn test_metadata_arriving_after_mount() {
    let mut slider = WaveformSlider::new(
        "late.wav",
        AmplitudeSequence::seeded(4, 1),
        SliderConfig::default(),
    );
    slider.mount(SimulatedMedia::with_duration("late.wav", 80.0));
    assert_eq!(slider.view().duration_label, "0:00");

    // Seeking before metadata targets zero
    slider.seek_at_pointer(50.0, TrackBounds::new(0.0, 100.0));
    assert_eq!(slider.controller().position(), 0.0);

    slider
        .controller_mut()
        .media_mut()
        .unwrap()
        .load_metadata();
    slider.seek_at_pointer(50.0, TrackBounds::new(0.0, 100.0));

    let view = slider.view();
    assert_eq!(view.duration_label, "1:20");
    assert_eq!(view.elapsed_label, "0:40");
}

#[test]
fn test_autoplay_refused() {
    let mut media = SimulatedMedia::with_duration("muted.wav", 30.0);
    media.load_metadata();
    media.set_refuse_play(true);

    let mut controller = PlaybackController::new(TransportPolicy::default());
    controller.attach(media);
    controller.toggle_play_pause();

    assert!(controller.is_paused());
    assert!(!controller.media().unwrap().is_playing());
}

#[test]
fn test_unmount_stops_updates() {
    let mut slider = WaveformSlider::new(
        "gone.wav",
        AmplitudeSequence::seeded(4, 3),
        SliderConfig::default(),
    );
    let mut media = SimulatedMedia::with_duration("gone.wav", 20.0);
    media.load_metadata();
    slider.mount(media);
    slider.toggle_play_pause();

    let mut media = slider.unmount().unwrap();
    assert_eq!(media.subscriber_count(), 0);
    assert!(!media.is_playing());

    media.play().unwrap();
    media.advance(5.0);
    assert_eq!(slider.controller().position(), 0.0);
    assert_eq!(media.current_time(), 5.0);
}

// === WAV-Backed Tests ===

#[test]
fn test_wav_backed_widget() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sine.wav");
    write_sine_wav(&path, 8000, 3.0);

    let amplitudes = load_peaks(&path, 12).unwrap();
    assert_eq!(amplitudes.len(), 12);
    assert_relative_eq!(amplitudes.iter().cloned().fold(0.0f32, f32::max), 1.0);
    assert!(amplitudes.as_slice()[0] < amplitudes.as_slice()[11]);

    let media = SimulatedMedia::from_wav(&path).unwrap();
    let mut slider = WaveformSlider::new(
        path.display().to_string(),
        amplitudes,
        SliderConfig::default(),
    );
    slider.mount(media);
    let duration = slider
        .controller_mut()
        .media_mut()
        .unwrap()
        .load_metadata()
        .unwrap();
    assert_relative_eq!(duration, 3.0, epsilon = 1e-9);

    slider.controller_mut().seek(0.5);
    let view = slider.view();
    assert_eq!(view.elapsed_label, "0:01");
    assert_eq!(view.duration_label, "0:03");
    assert_eq!(view.bars.iter().filter(|b| b.played).count(), 6);

    let text = render_text(&view, false);
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().nth(1).unwrap().starts_with("━━━━━━──────"));
}

#[test]
fn test_view_serializes_colors_as_hex() {
    let slider: WaveformSlider<SimulatedMedia> = WaveformSlider::new(
        "a.wav",
        AmplitudeSequence::new(vec![0.5]).unwrap(),
        SliderConfig::default(),
    );
    let json = serde_json::to_value(slider.view()).unwrap();
    assert_eq!(json["track_color"], "#e5e7eb");
    assert_eq!(json["bars"][0]["color"], "#e5e7eb");
    assert_eq!(json["toggle_label"], "Play");
}

// === Property Tests ===

#[test]
fn test_formatter_examples() {
    assert_eq!(format_time(0.0), "0:00");
    assert_eq!(format_time(65.0), "1:05");
    assert_eq!(format_time(3599.0), "59:59");
}

#[test]
fn test_seek_endpoints_exact() {
    let mut controller = mounted_controller(187.3);
    controller.seek(1.0);
    assert_eq!(controller.position(), 187.3);
    controller.seek(0.0);
    assert_eq!(controller.position(), 0.0);
}

proptest! {
    #[test]
    fn prop_played_count_matches_integral_progress(n in 1usize..500, k_seed in 0usize..500) {
        let k = k_seed % (n + 1);
        prop_assert_eq!(played_bar_count(n, k as f64, n as f64), k);
    }

    #[test]
    fn prop_played_count_is_ceiling(
        n in 1usize..200,
        position in 0.0f64..500.0,
        duration in 0.1f64..500.0
    ) {
        let count = played_bar_count(n, position, duration);
        let exact = n as f64 * position / duration;
        prop_assert!(count <= n);
        prop_assert!(count as f64 >= exact.min(n as f64) - 1e-6);
        prop_assert!((count as f64) < exact + 1.0 + 1e-6);
    }

    #[test]
    fn prop_toggle_twice_restores(start_playing in any::<bool>(), duration in 1.0f64..600.0) {
        let mut controller = mounted_controller(duration);
        if start_playing {
            controller.play();
        }
        let before = controller.is_playing();
        controller.toggle_play_pause();
        prop_assert_ne!(controller.is_playing(), before);
        controller.toggle_play_pause();
        prop_assert_eq!(controller.is_playing(), before);
    }

    #[test]
    fn prop_skip_round_trip(duration in 20.0f64..3600.0, fraction in 0.0f64..1.0) {
        let mut controller = mounted_controller(duration);
        let start = 10.0 + fraction * (duration - 20.0);
        controller.seek_to(start);

        controller.skip(10.0);
        controller.skip(-10.0);
        prop_assert!((controller.position() - start).abs() < 1e-9);
    }

    #[test]
    fn prop_zero_duration_plays_nothing(n in 0usize..100, position in -100.0f64..100.0) {
        let amplitudes = AmplitudeSequence::seeded(n, 9);
        let bars = render_bars(&amplitudes, position, 0.0);
        prop_assert_eq!(bars.len(), n);
        prop_assert!(bars.iter().all(|bar| !bar.played));
    }
}
