//! Waveform Slider Widget
//!
//! Composes the playback controller, the waveform projection and the time
//! formatter into the audio transport widget: a clickable waveform track,
//! skip-back / play-pause / skip-forward controls and elapsed / total time
//! labels. The widget produces a host-agnostic [`SliderView`]; drawing it
//! is up to the host (see [`render_text`] for a terminal rendering).

mod color;
mod text;

pub use color::Color;
pub use text::render_text;

use serde::Serialize;
use tracing::{debug, debug_span};
use uuid::Uuid;

use crate::config::SliderConfig;
use crate::engine::{MediaHandle, PlaybackController, TransportState};
use crate::format::format_time;
use crate::waveform::{render_bars, AmplitudeSequence};

/// On-screen bounds of the waveform track along the seek axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    /// Left edge in pointer coordinates
    pub left: f64,
    /// Width in pointer coordinates
    pub width: f64,
}

impl TrackBounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Seek fraction for a pointer x-coordinate, clamped into `[0, 1]`
    ///
    /// Returns `None` when the track has no usable width.
    pub fn fraction_at(&self, pointer_x: f64) -> Option<f64> {
        if !(self.width.is_finite() && self.width > 0.0) || !pointer_x.is_finite() {
            return None;
        }
        Some(((pointer_x - self.left) / self.width).clamp(0.0, 1.0))
    }
}

/// A waveform bar with its resolved color
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarView {
    pub height_percent: f32,
    pub played: bool,
    pub color: Color,
}

/// Everything a host needs to draw the widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderView {
    pub bars: Vec<BarView>,
    pub track_color: Color,
    pub elapsed_label: String,
    pub duration_label: String,
    /// Accessible label of the play/pause button ("Play" or "Pause")
    pub toggle_label: String,
    pub skip_back_label: String,
    pub skip_forward_label: String,
    pub state: TransportState,
}

/// Audio transport widget bound to a media handle of type `M`
pub struct WaveformSlider<M: MediaHandle> {
    id: Uuid,
    audio_src: String,
    amplitudes: AmplitudeSequence,
    config: SliderConfig,
    controller: PlaybackController<M>,
}

impl<M: MediaHandle> WaveformSlider<M> {
    /// Create an unmounted widget
    pub fn new(
        audio_src: impl Into<String>,
        amplitudes: AmplitudeSequence,
        config: SliderConfig,
    ) -> Self {
        let controller = PlaybackController::new(config.transport_policy());
        Self {
            id: Uuid::new_v4(),
            audio_src: audio_src.into(),
            amplitudes,
            config,
            controller,
        }
    }

    /// Unique id of this widget instance
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Source reference the widget plays
    pub fn audio_src(&self) -> &str {
        &self.audio_src
    }

    /// Amplitudes drawn as the waveform
    pub fn amplitudes(&self) -> &AmplitudeSequence {
        &self.amplitudes
    }

    /// Styling and transport configuration
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// The underlying playback controller
    pub fn controller(&self) -> &PlaybackController<M> {
        &self.controller
    }

    /// The underlying playback controller, mutably
    pub fn controller_mut(&mut self) -> &mut PlaybackController<M> {
        &mut self.controller
    }

    /// Bind the media handle for `audio_src`; subscribes to its events
    pub fn mount(&mut self, media: M) {
        let _span = debug_span!("slider", id = %self.id).entered();
        if self.controller.attach(media).is_some() {
            debug!("Replaced media handle of {}", self.audio_src);
        }
        debug!("Mounted {}", self.audio_src);
    }

    /// Tear the widget down, releasing event subscriptions
    pub fn unmount(&mut self) -> Option<M> {
        let _span = debug_span!("slider", id = %self.id).entered();
        let media = self.controller.detach();
        if media.is_some() {
            debug!("Unmounted {}", self.audio_src);
        }
        media
    }

    /// Whether a media handle is mounted
    pub fn is_mounted(&self) -> bool {
        self.controller.is_attached()
    }

    // ========================================================================
    // User Interaction
    // ========================================================================

    pub fn toggle_play_pause(&mut self) {
        self.controller.toggle_play_pause();
    }

    pub fn skip_back(&mut self) {
        self.controller.skip(-self.config.skip_seconds);
    }

    pub fn skip_forward(&mut self) {
        self.controller.skip(self.config.skip_seconds);
    }

    /// Click-to-seek on the waveform track
    pub fn seek_at_pointer(&mut self, pointer_x: f64, bounds: TrackBounds) {
        match bounds.fraction_at(pointer_x) {
            Some(fraction) => self.controller.seek(fraction),
            None => debug!("Ignoring seek on a track without width"),
        }
    }

    // ========================================================================
    // View
    // ========================================================================

    pub fn view(&self) -> SliderView {
        let snapshot = self.controller.snapshot();
        let bars = render_bars(&self.amplitudes, snapshot.position, snapshot.duration)
            .into_iter()
            .map(|bar| BarView {
                height_percent: bar.height_percent,
                played: bar.played,
                color: if bar.played {
                    self.config.played_color
                } else {
                    self.config.unplayed_color
                },
            })
            .collect();

        let toggle_label = match snapshot.state {
            TransportState::Playing => "Pause",
            TransportState::Paused => "Play",
        };
        let skip = format_skip(self.config.skip_seconds);

        SliderView {
            bars,
            track_color: self.config.unplayed_color,
            elapsed_label: format_time(snapshot.position),
            duration_label: format_time(snapshot.duration),
            toggle_label: toggle_label.to_string(),
            skip_back_label: format!("Skip backward {} seconds", skip),
            skip_forward_label: format!("Skip forward {} seconds", skip),
            state: snapshot.state,
        }
    }
}

fn format_skip(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{}", seconds as i64)
    } else {
        format!("{}", seconds)
    }
}
