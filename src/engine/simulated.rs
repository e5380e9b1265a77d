//! Simulated Media Handle
//!
//! A deterministic, clock-driven [`MediaHandle`] used by the CLI and the
//! tests. Time only moves when [`SimulatedMedia::advance`] is called, and
//! metadata only "loads" when [`SimulatedMedia::load_metadata`] is called,
//! so the asynchronous behavior of a real audio element can be replayed
//! step by step.

use std::path::Path;

use tracing::{debug, warn};

use crate::engine::io::probe_wav;
use crate::engine::media::{EventHub, MediaEvent, MediaHandle, MediaListener, Subscription};
use crate::error::{DolphinError, Result};

/// Clock-driven stand-in for a native audio element
#[derive(Debug)]
pub struct SimulatedMedia {
    source: String,
    /// Duration reported by the source once metadata loads
    source_duration: Option<f64>,
    /// Duration visible to observers (None until metadata loads)
    duration: Option<f64>,
    position: f64,
    playing: bool,
    refuse_play: bool,
    events: EventHub,
}

impl SimulatedMedia {
    /// Create a handle for a source whose duration is not known
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            source_duration: None,
            duration: None,
            position: 0.0,
            playing: false,
            refuse_play: false,
            events: EventHub::new(),
        }
    }

    /// Create a handle whose metadata will report `duration` seconds
    ///
    /// A negative or non-finite duration is unusable; the handle then
    /// behaves like a source without metadata.
    pub fn with_duration(source: impl Into<String>, duration: f64) -> Self {
        let mut media = Self::new(source);
        if duration.is_finite() && duration >= 0.0 {
            media.source_duration = Some(duration);
        } else {
            warn!(source = %media.source, duration, "[MEDIA] Ignoring unusable duration");
        }
        media
    }

    /// Create a handle backed by the metadata of a WAV file
    pub fn from_wav(path: &Path) -> Result<Self> {
        let info = probe_wav(path)?;
        Ok(Self::with_duration(
            path.display().to_string(),
            info.duration_secs,
        ))
    }

    /// Source reference this handle plays
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Deliver the "metadata loaded" notification
    ///
    /// Returns the loaded duration, or `None` if the source has no
    /// metadata. Loading twice re-emits nothing.
    pub fn load_metadata(&mut self) -> Option<f64> {
        if self.duration.is_some() {
            return self.duration;
        }
        let duration = self.source_duration?;
        self.duration = Some(duration);
        debug!(source = %self.source, duration, "[MEDIA] Metadata loaded");
        self.events.emit(MediaEvent::MetadataLoaded { duration });
        Some(duration)
    }

    /// Make subsequent `play()` calls fail, as a host autoplay policy would
    pub fn set_refuse_play(&mut self, refuse: bool) {
        self.refuse_play = refuse;
    }

    /// Whether the simulated element is advancing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Number of live event subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.events.listener_count()
    }

    /// Advance the clock by `elapsed` seconds
    ///
    /// Emits a time update while playing; on reaching the end the element
    /// stops and emits `Ended` after the final time update.
    pub fn advance(&mut self, elapsed: f64) {
        if !self.playing || !(elapsed.is_finite() && elapsed > 0.0) {
            return;
        }

        let mut ended = false;
        self.position += elapsed;
        if let Some(duration) = self.duration {
            if self.position >= duration {
                self.position = duration;
                self.playing = false;
                ended = true;
            }
        }

        self.events.emit(MediaEvent::TimeUpdate {
            position: self.position,
        });
        if ended {
            debug!(source = %self.source, "[MEDIA] Ended");
            self.events.emit(MediaEvent::Ended);
        }
    }

    fn clamp_position(&self, seconds: f64) -> f64 {
        let seconds = if seconds.is_nan() { 0.0 } else { seconds.max(0.0) };
        match self.duration {
            Some(duration) => seconds.min(duration),
            None => seconds,
        }
    }
}

impl MediaHandle for SimulatedMedia {
    fn play(&mut self) -> Result<()> {
        if self.refuse_play {
            return Err(DolphinError::PlaybackRefused {
                reason: format!("playback of '{}' not allowed", self.source),
            });
        }
        // A finished element restarts from the beginning
        if let Some(duration) = self.duration {
            if self.position >= duration {
                self.position = 0.0;
            }
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.position = self.clamp_position(seconds);
        self.events.emit(MediaEvent::TimeUpdate {
            position: self.position,
        });
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn subscribe(&self, listener: MediaListener) -> Subscription {
        self.events.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(media: &SimulatedMedia) -> (Rc<RefCell<Vec<MediaEvent>>>, Subscription) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let sub = media.subscribe(Box::new(move |event| sink.borrow_mut().push(*event)));
        (events, sub)
    }

    #[test]
    fn test_metadata_loads_once() {
        let mut media = SimulatedMedia::with_duration("a.wav", 30.0);
        let (events, _sub) = recorder(&media);
        assert_eq!(media.duration(), None);

        assert_eq!(media.load_metadata(), Some(30.0));
        assert_eq!(media.load_metadata(), Some(30.0));

        assert_eq!(
            *events.borrow(),
            vec![MediaEvent::MetadataLoaded { duration: 30.0 }]
        );
    }

    #[test]
    fn test_no_metadata_without_duration() {
        let mut media = SimulatedMedia::new("stream");
        assert_eq!(media.load_metadata(), None);
        assert_eq!(media.duration(), None);
    }

    #[test]
    fn test_unusable_duration_means_no_metadata() {
        for duration in [-5.0, f64::NAN, f64::INFINITY] {
            let mut media = SimulatedMedia::with_duration("bad.wav", duration);
            assert_eq!(media.load_metadata(), None);
            assert_eq!(media.duration(), None);
            media.set_current_time(3.0);
            assert_eq!(media.current_time(), 3.0);
        }
    }

    #[test]
    fn test_advance_only_while_playing() {
        let mut media = SimulatedMedia::with_duration("a.wav", 10.0);
        media.load_metadata();
        media.advance(1.0);
        assert_eq!(media.current_time(), 0.0);

        media.play().unwrap();
        media.advance(1.5);
        assert_eq!(media.current_time(), 1.5);
    }

    #[test]
    fn test_advance_to_end_emits_ended() {
        let mut media = SimulatedMedia::with_duration("a.wav", 2.0);
        media.load_metadata();
        let (events, _sub) = recorder(&media);

        media.play().unwrap();
        media.advance(5.0);

        assert!(!media.is_playing());
        assert_eq!(media.current_time(), 2.0);
        assert_eq!(
            *events.borrow(),
            vec![MediaEvent::TimeUpdate { position: 2.0 }, MediaEvent::Ended]
        );
    }

    #[test]
    fn test_play_after_end_restarts() {
        let mut media = SimulatedMedia::with_duration("a.wav", 2.0);
        media.load_metadata();
        media.play().unwrap();
        media.advance(2.0);

        media.play().unwrap();
        assert_eq!(media.current_time(), 0.0);
        assert!(media.is_playing());
    }

    #[test]
    fn test_set_current_time_clamps() {
        let mut media = SimulatedMedia::with_duration("a.wav", 8.0);
        media.load_metadata();

        media.set_current_time(-3.0);
        assert_eq!(media.current_time(), 0.0);
        media.set_current_time(100.0);
        assert_eq!(media.current_time(), 8.0);
        media.set_current_time(f64::NAN);
        assert_eq!(media.current_time(), 0.0);
    }

    #[test]
    fn test_refused_play() {
        let mut media = SimulatedMedia::with_duration("a.wav", 8.0);
        media.set_refuse_play(true);
        let err = media.play().unwrap_err();
        assert_eq!(err.error_code(), "PLAYBACK_REFUSED");
        assert!(!media.is_playing());
    }
}
