//! Playback Controller for the waveform slider
//!
//! Owns the play/pause/seek/skip state of one widget and keeps it in sync
//! with a host media handle. The handle is driven imperatively; its
//! "metadata loaded", "time update" and "ended" notifications flow back in
//! through scoped subscriptions held by the controller.
//!
//! Every operation degrades to a no-op when no media handle is attached,
//! and an unknown duration is treated as zero without ever dividing by it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::media::{MediaEvent, MediaHandle, Subscription};

/// Transport states representing the current playback mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransportState {
    /// Transport is paused (default state)
    #[default]
    Paused,
    /// Audio is actively playing
    Playing,
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportState::Paused => write!(f, "Paused"),
            TransportState::Playing => write!(f, "Playing"),
        }
    }
}

/// Behavior switches for the edges of the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportPolicy {
    /// Clamp `skip()` targets into `[0, duration]`
    pub clamp_skip: bool,
    /// Return to Paused when the media handle reports end-of-stream
    pub pause_at_end: bool,
}

impl Default for TransportPolicy {
    fn default() -> Self {
        Self {
            clamp_skip: true,
            pause_at_end: true,
        }
    }
}

/// Copyable read model of the transport
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PlaybackSnapshot {
    /// Playback position in seconds
    pub position: f64,
    /// Duration in seconds (0 while unknown)
    pub duration: f64,
    /// Current transport state
    pub state: TransportState,
}

/// State shared between the controller and its event listeners
#[derive(Debug, Default)]
struct SharedState {
    position: f64,
    duration: Option<f64>,
    state: TransportState,
    pause_at_end: bool,
}

impl SharedState {
    fn fresh(policy: TransportPolicy) -> Self {
        Self {
            pause_at_end: policy.pause_at_end,
            ..Self::default()
        }
    }

    fn duration_or_zero(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }

    fn clamp_to_timeline(&self, seconds: f64) -> f64 {
        let seconds = if seconds.is_nan() { 0.0 } else { seconds.max(0.0) };
        match self.duration {
            Some(duration) => seconds.min(duration),
            None => seconds,
        }
    }

    fn apply(&mut self, event: &MediaEvent) {
        match *event {
            MediaEvent::MetadataLoaded { duration } => {
                if self.duration.is_some() {
                    debug!("[TRANSPORT] Duration already known, ignoring metadata");
                } else if duration.is_finite() && duration >= 0.0 {
                    self.duration = Some(duration);
                    self.position = self.clamp_to_timeline(self.position);
                    debug!("[TRANSPORT] Duration loaded: {:.3}s", duration);
                } else {
                    warn!("[TRANSPORT] Ignoring unusable duration {}", duration);
                }
            }
            MediaEvent::TimeUpdate { position } => {
                self.position = self.clamp_to_timeline(position);
            }
            MediaEvent::Ended => {
                if self.pause_at_end && self.state == TransportState::Playing {
                    self.state = TransportState::Paused;
                    debug!("[TRANSPORT] End of stream, paused at {:.3}s", self.position);
                }
            }
        }
    }
}

/// Manages transport state for one media handle
///
/// The controller owns the handle while attached. Dropping or detaching
/// the controller releases its event subscriptions.
pub struct PlaybackController<M: MediaHandle> {
    media: Option<M>,
    shared: Rc<RefCell<SharedState>>,
    subscriptions: Vec<Subscription>,
    policy: TransportPolicy,
}

impl<M: MediaHandle> Default for PlaybackController<M> {
    fn default() -> Self {
        Self::new(TransportPolicy::default())
    }
}

impl<M: MediaHandle> fmt::Debug for PlaybackController<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("attached", &self.is_attached())
            .field("snapshot", &self.snapshot())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<M: MediaHandle> PlaybackController<M> {
    /// Create a detached controller
    ///
    /// # Example
    /// ```
    /// use dolphin::engine::{PlaybackController, SimulatedMedia, TransportPolicy};
    /// let controller: PlaybackController<SimulatedMedia> =
    ///     PlaybackController::new(TransportPolicy::default());
    /// assert!(!controller.is_playing());
    /// assert!(!controller.is_attached());
    /// ```
    pub fn new(policy: TransportPolicy) -> Self {
        Self {
            media: None,
            shared: Rc::new(RefCell::new(SharedState::fresh(policy))),
            subscriptions: Vec::new(),
            policy,
        }
    }

    // ========================================================================
    // Media Handle Lifecycle
    // ========================================================================

    /// Take ownership of a media handle and subscribe to its notifications
    ///
    /// Any previously attached handle is detached and returned. Transport
    /// state resets to Paused at the handle's current position.
    pub fn attach(&mut self, media: M) -> Option<M> {
        let previous = self.detach();

        let mut fresh = SharedState::fresh(self.policy);
        if let Some(duration) = media.duration() {
            fresh.apply(&MediaEvent::MetadataLoaded { duration });
        }
        fresh.apply(&MediaEvent::TimeUpdate {
            position: media.current_time(),
        });
        *self.shared.borrow_mut() = fresh;

        let weak = Rc::downgrade(&self.shared);
        let subscription = media.subscribe(Box::new(move |event| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            match shared.try_borrow_mut() {
                Ok(mut state) => state.apply(event),
                Err(_) => warn!("[TRANSPORT] Dropped re-entrant media event {:?}", event),
            };
        }));
        self.subscriptions.push(subscription);
        self.media = Some(media);
        debug!("[TRANSPORT] Media handle attached");

        previous
    }

    /// Release subscriptions and hand back the media handle
    ///
    /// A playing handle is paused first.
    pub fn detach(&mut self) -> Option<M> {
        self.subscriptions.clear();
        let mut media = self.media.take()?;
        if self.is_playing() {
            media.pause();
        }
        self.shared.borrow_mut().state = TransportState::Paused;
        debug!("[TRANSPORT] Media handle detached");
        Some(media)
    }

    /// Whether a media handle is attached
    pub fn is_attached(&self) -> bool {
        self.media.is_some()
    }

    /// The attached media handle
    pub fn media(&self) -> Option<&M> {
        self.media.as_ref()
    }

    /// The attached media handle, mutably (e.g. to drive a simulated clock)
    pub fn media_mut(&mut self) -> Option<&mut M> {
        self.media.as_mut()
    }

    /// Apply a media notification directly
    pub fn handle_event(&mut self, event: MediaEvent) {
        self.shared.borrow_mut().apply(&event);
    }

    // ========================================================================
    // Standard Transport Controls
    // ========================================================================

    /// Toggle between Playing and Paused
    ///
    /// # Example
    /// ```
    /// use dolphin::engine::{PlaybackController, SimulatedMedia};
    /// let mut controller = PlaybackController::default();
    /// controller.attach(SimulatedMedia::with_duration("song.wav", 30.0));
    /// controller.toggle_play_pause();
    /// assert!(controller.is_playing());
    /// controller.toggle_play_pause();
    /// assert!(!controller.is_playing());
    /// ```
    pub fn toggle_play_pause(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Request playback start
    ///
    /// State transition: Paused -> Playing, unless the media handle
    /// refuses, in which case the transport stays Paused.
    pub fn play(&mut self) {
        if self.is_playing() {
            debug!("[TRANSPORT] Already playing");
            return;
        }
        let Some(media) = self.media.as_mut() else {
            debug!("[TRANSPORT] No media handle, play ignored");
            return;
        };
        match media.play() {
            Ok(()) => {
                let position = media.current_time();
                let mut shared = self.shared.borrow_mut();
                shared.position = shared.clamp_to_timeline(position);
                shared.state = TransportState::Playing;
                debug!("[TRANSPORT] Play from {:.3}s", shared.position);
            }
            Err(err) => {
                warn!("[TRANSPORT] Media handle refused playback: {}", err);
            }
        }
    }

    /// Request pause
    ///
    /// State transition: Playing -> Paused
    pub fn pause(&mut self) {
        let Some(media) = self.media.as_mut() else {
            debug!("[TRANSPORT] No media handle, pause ignored");
            return;
        };
        media.pause();
        let mut shared = self.shared.borrow_mut();
        if shared.state == TransportState::Playing {
            shared.state = TransportState::Paused;
            debug!("[TRANSPORT] Paused at {:.3}s", shared.position);
        }
    }

    /// Seek to a fraction of the duration
    ///
    /// `fraction` is clamped into `[0, 1]` (NaN counts as 0). With an
    /// unknown duration the target is 0.
    ///
    /// # Example
    /// ```
    /// use dolphin::engine::{PlaybackController, SimulatedMedia};
    /// let mut media = SimulatedMedia::with_duration("song.wav", 120.0);
    /// media.load_metadata();
    /// let mut controller = PlaybackController::default();
    /// controller.attach(media);
    /// controller.seek(0.25);
    /// assert_eq!(controller.position(), 30.0);
    /// ```
    pub fn seek(&mut self, fraction: f64) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let target = fraction * self.duration();
        self.move_to(target);
    }

    /// Seek to an absolute position in seconds, clamped to the timeline
    pub fn seek_to(&mut self, seconds: f64) {
        let target = self.shared.borrow().clamp_to_timeline(seconds);
        self.move_to(target);
    }

    /// Move the position by `delta_seconds` (negative skips backward)
    ///
    /// With `clamp_skip` the target stays within `[0, duration]`;
    /// otherwise the media handle decides what out-of-range means.
    pub fn skip(&mut self, delta_seconds: f64) {
        if !delta_seconds.is_finite() {
            return;
        }
        let target = {
            let shared = self.shared.borrow();
            let raw = shared.position + delta_seconds;
            if self.policy.clamp_skip {
                shared.clamp_to_timeline(raw)
            } else {
                raw
            }
        };
        self.move_to(target);
    }

    fn move_to(&mut self, target: f64) {
        let Some(media) = self.media.as_mut() else {
            debug!("[TRANSPORT] No media handle, seek ignored");
            return;
        };
        media.set_current_time(target);
        let actual = media.current_time();
        let mut shared = self.shared.borrow_mut();
        shared.position = shared.clamp_to_timeline(actual);
        debug!("[TRANSPORT] Seek to {:.3}s", shared.position);
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    /// Current playback position in seconds
    pub fn position(&self) -> f64 {
        self.shared.borrow().position
    }

    /// Duration in seconds, 0 while unknown
    pub fn duration(&self) -> f64 {
        self.shared.borrow().duration_or_zero()
    }

    /// Duration in seconds, `None` while unknown
    pub fn known_duration(&self) -> Option<f64> {
        self.shared.borrow().duration
    }

    /// Played portion of the timeline in `[0, 1]`, 0 while duration unknown
    pub fn played_fraction(&self) -> f64 {
        let shared = self.shared.borrow();
        match shared.duration {
            Some(duration) if duration > 0.0 => (shared.position / duration).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Check if transport is currently playing
    pub fn is_playing(&self) -> bool {
        self.shared.borrow().state == TransportState::Playing
    }

    /// Check if transport is currently paused
    pub fn is_paused(&self) -> bool {
        !self.is_playing()
    }

    /// Get the current transport state
    pub fn state(&self) -> TransportState {
        self.shared.borrow().state
    }

    /// Get the edge-of-timeline policy
    pub fn policy(&self) -> TransportPolicy {
        self.policy
    }

    /// Snapshot of position, duration and state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        let shared = self.shared.borrow();
        PlaybackSnapshot {
            position: shared.position,
            duration: shared.duration_or_zero(),
            state: shared.state,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
