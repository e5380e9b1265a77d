//! Playback Engine Module
//!
//! Core playback machinery for the waveform slider:
//! - Media handle port and scoped event subscriptions
//! - Transport state machine (play/pause/seek/skip)
//! - Simulated, clock-driven media handle
//! - WAV metadata and peak extraction

pub mod io;
pub mod media;
pub mod simulated;
pub mod transport;

pub use io::{load_peaks, peaks, probe_wav, AudioInfo};
pub use media::{EventHub, MediaEvent, MediaHandle, MediaListener, Subscription};
pub use simulated::SimulatedMedia;
pub use transport::{PlaybackController, PlaybackSnapshot, TransportPolicy, TransportState};
