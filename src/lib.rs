//! Dolphin - Waveform Audio Transport
//!
//! Dolphin models an audio transport widget: a play/pause button, skip
//! controls, elapsed and total time labels and a clickable waveform whose
//! bars are colored by playback progress.
//!
//! # Architecture
//!
//! The widget is split into three parts:
//! - Playback controller: mirrors a media handle's position, duration and
//!   playing flag, driven by the handle's events
//! - Waveform renderer: pure projection of amplitudes plus progress into bars
//! - Time formatter: seconds to `M:SS`
//!
//! [`widget::WaveformSlider`] composes them against any [`engine::MediaHandle`].

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod ui;
pub mod waveform;
pub mod widget;

pub use error::{DolphinError, Result};
