//! Waveform Module
//!
//! Amplitude data and its projection into bars with a played portion.

mod amplitude;
mod render;

pub use amplitude::{AmplitudeSequence, DEMO_FLOOR};
pub use render::{played_bar_count, played_ratio, render_bars, Bar};
