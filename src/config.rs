//! Widget configuration
//!
//! Styling and transport settings of a waveform slider, loadable from a
//! JSON file. Every field is optional in the file and falls back to the
//! library defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::TransportPolicy;
use crate::error::{DolphinError, Result};
use crate::widget::Color;

/// Default number of bars in a generated waveform
pub const DEFAULT_BAR_COUNT: usize = 100;

/// Default skip distance of the transport buttons
pub const DEFAULT_SKIP_SECONDS: f64 = 10.0;

/// Upper bound on generated bars
const MAX_BAR_COUNT: usize = 10_000;

/// Styling and transport configuration for a [`crate::widget::WaveformSlider`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Color of played bars
    pub played_color: Color,
    /// Color of unplayed bars and of the track background
    pub unplayed_color: Color,
    /// Seconds moved by the skip-back / skip-forward buttons
    pub skip_seconds: f64,
    /// Number of bars when the waveform is generated rather than supplied
    pub bar_count: usize,
    /// Clamp skips into `[0, duration]`
    pub clamp_skip: bool,
    /// Return to Paused at end-of-stream
    pub pause_at_end: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            played_color: Color::PLAYED,
            unplayed_color: Color::UNPLAYED,
            skip_seconds: DEFAULT_SKIP_SECONDS,
            bar_count: DEFAULT_BAR_COUNT,
            clamp_skip: true,
            pause_at_end: true,
        }
    }
}

impl SliderConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DolphinError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let text = fs::read_to_string(path)?;
        let config: SliderConfig = serde_json::from_str(&text)?;
        config.validate()?;
        debug!("Loaded slider config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if !(self.skip_seconds.is_finite() && self.skip_seconds > 0.0) {
            return Err(DolphinError::InvalidConfig {
                reason: format!("skip_seconds must be positive, got {}", self.skip_seconds),
            });
        }
        if self.bar_count == 0 || self.bar_count > MAX_BAR_COUNT {
            return Err(DolphinError::InvalidConfig {
                reason: format!(
                    "bar_count must be between 1 and {}, got {}",
                    MAX_BAR_COUNT, self.bar_count
                ),
            });
        }
        Ok(())
    }

    /// Transport edge behavior described by this configuration
    pub fn transport_policy(&self) -> TransportPolicy {
        TransportPolicy {
            clamp_skip: self.clamp_skip,
            pause_at_end: self.pause_at_end,
        }
    }
}
