//! Animation Trigger Port
//!
//! Entrance and hover animations are requested through an injected
//! [`AnimationPort`] rather than registered globally, so components can be
//! driven and tested without any animation engine.
//!
//! An [`EntranceTrigger`] is a one-shot state machine: it stays `Pending`
//! while its element is below the start line of the viewport, fires its
//! tween exactly once when the element's top crosses that line, and is
//! `Played` from then on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DolphinError;

/// Easing curve of a tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    /// Cubic ease-out
    #[default]
    Power3Out,
}

impl Ease {
    /// Map linear progress `t` in `[0, 1]` onto the curve
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power3Out => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Animated properties of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub opacity: f64,
    /// Vertical offset in pixels (positive = below resting position)
    pub y_offset: f64,
    pub scale: f64,
}

impl Keyframe {
    /// Fully visible at rest
    pub const REST: Keyframe = Keyframe {
        opacity: 1.0,
        y_offset: 0.0,
        scale: 1.0,
    };

    /// Transparent and pushed down by `y_offset`
    pub fn hidden_below(y_offset: f64) -> Self {
        Self {
            opacity: 0.0,
            y_offset,
            scale: 1.0,
        }
    }

    /// Visible at rest, scaled
    pub fn scaled(scale: f64) -> Self {
        Self { scale, ..Self::REST }
    }

    fn lerp(&self, to: &Keyframe, t: f64) -> Keyframe {
        Keyframe {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            y_offset: self.y_offset + (to.y_offset - self.y_offset) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}

/// A from/to animation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub from: Keyframe,
    pub to: Keyframe,
    pub duration_secs: f64,
    /// Delay added per element when one tween animates a group
    pub stagger_secs: f64,
    pub ease: Ease,
}

impl Tween {
    /// Fade in while rising `y_offset` pixels into place
    pub fn rise(y_offset: f64, duration_secs: f64, stagger_secs: f64) -> Self {
        Self {
            from: Keyframe::hidden_below(y_offset),
            to: Keyframe::REST,
            duration_secs,
            stagger_secs,
            ease: Ease::Power3Out,
        }
    }

    /// Landing-page headings
    pub fn heading_entrance() -> Self {
        Self::rise(20.0, 1.0, 0.2)
    }

    /// Feature cards
    pub fn card_entrance() -> Self {
        Self::rise(50.0, 1.0, 0.2)
    }

    /// Process cards, one trigger per card
    pub fn process_card_entrance() -> Self {
        Self::rise(100.0, 0.6, 0.0)
    }

    /// Scale change used for hover feedback
    pub fn scale_to(from: f64, to: f64, duration_secs: f64) -> Self {
        Self {
            from: Keyframe::scaled(from),
            to: Keyframe::scaled(to),
            duration_secs,
            stagger_secs: 0.0,
            ease: Ease::Power3Out,
        }
    }

    /// Properties of the `index`-th element of a group `elapsed_secs` after start
    pub fn sample(&self, elapsed_secs: f64, index: usize) -> Keyframe {
        let local = elapsed_secs - self.stagger_secs * index as f64;
        if local <= 0.0 {
            return self.from;
        }
        if self.duration_secs <= 0.0 || local >= self.duration_secs {
            return self.to;
        }
        let t = self.ease.apply(local / self.duration_secs);
        self.from.lerp(&self.to, t)
    }

    /// Time until the last of `count` staggered elements finishes
    pub fn total_secs(&self, count: usize) -> f64 {
        self.duration_secs + self.stagger_secs * count.saturating_sub(1) as f64
    }
}

/// Capability that actually runs animations
pub trait AnimationPort {
    fn animate(&mut self, target: &str, tween: &Tween);
}

/// Port that drops every request
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnimator;

impl AnimationPort for NoopAnimator {
    fn animate(&mut self, _target: &str, _tween: &Tween) {}
}

/// Port that records requests in order
#[derive(Debug, Default, Clone)]
pub struct RecordingAnimator {
    pub requests: Vec<(String, Tween)>,
}

impl AnimationPort for RecordingAnimator {
    fn animate(&mut self, target: &str, tween: &Tween) {
        self.requests.push((target.to_string(), *tween));
    }
}

/// Fraction of the viewport height, from the top, where an entrance fires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartLine(f64);

impl StartLine {
    /// `"top center"`
    pub const TOP_CENTER: StartLine = StartLine(0.5);
    /// `"top 75%"`
    pub const TOP_75: StartLine = StartLine(0.75);

    pub fn new(fraction: f64) -> Self {
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }
}

impl FromStr for StartLine {
    type Err = DolphinError;

    /// Parse `"top <top|center|bottom|N%>"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DolphinError::InvalidConfig {
            reason: format!("unsupported start line '{}'", s),
        };
        let mut parts = s.split_whitespace();
        if parts.next() != Some("top") {
            return Err(invalid());
        }
        let line = match parts.next().ok_or_else(invalid)? {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            percent => {
                let value: f64 = percent
                    .strip_suffix('%')
                    .and_then(|p| p.parse().ok())
                    .ok_or_else(invalid)?;
                value / 100.0
            }
        };
        if parts.next().is_some() || !(0.0..=1.0).contains(&line) {
            return Err(invalid());
        }
        Ok(StartLine(line))
    }
}

impl fmt::Display for StartLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "top {}%", self.0 * 100.0)
    }
}

/// Where an element currently sits relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPosition {
    /// Distance from the viewport top to the element top, in pixels
    pub element_top: f64,
    pub viewport_height: f64,
}

/// Lifecycle of an entrance animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerPhase {
    #[default]
    Pending,
    Played,
}

/// One-shot "scroll into view, then animate" trigger
#[derive(Debug, Clone)]
pub struct EntranceTrigger {
    target: String,
    start: StartLine,
    tween: Tween,
    phase: TriggerPhase,
}

impl EntranceTrigger {
    pub fn new(target: impl Into<String>, start: StartLine, tween: Tween) -> Self {
        Self {
            target: target.into(),
            start,
            tween,
            phase: TriggerPhase::Pending,
        }
    }

    pub fn phase(&self) -> TriggerPhase {
        self.phase
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Feed a viewport observation; returns true if the animation fired
    pub fn observe<P: AnimationPort + ?Sized>(
        &mut self,
        position: ViewportPosition,
        port: &mut P,
    ) -> bool {
        if self.phase == TriggerPhase::Played {
            return false;
        }
        let line = self.start.fraction() * position.viewport_height;
        if !(position.element_top <= line) {
            return false;
        }
        port.animate(&self.target, &self.tween);
        self.phase = TriggerPhase::Played;
        debug!("Entrance animation fired for {}", self.target);
        true
    }
}

/// Scale feedback on pointer hover
#[derive(Debug, Clone)]
pub struct HoverScale {
    target: String,
    scale: f64,
    duration_secs: f64,
    hovered: bool,
}

impl HoverScale {
    /// Hover growth used on buttons
    pub const BUTTON_SCALE: f64 = 1.05;
    pub const BUTTON_DURATION_SECS: f64 = 0.2;

    pub fn new(target: impl Into<String>, scale: f64, duration_secs: f64) -> Self {
        Self {
            target: target.into(),
            scale,
            duration_secs,
            hovered: false,
        }
    }

    pub fn button(target: impl Into<String>) -> Self {
        Self::new(target, Self::BUTTON_SCALE, Self::BUTTON_DURATION_SECS)
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn pointer_enter<P: AnimationPort + ?Sized>(&mut self, port: &mut P) {
        if self.hovered {
            return;
        }
        self.hovered = true;
        port.animate(&self.target, &Tween::scale_to(1.0, self.scale, self.duration_secs));
    }

    pub fn pointer_leave<P: AnimationPort + ?Sized>(&mut self, port: &mut P) {
        if !self.hovered {
            return;
        }
        self.hovered = false;
        port.animate(&self.target, &Tween::scale_to(self.scale, 1.0, self.duration_secs));
    }
}
