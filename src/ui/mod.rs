//! Host-facing UI ports
//!
//! Pieces of the surrounding page that the widget's host wires up: entrance
//! and hover animations driven through an [`AnimationPort`], buttons with a
//! loading state, and a text input whose value has exactly one owner.

pub mod animation;
pub mod button;
pub mod input;

pub use animation::{
    AnimationPort, Ease, EntranceTrigger, HoverScale, Keyframe, NoopAnimator, RecordingAnimator,
    StartLine, TriggerPhase, Tween, ViewportPosition,
};
pub use button::{Button, ButtonSize, ButtonVariant, ButtonView, LeadingSlot};
pub use input::{InputChange, InputEdit, InputKind, InputVariant, InputView, TextInput, ValueOwner};
