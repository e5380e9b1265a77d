//! Text input with a single source of truth
//!
//! The value of an input is owned by exactly one party. Either the
//! component stores it ([`ValueOwner::Component`]) or the caller does
//! ([`ValueOwner::Caller`]) and feeds it back on every render. Edits always
//! produce an [`InputChange`] notification; only a component-owned input
//! also applies the edit to itself.

use serde::{Deserialize, Serialize};

use crate::error::{DolphinError, Result};

/// Visual variant; only affects the default placeholder here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputVariant {
    #[default]
    Default,
    Filled,
    Flushed,
    Unstyled,
}

impl InputVariant {
    pub fn default_placeholder(self) -> &'static str {
        match self {
            InputVariant::Default => "Enter text...",
            InputVariant::Filled => "Type here...",
            InputVariant::Flushed => "Input here...",
            InputVariant::Unstyled => "Write something...",
        }
    }
}

/// Behavioral kind of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    /// Masked, with a visibility toggle
    Password,
    /// With a clear affordance while non-empty
    Search,
}

/// Who holds the input's value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueOwner {
    Component(String),
    Caller,
}

/// User edit applied to an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEdit {
    /// The text field now contains this value
    Replace(String),
    /// The search clear affordance was activated
    Clear,
}

/// Notification of a new value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputChange {
    pub value: String,
}

/// Render model of a text input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputView {
    pub value: String,
    /// Effective HTML-style type: `text`, `password` or `search`
    pub input_type: &'static str,
    pub placeholder: String,
    pub show_visibility_toggle: bool,
    pub show_clear: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TextInput {
    owner: ValueOwner,
    kind: InputKind,
    variant: InputVariant,
    placeholder: Option<String>,
    password_visible: bool,
    error_message: Option<String>,
}

impl TextInput {
    /// Input that stores its own value, starting at `initial`
    pub fn uncontrolled(initial: impl Into<String>) -> Self {
        Self::with_owner(ValueOwner::Component(initial.into()))
    }

    /// Input whose value is owned by the caller
    pub fn controlled() -> Self {
        Self::with_owner(ValueOwner::Caller)
    }

    fn with_owner(owner: ValueOwner) -> Self {
        Self {
            owner,
            kind: InputKind::Text,
            variant: InputVariant::Default,
            placeholder: None,
            password_visible: false,
            error_message: None,
        }
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn variant(mut self, variant: InputVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Custom placeholder, overriding the variant default
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn set_error(&mut self, message: Option<String>) {
        self.error_message = message;
    }

    pub fn owner(&self) -> &ValueOwner {
        &self.owner
    }

    pub fn is_password_visible(&self) -> bool {
        self.password_visible
    }

    /// Flip password masking; no effect on other kinds
    pub fn toggle_password_visibility(&mut self) {
        if self.kind == InputKind::Password {
            self.password_visible = !self.password_visible;
        }
    }

    /// Apply a user edit and report the resulting value
    pub fn edit(&mut self, edit: InputEdit) -> InputChange {
        let value = match edit {
            InputEdit::Replace(value) => value,
            InputEdit::Clear => String::new(),
        };
        if let ValueOwner::Component(stored) = &mut self.owner {
            stored.clone_from(&value);
        }
        InputChange { value }
    }

    /// Build the render model
    ///
    /// `caller_value` must be `Some` for a caller-owned input and `None`
    /// for a component-owned one.
    pub fn view(&self, caller_value: Option<&str>) -> Result<InputView> {
        let value = match (&self.owner, caller_value) {
            (ValueOwner::Component(stored), None) => stored.clone(),
            (ValueOwner::Caller, Some(value)) => value.to_string(),
            (ValueOwner::Component(_), Some(_)) => {
                return Err(DolphinError::InputOwnership {
                    reason: "component-owned input was also given a value".to_string(),
                })
            }
            (ValueOwner::Caller, None) => {
                return Err(DolphinError::InputOwnership {
                    reason: "caller-owned input rendered without a value".to_string(),
                })
            }
        };

        let input_type = match (self.kind, self.password_visible) {
            (InputKind::Password, false) => "password",
            (InputKind::Search, _) => "search",
            _ => "text",
        };
        let placeholder = self
            .placeholder
            .clone()
            .unwrap_or_else(|| self.variant.default_placeholder().to_string());

        Ok(InputView {
            show_clear: self.kind == InputKind::Search && !value.is_empty(),
            show_visibility_toggle: self.kind == InputKind::Password,
            value,
            input_type,
            placeholder,
            error_message: self.error_message.clone(),
        })
    }
}
