//! Button with a loading state
//!
//! A loading button is always disabled. Its left icon slot shows a spinner
//! and its right icon is hidden until loading finishes.

use serde::{Deserialize, Serialize};

/// Visual variant of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Default,
    Destructive,
    Outline,
    Secondary,
    Ghost,
    Link,
    Gradient,
    Neon,
    Glassy,
    #[serde(rename = "3d")]
    ThreeD,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    #[default]
    Default,
    Sm,
    Lg,
    Icon,
}

/// Content of the leading icon slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadingSlot {
    Spinner,
    Icon(String),
}

/// Render model of a button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub label: String,
    pub variant: ButtonVariant,
    pub size: ButtonSize,
    pub disabled: bool,
    pub leading: Option<LeadingSlot>,
    pub trailing: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    variant: ButtonVariant,
    size: ButtonSize,
    left_icon: Option<String>,
    right_icon: Option<String>,
    disabled: bool,
    loading: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ButtonVariant::Default,
            size: ButtonSize::Default,
            left_icon: None,
            right_icon: None,
            disabled: false,
            loading: false,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn left_icon(mut self, icon: impl Into<String>) -> Self {
        self.left_icon = Some(icon.into());
        self
    }

    pub fn right_icon(mut self, icon: impl Into<String>) -> Self {
        self.right_icon = Some(icon.into());
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Disabled explicitly or by loading
    pub fn is_disabled(&self) -> bool {
        self.disabled || self.loading
    }

    /// Deliver a click; returns whether the button accepted it
    pub fn press(&self) -> bool {
        !self.is_disabled()
    }

    pub fn view(&self) -> ButtonView {
        let leading = if self.loading {
            Some(LeadingSlot::Spinner)
        } else {
            self.left_icon.clone().map(LeadingSlot::Icon)
        };
        let trailing = if self.loading {
            None
        } else {
            self.right_icon.clone()
        };

        ButtonView {
            label: self.label.clone(),
            variant: self.variant,
            size: self.size,
            disabled: self.is_disabled(),
            leading,
            trailing,
        }
    }
}
