//! Error handling for Dolphin
//!
//! Transport operations never fail (a missing media handle or unknown
//! duration degrades to a no-op). Errors come from loading audio files,
//! validating caller input and reading configuration.

use thiserror::Error;

/// Result type alias for Dolphin operations
pub type Result<T> = std::result::Result<T, DolphinError>;

/// Main error type for Dolphin operations
#[derive(Error, Debug)]
pub enum DolphinError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<hound::Error>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // Input Validation Errors
    #[error("Invalid amplitude {value} at index {index} (expected a finite value in [0, 1])")]
    InvalidAmplitude { index: usize, value: f32 },

    #[error("Invalid color '{value}' (expected #rgb or #rrggbb)")]
    InvalidColor { value: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Input value ownership violated: {reason}")]
    InputOwnership { reason: String },

    // Playback Errors
    #[error("Playback refused by media handle: {reason}")]
    PlaybackRefused { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DolphinError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            DolphinError::FileNotFound { .. } => "FILE_NOT_FOUND",
            DolphinError::InvalidAudio { .. } => "INVALID_AUDIO",
            DolphinError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            DolphinError::InvalidAmplitude { .. } => "INVALID_AMPLITUDE",
            DolphinError::InvalidColor { .. } => "INVALID_COLOR",
            DolphinError::InvalidConfig { .. } => "INVALID_CONFIG",
            DolphinError::InputOwnership { .. } => "INPUT_OWNERSHIP",
            DolphinError::PlaybackRefused { .. } => "PLAYBACK_REFUSED",
            DolphinError::Io(_) => "IO_ERROR",
            DolphinError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable
    ///
    /// A refused play request leaves the transport paused and can simply be
    /// retried on the next user gesture.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DolphinError::PlaybackRefused { .. }
                | DolphinError::FileNotFound { .. }
                | DolphinError::InvalidColor { .. }
                | DolphinError::InvalidConfig { .. }
        )
    }
}

impl From<hound::Error> for DolphinError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) => DolphinError::Io(io),
            hound::Error::Unsupported => DolphinError::UnsupportedFormat {
                format: "WAV feature not supported by decoder".to_string(),
            },
            other => DolphinError::InvalidAudio {
                reason: other.to_string(),
                source: Some(other),
            },
        }
    }
}
