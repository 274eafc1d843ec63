use thiserror::Error;

use crate::player::PlaybackState;
use crate::request::{MAX_SPEED, MAX_TEXT_CHARS, MIN_SPEED};

/// Rejections produced while building a speech request. Always local and
/// recoverable by fixing the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("input text is empty")]
    EmptyText,

    #[error("input text is {len} characters, limit is {MAX_TEXT_CHARS}")]
    TextTooLong { len: usize },

    #[error("unknown voice '{name}' (supported: alloy, echo, fable, onyx, nova, shimmer)")]
    UnknownVoice { name: String },

    #[error("unknown model '{name}' (supported: tts-1, tts-1-hd)")]
    UnknownModel { name: String },

    #[error("speed {speed} out of range [{MIN_SPEED}, {MAX_SPEED}]")]
    SpeedOutOfRange { speed: f32 },
}

/// Failures of a single synthesis attempt. Never retried automatically.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("no API key configured (set OPENAI_API_KEY)")]
    MissingCredential,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("provider rejected request (HTTP {status}): {message}")]
    Provider { status: u16, message: String },
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio output device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("could not decode audio clip: {0}")]
    Decode(String),

    #[error("no clip loaded")]
    NoClip,

    #[error("{operation} is not valid while {state:?}")]
    InvalidState {
        operation: &'static str,
        state: PlaybackState,
    },

    #[error("section end must be after section start")]
    InvalidSection,
}
