//! Error types for the speech pipeline.

use mimika_rig::EngineError;
use thiserror::Error;

/// Result type for speech operations.
pub type SpeechResult<T> = Result<T, SpeechError>;

/// Errors that can occur in the speech pipeline.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// HTTP transport failure talking to the synthesizer.
    #[error("synthesizer request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The synthesizer answered with a non-success status.
    #[error("synthesizer error ({status}): {message}")]
    Synthesis {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// The audio buffer could not be decoded. Lip-sync aborts cleanly;
    /// no partial playback.
    #[error("audio decode failed: {message}")]
    Decode {
        /// Decoder error text.
        message: String,
    },

    /// No audio output device, or the sink could not be created.
    #[error("audio output unavailable: {message}")]
    Audio {
        /// Underlying error text.
        message: String,
    },

    /// JSON (de)serialization failure on a synthesizer payload.
    #[error("synthesizer payload parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SpeechError {
    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an audio-output error.
    pub fn audio(message: impl Into<String>) -> Self {
        Self::Audio {
            message: message.into(),
        }
    }

    /// Creates a synthesis error from a status and body.
    pub fn synthesis(status: u16, message: impl Into<String>) -> Self {
        Self::Synthesis {
            status,
            message: message.into(),
        }
    }
}

impl EngineError for SpeechError {
    fn code(&self) -> &'static str {
        match self {
            SpeechError::Http(_) => "SPEECH_001",
            SpeechError::Synthesis { .. } => "SPEECH_002",
            SpeechError::Decode { .. } => "SPEECH_003",
            SpeechError::Audio { .. } => "SPEECH_004",
            SpeechError::Parse(_) => "SPEECH_005",
        }
    }

    fn category(&self) -> &'static str {
        "speech"
    }
}
