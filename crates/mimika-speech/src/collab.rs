//! Narrow contracts with the transcription and chat collaborators.
//!
//! The animation core never talks to these services itself; it only
//! consumes their outputs. The traits pin down exactly what the runtime
//! depends on: a transcript string, and a reply with an optional action
//! name to be validated against the gesture catalog at the boundary.

use serde::{Deserialize, Serialize};

use crate::error::SpeechResult;

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who spoke.
    pub role: ChatRole,
    /// What was said.
    pub content: String,
}

impl ChatTurn {
    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// The chat collaborator's reply: text to speak, and optionally the name
/// of a gesture to play with it.
///
/// `action` is untrusted; callers resolve it with
/// `mimika_motion::parse_action`, which maps anything outside the catalog
/// to no gesture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// Reply text, fed to the synthesizer.
    pub text: String,
    /// Requested gesture name, if the model chose one.
    pub action: Option<String>,
}

/// Speech-to-text collaborator: audio in, transcript out.
///
/// Implementations may block; failures propagate, the core does not retry.
pub trait Transcriber {
    /// Transcribes an audio blob.
    fn transcribe(&self, audio: &[u8]) -> SpeechResult<String>;
}

/// Chat collaborator: transcript plus bounded history in, reply out.
pub trait ChatModel {
    /// Generates a reply to `transcript` given prior `history`.
    fn reply(&self, transcript: &str, history: &[ChatTurn]) -> SpeechResult<ChatReply>;
}
