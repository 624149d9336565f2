//! Mimika Speech Pipeline
//!
//! Everything between the speech synthesizer and the avatar's mouth:
//!
//! - [`query`] - serde model of the synthesizer's phrase/mora timing
//!   breakdown (the VOICEVOX audio-query wire format)
//! - [`extract`] - the pure transform from that breakdown into the timed
//!   viseme event sequence
//! - [`track`] - the pure lip-sync weight function over a viseme sequence
//! - [`player`] - audio playback with per-frame expression writes clocked
//!   by playback position, not render frame time
//! - [`collab`] - narrow contracts with the transcription and chat
//!   collaborators
//! - [`client`] - thin HTTP client for a VOICEVOX-compatible synthesizer
//!
//! Extraction and the track are deterministic and side-effect-free; they
//! are the whole contract between the synthesizer and the animation
//! runtime, so everything observable about lip-sync timing is testable
//! without an audio device.

pub mod client;
pub mod collab;
pub mod error;
pub mod extract;
pub mod player;
pub mod query;
pub mod track;

// Re-export main types at the crate root
pub use client::{SpeakerInfo, SpeakerStyle, SynthesisResult, VoicevoxClient};
pub use collab::{ChatModel, ChatReply, ChatRole, ChatTurn, Transcriber};
pub use error::{SpeechError, SpeechResult};
pub use extract::extract_visemes;
pub use player::LipSyncPlayer;
pub use query::{AccentPhrase, AudioQuery, Mora};
pub use track::LipSyncTrack;
