//! Thin HTTP client for a VOICEVOX-compatible synthesizer.
//!
//! Two-call protocol: `POST /audio_query` produces the timing breakdown,
//! `POST /synthesis` renders it to a WAV buffer. The returned
//! [`SynthesisResult`] carries both, because the query is what viseme
//! extraction runs on - without it lip-sync cannot run at all.

use reqwest::Client;
use tracing::debug;

use serde::{Deserialize, Serialize};

use crate::error::{SpeechError, SpeechResult};
use crate::query::AudioQuery;

/// Default speaker id used when the caller does not pick one.
pub const DEFAULT_SPEAKER_ID: u32 = 1;

/// Synthesized utterance: the audio buffer plus the timing breakdown it
/// was rendered from.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Encoded audio (WAV container).
    pub audio: Vec<u8>,
    /// The timing breakdown, input to viseme extraction.
    pub query: AudioQuery,
}

/// One selectable voice style of a speaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerStyle {
    /// Style display name.
    pub name: String,
    /// Style id, passed as the `speaker` parameter.
    pub id: u32,
}

/// A speaker the synthesizer offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerInfo {
    /// Speaker display name.
    pub name: String,
    /// Available styles.
    pub styles: Vec<SpeakerStyle>,
}

/// HTTP client for one synthesizer instance.
#[derive(Debug, Clone)]
pub struct VoicevoxClient {
    base_url: String,
    http: Client,
}

impl VoicevoxClient {
    /// Creates a client for the synthesizer at `base_url`
    /// (e.g. `http://127.0.0.1:50021`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Lists the synthesizer's speakers.
    pub async fn speakers(&self) -> SpeechResult<Vec<SpeakerInfo>> {
        let url = format!("{}/speakers", self.base_url);
        let response = self.http.get(&url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Builds the timing breakdown for `text`.
    pub async fn audio_query(&self, text: &str, speaker: u32) -> SpeechResult<AudioQuery> {
        let url = format!("{}/audio_query", self.base_url);
        debug!(speaker, chars = text.chars().count(), "requesting audio query");
        let response = self
            .http
            .post(&url)
            .query(&[("text", text), ("speaker", &speaker.to_string())])
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Renders a timing breakdown to audio.
    pub async fn synthesis(&self, query: &AudioQuery, speaker: u32) -> SpeechResult<Vec<u8>> {
        let url = format!("{}/synthesis", self.base_url);
        let response = self
            .http
            .post(&url)
            .query(&[("speaker", speaker.to_string())])
            .json(query)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Full text-to-speech round trip: query then synthesis.
    pub async fn synthesize(&self, text: &str, speaker: u32) -> SpeechResult<SynthesisResult> {
        let query = self.audio_query(text, speaker).await?;
        let audio = self.synthesis(&query, speaker).await?;
        Ok(SynthesisResult { audio, query })
    }
}

/// Turns a non-success response into a [`SpeechError::Synthesis`] carrying
/// the status and as much of the body as could be read.
async fn check_status(response: reqwest::Response) -> SpeechResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(SpeechError::synthesis(status.as_u16(), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = VoicevoxClient::new("http://localhost:50021/");
        assert_eq!(client.base_url, "http://localhost:50021");
    }

    #[test]
    fn test_speaker_list_parses() {
        let json = r#"[
            {"name": "四国めたん", "styles": [{"name": "ノーマル", "id": 2}]},
            {"name": "ずんだもん", "styles": [{"name": "ノーマル", "id": 3}, {"name": "あまあま", "id": 1}]}
        ]"#;
        let speakers: Vec<SpeakerInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(speakers.len(), 2);
        assert_eq!(speakers[1].styles[1].id, 1);
    }
}
