//! Serde model of the synthesizer's timing breakdown.
//!
//! Mirrors the VOICEVOX audio-query wire format exactly: `accent_phrases`
//! and mora fields are snake_case, the utterance-level scales are
//! camelCase. The runtime only reads the timing fields; the rest is carried
//! so a query can round-trip back to the `/synthesis` endpoint untouched.

use serde::{Deserialize, Serialize};

/// One mora: an optional consonant followed by a vowel, each with a
/// duration in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mora {
    /// Display text of the mora.
    pub text: String,
    /// Consonant phoneme symbol, if the mora has one.
    pub consonant: Option<String>,
    /// Consonant duration in seconds, present iff `consonant` is.
    pub consonant_length: Option<f64>,
    /// Vowel phoneme symbol (`a`/`i`/`u`/`e`/`o`, `N`, `cl`, `pau`).
    pub vowel: String,
    /// Vowel duration in seconds.
    pub vowel_length: f64,
    /// Pitch in Hz (0.0 for unvoiced).
    pub pitch: f64,
}

impl Mora {
    /// Creates a vowel-only mora.
    pub fn vowel(text: impl Into<String>, vowel: impl Into<String>, vowel_length: f64) -> Self {
        Self {
            text: text.into(),
            consonant: None,
            consonant_length: None,
            vowel: vowel.into(),
            vowel_length,
            pitch: 0.0,
        }
    }

    /// Adds a consonant with its duration.
    pub fn with_consonant(mut self, consonant: impl Into<String>, length: f64) -> Self {
        self.consonant = Some(consonant.into());
        self.consonant_length = Some(length);
        self
    }
}

/// One accent phrase: a run of moras with an optional trailing pause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccentPhrase {
    /// Moras in chronological order.
    pub moras: Vec<Mora>,
    /// Accent nucleus position (1-indexed).
    pub accent: u32,
    /// Pause mora closing the phrase, if any.
    pub pause_mora: Option<Mora>,
    /// Whether the phrase ends as a question.
    #[serde(default)]
    pub is_interrogative: bool,
}

impl AccentPhrase {
    /// Creates a phrase from moras, accent at the first mora, no pause.
    pub fn new(moras: Vec<Mora>) -> Self {
        Self {
            moras,
            accent: 1,
            pause_mora: None,
            is_interrogative: false,
        }
    }

    /// Adds a trailing pause mora.
    pub fn with_pause(mut self, pause: Mora) -> Self {
        self.pause_mora = Some(pause);
        self
    }
}

/// The synthesizer's full per-utterance breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioQuery {
    /// Accent phrases in chronological order.
    pub accent_phrases: Vec<AccentPhrase>,
    /// Speed scale applied at synthesis time.
    #[serde(rename = "speedScale")]
    pub speed_scale: f64,
    /// Pitch scale.
    #[serde(rename = "pitchScale")]
    pub pitch_scale: f64,
    /// Intonation scale.
    #[serde(rename = "intonationScale")]
    pub intonation_scale: f64,
    /// Volume scale.
    #[serde(rename = "volumeScale")]
    pub volume_scale: f64,
    /// Leading silence before the first phoneme, in seconds.
    #[serde(rename = "prePhonemeLength")]
    pub pre_phoneme_length: f64,
    /// Trailing silence after the last phoneme, in seconds.
    #[serde(rename = "postPhonemeLength")]
    pub post_phoneme_length: f64,
    /// Output sampling rate in Hz.
    #[serde(rename = "outputSamplingRate")]
    pub output_sampling_rate: u32,
    /// Whether the output is stereo.
    #[serde(rename = "outputStereo")]
    pub output_stereo: bool,
    /// Kana reading, if the synthesizer provided one.
    #[serde(default)]
    pub kana: Option<String>,
}

impl AudioQuery {
    /// Creates a query with the given phrases and neutral scales.
    pub fn new(accent_phrases: Vec<AccentPhrase>, pre_phoneme_length: f64) -> Self {
        Self {
            accent_phrases,
            speed_scale: 1.0,
            pitch_scale: 0.0,
            intonation_scale: 1.0,
            volume_scale: 1.0,
            pre_phoneme_length,
            post_phoneme_length: 0.1,
            output_sampling_rate: 24000,
            output_stereo: false,
            kana: None,
        }
    }
}
