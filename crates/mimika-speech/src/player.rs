//! Audio playback with lip-sync clocked by playback position.
//!
//! The player decodes an utterance's audio buffer, plays it on a sink, and
//! on each `update` call applies the lip-sync track at the current playback
//! position. The position comes from the playback epoch, not the render
//! loop's frame delta, so mouth timing tracks the audio even when frame
//! rate wobbles.
//!
//! Starting a new playback always cancels the previous one first - there
//! are never two overlapping voices - and any failure path leaves every
//! vowel channel at zero.

use std::io::Cursor;
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use mimika_rig::{Rig, VisemeEvent};

use crate::error::{SpeechError, SpeechResult};
use crate::track::{zero_vowels, LipSyncTrack};

struct Playback {
    sink: Sink,
    track: LipSyncTrack,
    started: Instant,
    duration: Duration,
}

/// Plays one utterance at a time and drives the mouth from its clock.
pub struct LipSyncPlayer {
    // The stream must outlive its handle; dropping it kills the sink.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    current: Option<Playback>,
}

impl LipSyncPlayer {
    /// Opens the default audio output device.
    pub fn new() -> SpeechResult<Self> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| SpeechError::audio(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            current: None,
        })
    }

    /// Whether an utterance is currently playing.
    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    /// Starts playing an utterance with its viseme sequence.
    ///
    /// Cancels any in-flight playback first. On decode failure the player
    /// is left stopped with all vowel weights at zero - no partial
    /// playback, no garbled mouth shapes.
    pub fn play(
        &mut self,
        audio: Vec<u8>,
        visemes: Vec<VisemeEvent>,
        rig: &mut Rig,
    ) -> SpeechResult<()> {
        self.stop(rig);

        let track = LipSyncTrack::new(visemes);
        let source = match Decoder::new(Cursor::new(audio)) {
            Ok(source) => source,
            Err(e) => {
                warn!(error = %e, "audio decode failed; lip-sync aborted");
                return Err(SpeechError::decode(e.to_string()));
            }
        };

        // Prefer the decoded duration; fall back to the final viseme end
        // for containers that do not report one.
        let duration = source
            .total_duration()
            .unwrap_or_else(|| Duration::from_secs_f64(track.end()));

        let sink =
            Sink::try_new(&self.handle).map_err(|e| SpeechError::audio(e.to_string()))?;
        sink.append(source);

        debug!(
            duration_ms = duration.as_millis() as u64,
            has_visemes = !track.is_empty(),
            "utterance playback started"
        );
        self.current = Some(Playback {
            sink,
            track,
            started: Instant::now(),
            duration,
        });
        Ok(())
    }

    /// Applies the current playback position's mouth state to the rig.
    ///
    /// Call once per render frame. When playback has ended (naturally or
    /// the sink drained), zeroes the vowel channels and clears the slot.
    pub fn update(&mut self, rig: &mut Rig) {
        let Some(playback) = &self.current else {
            return;
        };

        let elapsed = playback.started.elapsed();
        if playback.sink.empty() || elapsed >= playback.duration {
            zero_vowels(rig);
            self.current = None;
            return;
        }

        playback.track.apply(rig, elapsed.as_secs_f64());
    }

    /// Cancels playback and silences the mouth.
    pub fn stop(&mut self, rig: &mut Rig) {
        if let Some(playback) = self.current.take() {
            playback.sink.stop();
            zero_vowels(rig);
        }
    }
}
