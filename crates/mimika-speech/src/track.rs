//! Pure lip-sync weight function over a viseme sequence.
//!
//! Given an elapsed playback position, at most one viseme event is active
//! (the sequence is non-overlapping); its expression weight follows a
//! `sin(pi * progress)` bell, rising from 0 at the event start to 1 at its
//! midpoint and back to 0 at its end. No cross-fade between adjacent
//! events: only the single active viseme is shown.

use std::f64::consts::PI;

use mimika_rig::{Expression, Rig, VisemeEvent};

/// An utterance's viseme sequence plus the per-frame weight logic.
#[derive(Debug, Clone)]
pub struct LipSyncTrack {
    events: Vec<VisemeEvent>,
}

impl LipSyncTrack {
    /// Creates a track over an already-ordered, non-overlapping sequence
    /// (what [`crate::extract::extract_visemes`] produces).
    pub fn new(events: Vec<VisemeEvent>) -> Self {
        debug_assert!(
            events.windows(2).all(|w| w[0].time <= w[1].time),
            "viseme events must be chronological"
        );
        Self { events }
    }

    /// Whether the track has no events (lip-sync cannot run).
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// End of the final event, in seconds; 0 for an empty track.
    pub fn end(&self) -> f64 {
        self.events.last().map(|e| e.end()).unwrap_or(0.0)
    }

    /// The event active at `elapsed`, if any.
    pub fn active(&self, elapsed: f64) -> Option<&VisemeEvent> {
        self.events.iter().find(|e| e.contains(elapsed))
    }

    /// The expression and weight to show at `elapsed`.
    ///
    /// `None` when no event is active, or the active event is a silence
    /// class (which drives no expression).
    pub fn sample(&self, elapsed: f64) -> Option<(Expression, f32)> {
        let event = self.active(elapsed)?;
        let expression = event.phoneme.expression()?;
        let progress = if event.duration > 0.0 {
            ((elapsed - event.time) / event.duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Some((expression, (PI * progress).sin() as f32))
    }

    /// Writes this frame's mouth state onto the rig: zeroes every vowel
    /// channel, then sets the active one (if any).
    pub fn apply(&self, rig: &mut Rig, elapsed: f64) {
        zero_vowels(rig);
        if let Some((expression, weight)) = self.sample(elapsed) {
            rig.set_expression(expression, weight);
        }
    }
}

/// Resets all vowel expression channels to zero.
pub fn zero_vowels(rig: &mut Rig) {
    for expression in Expression::VOWELS {
        rig.set_expression(expression, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimika_rig::{Phoneme, Rig, RigDescriptor};

    fn unit_track(phoneme: Phoneme) -> LipSyncTrack {
        LipSyncTrack::new(vec![VisemeEvent::new(0.0, 1.0, phoneme)])
    }

    #[test]
    fn test_bell_peaks_at_the_midpoint() {
        let track = unit_track(Phoneme::Aa);

        let (_, at_peak) = track.sample(0.5).unwrap();
        assert!((at_peak - 1.0).abs() < 1e-6);

        let (_, at_start) = track.sample(0.0).unwrap();
        assert!(at_start.abs() < 1e-6);

        // One tick before the end: still nearly zero. At 1.0 the event's
        // half-open interval has already closed.
        let (_, near_end) = track.sample(0.999_999).unwrap();
        assert!(near_end.abs() < 1e-4);
        assert!(track.sample(1.0).is_none());
    }

    #[test]
    fn test_silence_classes_produce_no_sample() {
        assert!(unit_track(Phoneme::Sil).sample(0.5).is_none());
        assert!(unit_track(Phoneme::Nn).sample(0.5).is_none());
    }

    #[test]
    fn test_gap_between_events_is_silent() {
        let track = LipSyncTrack::new(vec![
            VisemeEvent::new(0.0, 0.2, Phoneme::Aa),
            VisemeEvent::new(0.5, 0.2, Phoneme::Oh),
        ]);
        assert!(track.sample(0.3).is_none());
        assert!(track.sample(0.6).is_some());
    }

    #[test]
    fn test_apply_clears_previous_vowel() {
        let mut rig = Rig::from_descriptor(&RigDescriptor::humanoid());
        let track = LipSyncTrack::new(vec![
            VisemeEvent::new(0.0, 0.2, Phoneme::Aa),
            VisemeEvent::new(0.2, 0.2, Phoneme::Oh),
        ]);

        track.apply(&mut rig, 0.1);
        assert!(rig.expression(Expression::Aa).unwrap() > 0.9);

        // Next event: aa must be zeroed before oh is written.
        track.apply(&mut rig, 0.3);
        assert_eq!(rig.expression(Expression::Aa), Some(0.0));
        assert!(rig.expression(Expression::Oh).unwrap() > 0.9);
    }

    #[test]
    fn test_apply_past_the_end_silences_the_mouth() {
        let mut rig = Rig::from_descriptor(&RigDescriptor::humanoid());
        let track = unit_track(Phoneme::Ee);

        track.apply(&mut rig, 0.5);
        assert!(rig.expression(Expression::Ee).unwrap() > 0.0);

        track.apply(&mut rig, 2.0);
        assert_eq!(rig.expression(Expression::Ee), Some(0.0));
    }

    #[test]
    fn test_zero_duration_event_never_divides_by_zero() {
        let track = LipSyncTrack::new(vec![VisemeEvent::new(0.0, 0.0, Phoneme::Aa)]);
        // The event's half-open interval is empty, so nothing is active.
        assert!(track.sample(0.0).is_none());
    }

    #[test]
    fn test_track_end() {
        let track = LipSyncTrack::new(vec![
            VisemeEvent::new(0.0, 0.2, Phoneme::Aa),
            VisemeEvent::new(0.2, 0.3, Phoneme::Ih),
        ]);
        assert!((track.end() - 0.5).abs() < 1e-12);
        assert_eq!(LipSyncTrack::new(vec![]).end(), 0.0);
    }
}
