//! Viseme extraction: the pure transform from the synthesizer's timing
//! breakdown into the viseme event sequence.
//!
//! Walks phrases and moras in order with a running time cursor starting at
//! the pre-phoneme lead: a mora's consonant (if any) advances the cursor
//! before its vowel event is emitted at the cursor with the vowel's
//! duration, then the cursor advances past the vowel; a phrase's trailing
//! pause mora is handled identically. The output is therefore sorted and
//! non-overlapping by construction.

use mimika_rig::{Phoneme, VisemeEvent};

use crate::query::AudioQuery;

/// Extracts the timed viseme sequence for an utterance.
///
/// Deterministic and side-effect-free; unknown vowel symbols become
/// [`Phoneme::Sil`] rather than failing.
pub fn extract_visemes(query: &AudioQuery) -> Vec<VisemeEvent> {
    let mut cursor = query.pre_phoneme_length;
    let mut visemes = Vec::new();

    for phrase in &query.accent_phrases {
        for mora in &phrase.moras {
            if let Some(consonant_length) = mora.consonant_length {
                cursor += consonant_length;
            }
            visemes.push(VisemeEvent::new(
                cursor,
                mora.vowel_length,
                Phoneme::from_vowel(&mora.vowel),
            ));
            cursor += mora.vowel_length;
        }

        if let Some(pause) = &phrase.pause_mora {
            visemes.push(VisemeEvent::new(
                cursor,
                pause.vowel_length,
                Phoneme::from_vowel(&pause.vowel),
            ));
            cursor += pause.vowel_length;
        }
    }

    visemes
}

/// Total phoneme span of an utterance in seconds: leading and trailing
/// silence plus every consonant and vowel duration.
pub fn total_phoneme_length(query: &AudioQuery) -> f64 {
    let mut total = query.pre_phoneme_length + query.post_phoneme_length;
    for phrase in &query.accent_phrases {
        for mora in phrase.moras.iter().chain(phrase.pause_mora.iter()) {
            total += mora.consonant_length.unwrap_or(0.0) + mora.vowel_length;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{AccentPhrase, Mora};
    use mimika_rig::Phoneme;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_mora_with_consonant_lead() {
        let query = AudioQuery::new(
            vec![AccentPhrase::new(vec![
                Mora::vowel("ア", "a", 0.1).with_consonant("k", 0.05)
            ])],
            0.02,
        );

        let visemes = extract_visemes(&query);
        assert_eq!(
            visemes,
            vec![VisemeEvent::new(0.07, 0.1, Phoneme::Aa)]
        );
    }

    #[test]
    fn test_vowel_only_mora_starts_at_lead() {
        let query = AudioQuery::new(
            vec![AccentPhrase::new(vec![Mora::vowel("オ", "o", 0.2)])],
            0.1,
        );

        let visemes = extract_visemes(&query);
        assert_eq!(visemes, vec![VisemeEvent::new(0.1, 0.2, Phoneme::Oh)]);
    }

    #[test]
    fn test_pause_mora_is_emitted_after_the_phrase() {
        let query = AudioQuery::new(
            vec![AccentPhrase::new(vec![Mora::vowel("ア", "a", 0.1)])
                .with_pause(Mora::vowel("、", "pau", 0.3))],
            0.0,
        );

        let visemes = extract_visemes(&query);
        assert_eq!(
            visemes,
            vec![
                VisemeEvent::new(0.0, 0.1, Phoneme::Aa),
                VisemeEvent::new(0.1, 0.3, Phoneme::Sil),
            ]
        );
    }

    #[test]
    fn test_events_are_ordered_and_non_overlapping() {
        let query = AudioQuery::new(
            vec![
                AccentPhrase::new(vec![
                    Mora::vowel("カ", "a", 0.09).with_consonant("k", 0.03),
                    Mora::vowel("キ", "i", 0.07).with_consonant("k", 0.04),
                    Mora::vowel("ン", "N", 0.06),
                ])
                .with_pause(Mora::vowel("、", "pau", 0.2)),
                AccentPhrase::new(vec![
                    Mora::vowel("ス", "u", 0.08).with_consonant("s", 0.06),
                    Mora::vowel("エ", "e", 0.1),
                ]),
            ],
            0.1,
        );

        let visemes = extract_visemes(&query);
        assert_eq!(visemes.len(), 6);
        for pair in visemes.windows(2) {
            assert!(pair[0].time < pair[1].time, "events out of order");
            assert!(
                pair[0].end() <= pair[1].time + 1e-12,
                "events overlap: {:?} then {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_final_cursor_accounts_for_every_length() {
        let query = AudioQuery::new(
            vec![
                AccentPhrase::new(vec![
                    Mora::vowel("カ", "a", 0.09).with_consonant("k", 0.03),
                    Mora::vowel("ン", "N", 0.06),
                ])
                .with_pause(Mora::vowel("、", "pau", 0.2)),
            ],
            0.1,
        );

        let visemes = extract_visemes(&query);
        let final_cursor = visemes.last().unwrap().end();
        // Everything except the trailing silence has been walked.
        let expected = total_phoneme_length(&query) - query.post_phoneme_length;
        assert!((final_cursor - expected).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_vowel_becomes_silence() {
        let query = AudioQuery::new(
            vec![AccentPhrase::new(vec![Mora::vowel("?", "xx", 0.1)])],
            0.0,
        );

        let visemes = extract_visemes(&query);
        assert_eq!(visemes[0].phoneme, Phoneme::Sil);
    }

    #[test]
    fn test_empty_query_yields_no_events() {
        let query = AudioQuery::new(vec![], 0.1);
        assert!(extract_visemes(&query).is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let query = AudioQuery::new(
            vec![AccentPhrase::new(vec![
                Mora::vowel("ア", "a", 0.1).with_consonant("k", 0.05)
            ])],
            0.02,
        );
        assert_eq!(extract_visemes(&query), extract_visemes(&query));
    }
}
