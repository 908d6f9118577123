//! Property tests for the pure domain layer: section arithmetic, script
//! joining, rating bounds, and the length-ladder text builders.

use proptest::prelude::*;

use podgen::domain::length::{qa_bank, render_padding_dialogue, speaker_label};
use podgen::domain::outline::{MIN_DURATION_MINUTES, SuggestedStructure};
use podgen::domain::rating::parse_rating;
use podgen::domain::script::{SECTION_SEPARATOR, ScriptDraft, trailing_chars, word_count};
use podgen::domain::{AppError, LengthConfig};

proptest! {
    #[test]
    fn structure_sections_sum_to_requested_duration(duration in MIN_DURATION_MINUTES..=600u32) {
        let structure = SuggestedStructure::for_duration(duration).unwrap();
        prop_assert_eq!(structure.total_minutes(), duration);
        prop_assert_eq!(structure.sections.len(), 3);
        prop_assert!(structure.sections.iter().all(|s| s.duration >= 1));
    }

    #[test]
    fn structure_rejects_everything_below_minimum(duration in 0u32..MIN_DURATION_MINUTES) {
        let err = SuggestedStructure::for_duration(duration).unwrap_err();
        prop_assert!(
            matches!(err, AppError::DurationTooShort { min: 9, .. }),
            "expected DurationTooShort with min 9, got {:?}",
            err
        );
    }

    #[test]
    fn full_script_round_trips_through_separator(
        introduction in "[A-Za-z0-9 .,!?]{1,80}",
        segments in proptest::collection::vec("[A-Za-z0-9 .,!?]{1,80}", 0..6),
        conclusion in "[A-Za-z0-9 .,!?]{1,80}",
    ) {
        let draft = ScriptDraft { introduction, segments, conclusion };
        let full = draft.full_script();

        let parts: Vec<&str> = full.split(SECTION_SEPARATOR).collect();
        prop_assert_eq!(parts.len(), draft.segments.len() + 2);
        prop_assert_eq!(parts[0], draft.introduction.as_str());
        prop_assert_eq!(parts[parts.len() - 1], draft.conclusion.as_str());
        for (part, segment) in parts[1..parts.len() - 1].iter().zip(&draft.segments) {
            prop_assert_eq!(*part, segment.as_str());
        }
    }

    #[test]
    fn trailing_chars_is_a_bounded_suffix(text in ".*", max_chars in 0usize..600) {
        let tail = trailing_chars(&text, max_chars);
        prop_assert!(text.ends_with(tail));
        if text.chars().count() <= max_chars {
            prop_assert_eq!(tail, text.as_str());
        } else {
            prop_assert_eq!(tail.chars().count(), max_chars);
        }
    }

    #[test]
    fn rating_scores_stay_in_bounds_for_any_text(text in ".{0,400}") {
        let rating = parse_rating(&text);
        let scores = [
            rating.overall,
            rating.categories.content,
            rating.categories.structure,
            rating.categories.engagement,
            rating.categories.clarity,
            rating.categories.pacing,
        ];
        for score in scores {
            prop_assert!((0.0..=5.0).contains(&score), "score out of bounds: {score}");
        }
    }

    #[test]
    fn rating_overall_is_mean_of_categories(
        content in 0.0f64..=5.0,
        structure in 0.0f64..=5.0,
        engagement in 0.0f64..=5.0,
        clarity in 0.0f64..=5.0,
        pacing in 0.0f64..=5.0,
    ) {
        let critique = format!(
            "```json\n{{\"content\": {content}, \"structure\": {structure}, \
             \"engagement\": {engagement}, \"clarity\": {clarity}, \"pacing\": {pacing}}}\n```"
        );
        let rating = parse_rating(&critique);
        let mean = (content + structure + engagement + clarity + pacing) / 5.0;
        let expected = (mean * 10.0).round() / 10.0;
        prop_assert!((rating.overall - expected).abs() < 1e-9);
    }

    #[test]
    fn target_word_count_is_monotonic_in_duration(
        duration in 9u32..400,
        words_per_minute in 50u32..400,
        margin in 1.0f64..2.0,
    ) {
        let config = LengthConfig { words_per_minute, margin };
        prop_assert!(config.target_word_count(duration + 1) >= config.target_word_count(duration));
        prop_assert!(
            config.target_word_count(duration) >= (duration * words_per_minute) as usize
        );
    }

    #[test]
    fn padding_mentions_every_point(
        points in proptest::collection::vec("[a-z]{20,40}", 1..8),
        member_count in 1u32..5,
        start_turn in 0usize..12,
    ) {
        let dialogue = render_padding_dialogue(&points, member_count, start_turn);
        for point in &points {
            prop_assert!(dialogue.contains(point.as_str()));
        }
        prop_assert!(word_count(&dialogue) >= points.len());
    }

    #[test]
    fn speaker_label_stays_within_member_range(turn in 0usize..100, member_count in 0u32..6) {
        let label = speaker_label(turn, member_count);
        let number: u32 = label.strip_prefix("Speaker ").unwrap().parse().unwrap();
        prop_assert!(number >= 1);
        prop_assert!(number <= member_count.max(1));
    }

    #[test]
    fn qa_bank_always_names_the_topic(topic in "[A-Za-z ]{1,30}") {
        let bank = qa_bank(&topic);
        prop_assert_eq!(bank.len(), 10);
        for triple in &bank {
            prop_assert!(triple.question.contains(topic.as_str()));
        }
    }
}
