//! Property-based tests for scoring and history invariants.

use chrono::DateTime;
use proptest::prelude::*;

use gift_survey::scoring::{category_total, percentage, score};
use gift_survey::{Category, History, MAX_CATEGORY_SCORE, MAX_HISTORY_ENTRIES, Rating};

fn categories(count: usize) -> Vec<Category> {
    (0..count)
        .map(|i| Category {
            name: format!("gift-{i}"),
            description: None,
        })
        .collect()
}

fn answers_strategy(len: usize) -> impl Strategy<Value = Vec<Option<Rating>>> {
    prop::collection::vec(prop::option::of((0u8..=3).prop_map(|v| Rating::clamped(v.into()))), len)
}

proptest! {
    #[test]
    fn scores_stay_in_bounds(answers in answers_strategy(125)) {
        for category in score(&answers, &categories(25)) {
            prop_assert!(category.score <= MAX_CATEGORY_SCORE);
            prop_assert!(category.percentage <= 100);
            prop_assert_eq!(category.max_score, 15);
            prop_assert_eq!(category.percentage, percentage(category.score));
        }
    }

    #[test]
    fn scoring_is_deterministic(answers in answers_strategy(125)) {
        let cats = categories(25);
        prop_assert_eq!(score(&answers, &cats), score(&answers, &cats));
    }

    #[test]
    fn ranking_is_sorted_and_stable(answers in answers_strategy(125)) {
        let cats = categories(25);
        let ranked = score(&answers, &cats);
        prop_assert_eq!(ranked.len(), 25);

        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.score >= b.score);
            if a.score == b.score {
                let ia: usize = a.name.trim_start_matches("gift-").parse().unwrap();
                let ib: usize = b.name.trim_start_matches("gift-").parse().unwrap();
                prop_assert!(ia < ib);
            }
        }
    }

    #[test]
    fn totals_match_strided_sum(answers in answers_strategy(125), category in 0usize..25) {
        let expected: u32 = [0, 25, 50, 75, 100]
            .iter()
            .filter_map(|offset| answers[category + offset])
            .map(|r| u32::from(r.value()))
            .sum();
        prop_assert_eq!(category_total(&answers, category), expected);
    }

    #[test]
    fn percentage_matches_float_rounding(score in 0u32..=15) {
        let expected = (f64::from(score) / 15.0 * 100.0).round() as u32;
        prop_assert_eq!(percentage(score), expected);
    }

    #[test]
    fn history_never_exceeds_bound(records in 0usize..40) {
        let mut history = History::new();
        for i in 0..records {
            let now = DateTime::from_timestamp_millis(i as i64).unwrap();
            history.record(vec![], vec![], now);
        }
        prop_assert_eq!(history.len(), records.min(MAX_HISTORY_ENTRIES));
        if records > 0 {
            prop_assert_eq!(history.latest().unwrap().id, records as i64 - 1);
        }
    }
}
