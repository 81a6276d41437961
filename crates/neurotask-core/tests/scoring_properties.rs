//! Property tests for the scoring engines.

use chrono::{DateTime, Duration, TimeZone, Utc};
use neurotask_core::{
    compute_productivity, compute_score, sort_suggestions, Priority, ProductivityInput,
    ScoreInput, Scored, TaskStatus,
};
use proptest::prelude::*;

fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap()
}

fn priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
        Just(Priority::Critical),
        Just(Priority::Unknown),
    ]
}

fn status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Review),
        Just(TaskStatus::Done),
        Just(TaskStatus::Unknown),
    ]
}

prop_compose! {
    fn score_input()(
        priority in priority(),
        status in status(),
        due_offset_minutes in proptest::option::of(-200_000i64..200_000),
        estimated_hours in 0.0f64..1_000.0,
        has_description in any::<bool>(),
        subtask_count in 0u32..1_000,
        comment_count in 0u32..1_000,
    ) -> ScoreInput {
        ScoreInput {
            priority,
            status,
            due_at: due_offset_minutes.map(|m| reference_now() + Duration::minutes(m)),
            estimated_hours,
            has_description,
            subtask_count,
            comment_count,
        }
    }
}

#[derive(Debug, Clone)]
struct Item {
    id: usize,
    score: f64,
}

impl Scored for Item {
    fn score(&self) -> f64 {
        self.score
    }
}

proptest! {
    #[test]
    fn prop_score_is_bounded(input in score_input()) {
        let score = compute_score(&input, reference_now());
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn prop_score_is_deterministic(input in score_input()) {
        let now = reference_now();
        prop_assert_eq!(compute_score(&input, now), compute_score(&input.clone(), now));
    }

    #[test]
    fn prop_score_is_monotone_in_priority(input in score_input()) {
        let now = reference_now();
        let scores: Vec<f64> = Priority::known()
            .into_iter()
            .map(|priority| compute_score(&ScoreInput { priority, ..input.clone() }, now))
            .collect();
        for pair in scores.windows(2) {
            prop_assert!(pair[0] <= pair[1], "{:?}", scores);
        }
    }

    #[test]
    fn prop_done_never_exceeds_zero_without_bonuses(priority in priority()) {
        let input = ScoreInput { priority, status: TaskStatus::Done, ..ScoreInput::default() };
        prop_assert_eq!(compute_score(&input, reference_now()), 0.0);
    }

    #[test]
    fn prop_productivity_is_bounded(
        total in 0u64..10_000,
        completed in 0u64..20_000,
        overdue in 0u64..20_000,
        avg in 0.0f64..365.0,
    ) {
        let score = compute_productivity(&ProductivityInput {
            total_tasks: total,
            completed_tasks: completed,
            overdue_tasks: overdue,
            avg_completion_time_days: avg,
        });
        prop_assert!(score.is_finite());
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn prop_sort_is_stable_descending(scores in proptest::collection::vec(0u8..5, 0..40)) {
        let items: Vec<Item> = scores
            .iter()
            .enumerate()
            .map(|(id, s)| Item { id, score: f64::from(*s) * 10.0 })
            .collect();
        let sorted = sort_suggestions(items);
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }
}
