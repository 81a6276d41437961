//! Task urgency scoring engine.
//!
//! Converts a task's attributes into a bounded urgency score used for the
//! default sort order and for next-task suggestions.
//!
//! ## Formula
//!
//! The score is additive. Each signal contributes independently:
//!
//! | Signal | Contribution |
//! |--------|--------------|
//! | Priority tier | low 10, medium 30, high 60, critical 90 (unknown 30) |
//! | Due date | overdue +40, <1d +30, <3d +20, <7d +10, <14d +5 |
//! | Estimate | >8h +10, >4h +5 |
//! | Description | +5 when present |
//! | Subtasks | +2 each, at most +10 |
//! | Comments | +1 each, at most +5 |
//! | Status | done −100, review −20, otherwise 0 |
//!
//! The terms are summed first, the sum is clamped to `[0, 100]` once and
//! the clamped value is rounded to one decimal once. Rounding individual
//! terms would change boundary outputs for fractional inputs.
//!
//! The score depends on the reference instant `now`, so a stored score goes
//! stale as the deadline approaches and must be recomputed rather than
//! cached across time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::task::{Priority, TaskStatus};

/// Lowest possible urgency score.
pub const SCORE_MIN: f64 = 0.0;
/// Highest possible urgency score.
pub const SCORE_MAX: f64 = 100.0;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Attributes of one task as seen by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub priority: Priority,
    pub status: TaskStatus,
    /// Absent means no deadline pressure.
    pub due_at: Option<DateTime<Utc>>,
    /// Non-negative; 0 means unestimated.
    pub estimated_hours: f64,
    pub has_description: bool,
    pub subtask_count: u32,
    pub comment_count: u32,
}

impl Default for ScoreInput {
    fn default() -> Self {
        Self {
            priority: Priority::Medium,
            status: TaskStatus::Todo,
            due_at: None,
            estimated_hours: 0.0,
            has_description: false,
            subtask_count: 0,
            comment_count: 0,
        }
    }
}

/// Deadline bracket, most urgent first. Brackets are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueBracket {
    Overdue,
    WithinDay,
    WithinThreeDays,
    WithinWeek,
    WithinTwoWeeks,
    Distant,
}

impl DueBracket {
    /// First matching bracket for a (possibly fractional) number of days.
    pub fn from_days_left(days_left: f64) -> Self {
        if days_left < 0.0 {
            DueBracket::Overdue
        } else if days_left < 1.0 {
            DueBracket::WithinDay
        } else if days_left < 3.0 {
            DueBracket::WithinThreeDays
        } else if days_left < 7.0 {
            DueBracket::WithinWeek
        } else if days_left < 14.0 {
            DueBracket::WithinTwoWeeks
        } else {
            DueBracket::Distant
        }
    }

    pub fn bonus(self) -> f64 {
        match self {
            DueBracket::Overdue => 40.0,
            DueBracket::WithinDay => 30.0,
            DueBracket::WithinThreeDays => 20.0,
            DueBracket::WithinWeek => 10.0,
            DueBracket::WithinTwoWeeks => 5.0,
            DueBracket::Distant => 0.0,
        }
    }
}

/// Fractional days from `now` until `due_at`; negative when past due.
pub fn days_left(due_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let delta = due_at.signed_duration_since(now);
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / MICROS_PER_DAY,
        // microseconds overflow past ~292k years
        None => delta.num_milliseconds() as f64 / MILLIS_PER_DAY,
    }
}

fn complexity_bonus(estimated_hours: f64) -> f64 {
    if estimated_hours > 8.0 {
        10.0
    } else if estimated_hours > 4.0 {
        5.0
    } else {
        0.0
    }
}

fn subtask_bonus(count: u32) -> f64 {
    (f64::from(count) * 2.0).min(10.0)
}

fn comment_bonus(count: u32) -> f64 {
    f64::from(count).min(5.0)
}

/// One named contribution to the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreTerm {
    pub name: &'static str,
    pub points: f64,
}

/// Explainable view of a single score computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Non-zero contributions in evaluation order
    pub terms: Vec<ScoreTerm>,
    /// Deadline bracket, when the task has a due date
    pub due_bracket: Option<DueBracket>,
    /// Sum of all terms before clamping
    pub raw: f64,
    /// Clamped and rounded score
    pub score: f64,
    pub scored_at: DateTime<Utc>,
}

impl ScoreBreakdown {
    /// Term with the largest absolute effect.
    pub fn dominant_term(&self) -> Option<&ScoreTerm> {
        self.terms
            .iter()
            .max_by(|a, b| a.points.abs().total_cmp(&b.points.abs()))
    }
}

fn terms(input: &ScoreInput, now: DateTime<Utc>) -> ([ScoreTerm; 7], Option<DueBracket>) {
    let bracket = input
        .due_at
        .map(|due| DueBracket::from_days_left(days_left(due, now)));

    let terms = [
        ScoreTerm { name: "priority", points: input.priority.weight() },
        ScoreTerm { name: "due_date", points: bracket.map_or(0.0, DueBracket::bonus) },
        ScoreTerm { name: "complexity", points: complexity_bonus(input.estimated_hours) },
        ScoreTerm { name: "description", points: if input.has_description { 5.0 } else { 0.0 } },
        ScoreTerm { name: "subtasks", points: subtask_bonus(input.subtask_count) },
        ScoreTerm { name: "comments", points: comment_bonus(input.comment_count) },
        ScoreTerm { name: "status", points: input.status.adjustment() },
    ];
    (terms, bracket)
}

/// Clamp into `[lo, hi]`, then round to one decimal.
pub(crate) fn clamp_round(raw: f64, lo: f64, hi: f64) -> f64 {
    round_one_decimal(raw.clamp(lo, hi))
}

/// Round to one decimal place, ties to even on the exact binary value.
///
/// Float formatting rounds the exact stored value, so `0.15` (stored just
/// below 0.15) becomes `0.1` and an exact tie such as `12.25` becomes `12.2`.
pub fn round_one_decimal(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Urgency score in `[0, 100]` for `input` evaluated at `now`.
///
/// Total and deterministic: the same input and `now` always yield the same
/// score, and no input can make it fail.
pub fn compute_score(input: &ScoreInput, now: DateTime<Utc>) -> f64 {
    let (terms, _) = terms(input, now);
    let raw: f64 = terms.iter().map(|t| t.points).sum();
    let score = clamp_round(raw, SCORE_MIN, SCORE_MAX);
    trace!(raw, score, "computed urgency score");
    score
}

/// [`compute_score`] with the clock sampled once, here.
pub fn compute_score_now(input: &ScoreInput) -> f64 {
    compute_score(input, Utc::now())
}

/// Same computation as [`compute_score`], keeping every non-zero term.
pub fn explain_score(input: &ScoreInput, now: DateTime<Utc>) -> ScoreBreakdown {
    let (terms, due_bracket) = terms(input, now);
    let raw: f64 = terms.iter().map(|t| t.points).sum();
    ScoreBreakdown {
        terms: terms.into_iter().filter(|t| t.points != 0.0).collect(),
        due_bracket,
        raw,
        score: clamp_round(raw, SCORE_MIN, SCORE_MAX),
        scored_at: now,
    }
}
