//! Aggregate productivity score over a user's task set.
//!
//! ```text
//! raw = (completed/total * 0.8 - overdue/total * 0.3 + max(0, 1 - avg_days/30) * 0.2) * 100
//! ```
//!
//! The weights are fixed; changing them breaks parity with historical
//! scores.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::scoring::clamp_round;

const COMPLETION_WEIGHT: f64 = 0.8;
const OVERDUE_WEIGHT: f64 = 0.3;
const TIME_BONUS_WEIGHT: f64 = 0.2;
/// Average completion time at which the time bonus reaches zero.
const TIME_BONUS_HORIZON_DAYS: f64 = 30.0;

/// Rollups for one user, aggregated by the caller.
///
/// `completed_tasks` and `overdue_tasks` are expected to be at most
/// `total_tasks`; this is not enforced here. A violating input still yields
/// a clamped, finite score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductivityInput {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub overdue_tasks: u64,
    pub avg_completion_time_days: f64,
}

/// Productivity score in `[0, 100]`; exactly `0.0` when there are no tasks.
pub fn compute_productivity(input: &ProductivityInput) -> f64 {
    if input.total_tasks == 0 {
        return 0.0;
    }

    let total = input.total_tasks as f64;
    let completion_rate = input.completed_tasks as f64 / total;
    let overdue_penalty = input.overdue_tasks as f64 / total.max(1.0) * OVERDUE_WEIGHT;
    // f64::max returns the non-NaN operand, so a NaN average earns no bonus.
    let time_bonus = (1.0 - input.avg_completion_time_days / TIME_BONUS_HORIZON_DAYS).max(0.0)
        * TIME_BONUS_WEIGHT;

    let raw = (completion_rate * COMPLETION_WEIGHT - overdue_penalty + time_bonus) * 100.0;
    let score = clamp_round(raw, 0.0, 100.0);
    trace!(raw, score, total = input.total_tasks, "computed productivity score");
    score
}
