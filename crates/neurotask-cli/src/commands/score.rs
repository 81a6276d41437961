//! Single-task urgency scoring.

use clap::Args;
use neurotask_core::{
    compute_score, explain_score, parse_timestamp, Priority, ScoreInput, TaskStatus,
};

use super::resolve_now;

#[derive(Args)]
pub struct ScoreArgs {
    /// Priority tier: low, medium, high or critical (others count as medium)
    #[arg(long, default_value = "medium")]
    priority: Priority,
    /// Status: todo, in_progress, review or done (others count as todo)
    #[arg(long, default_value = "todo")]
    status: TaskStatus,
    /// Due date, RFC 3339 or naive UTC timestamp
    #[arg(long)]
    due: Option<String>,
    /// Estimated hours (0 = unestimated)
    #[arg(long, default_value_t = 0.0)]
    estimated_hours: f64,
    /// Task has a description
    #[arg(long)]
    has_description: bool,
    /// Number of subtasks
    #[arg(long, default_value_t = 0)]
    subtasks: u32,
    /// Number of comments
    #[arg(long, default_value_t = 0)]
    comments: u32,
    /// Reference instant (defaults to now)
    #[arg(long)]
    now: Option<String>,
    /// Print the per-term breakdown as JSON
    #[arg(long)]
    explain: bool,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let now = resolve_now(args.now.as_deref())?;
    let input = ScoreInput {
        priority: args.priority,
        status: args.status,
        due_at: args.due.as_deref().map(parse_timestamp).transpose()?,
        estimated_hours: args.estimated_hours,
        has_description: args.has_description,
        subtask_count: args.subtasks,
        comment_count: args.comments,
    };

    if args.explain {
        let breakdown = explain_score(&input, now);
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        println!("{:.1}", compute_score(&input, now));
    }
    Ok(())
}
