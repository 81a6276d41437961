use clap::Subcommand;
use neurotask_core::storage::load_workspace;
use neurotask_core::{compute_productivity, AnalyticsReport, Config, ProductivityInput};
use std::path::PathBuf;

use super::resolve_now;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Productivity score from task rollups
    Productivity {
        total: u64,
        completed: u64,
        overdue: u64,
        /// Average completion time in days
        avg_days: f64,
    },
    /// Analytics report for a snapshot
    Analytics {
        /// Snapshot file (workspace object or task array)
        file: PathBuf,
        /// Reference instant (defaults to now)
        #[arg(long)]
        now: Option<String>,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StatsAction::Productivity {
            total,
            completed,
            overdue,
            avg_days,
        } => {
            let score = compute_productivity(&ProductivityInput {
                total_tasks: total,
                completed_tasks: completed,
                overdue_tasks: overdue,
                avg_completion_time_days: avg_days,
            });
            println!("{score:.1}");
        }
        StatsAction::Analytics { file, now } => {
            let now = resolve_now(now.as_deref())?;
            let config = Config::load()?;
            let ws = load_workspace(&file)?;
            let report = AnalyticsReport::build(&ws, now, &config.analytics);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
