//! Task listing and suggestion commands for CLI.

use clap::Subcommand;
use neurotask_core::storage::load_workspace;
use neurotask_core::{
    list_tasks, top_suggestions, Config, Priority, TaskFilter, TaskSort, TaskStatus,
};
use std::path::PathBuf;

use super::resolve_now;

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks with fresh scores
    List {
        /// Snapshot file (workspace object or task array)
        file: PathBuf,
        /// Filter by status
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Filter by priority
        #[arg(long)]
        priority: Option<Priority>,
        /// Sort key: ai_score, created_at or due_date
        #[arg(long, default_value = "ai_score")]
        sort: TaskSort,
        /// Reference instant (defaults to now)
        #[arg(long)]
        now: Option<String>,
    },
    /// Suggest the most urgent tasks
    Suggest {
        /// Snapshot file (workspace object or task array)
        file: PathBuf,
        /// Number of suggestions (default: suggestions.limit)
        #[arg(long)]
        limit: Option<usize>,
        /// Reference instant (defaults to now)
        #[arg(long)]
        now: Option<String>,
    },
    /// Print the snapshot with recomputed scores
    Rescore {
        /// Snapshot file (workspace object or task array)
        file: PathBuf,
        /// Reference instant (defaults to now)
        #[arg(long)]
        now: Option<String>,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TaskAction::List {
            file,
            status,
            priority,
            sort,
            now,
        } => {
            let now = resolve_now(now.as_deref())?;
            let mut ws = load_workspace(&file)?;
            ws.refresh_scores(now);
            let filter = TaskFilter { status, priority };
            let listed = list_tasks(&ws.tasks, &filter, sort);
            println!("{}", serde_json::to_string_pretty(&listed)?);
        }
        TaskAction::Suggest { file, limit, now } => {
            let now = resolve_now(now.as_deref())?;
            let limit = match limit {
                Some(n) => n,
                None => Config::load()?.suggestions.limit,
            };
            let mut ws = load_workspace(&file)?;
            ws.refresh_scores(now);
            let suggestions = top_suggestions(ws.tasks, limit);
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
        }
        TaskAction::Rescore { file, now } => {
            let now = resolve_now(now.as_deref())?;
            let mut ws = load_workspace(&file)?;
            ws.refresh_scores(now);
            println!("{}", serde_json::to_string_pretty(&ws)?);
        }
    }
    Ok(())
}
