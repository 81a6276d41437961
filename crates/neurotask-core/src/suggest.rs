//! Ordering helpers over already-scored tasks.
//!
//! None of these make scoring decisions; they only read each item's score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task, TaskStatus};

/// Read access to an item's urgency score.
pub trait Scored {
    fn score(&self) -> f64;
}

impl Scored for Task {
    fn score(&self) -> f64 {
        self.ai_score
    }
}

impl Scored for f64 {
    fn score(&self) -> f64 {
        *self
    }
}

/// Reads the `ai_score` field; missing or non-numeric counts as 0.
impl Scored for serde_json::Value {
    fn score(&self) -> f64 {
        self.get("ai_score").and_then(serde_json::Value::as_f64).unwrap_or(0.0)
    }
}

impl<T: Scored + ?Sized> Scored for &T {
    fn score(&self) -> f64 {
        (**self).score()
    }
}

/// Sort by score, highest first. Equal scores keep their input order.
pub fn sort_suggestions<T: Scored>(mut items: Vec<T>) -> Vec<T> {
    // sort_by is stable
    items.sort_by(|a, b| b.score().total_cmp(&a.score()));
    items
}

/// The `limit` highest-scored items.
pub fn top_suggestions<T: Scored>(items: Vec<T>, limit: usize) -> Vec<T> {
    let mut sorted = sort_suggestions(items);
    sorted.truncate(limit);
    sorted
}

/// Sort order for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSort {
    /// Highest score first
    #[default]
    AiScore,
    /// Newest first
    CreatedAt,
    /// Earliest due first, undated last
    DueDate,
}

impl std::str::FromStr for TaskSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai_score" | "score" => Ok(TaskSort::AiScore),
            "created_at" => Ok(TaskSort::CreatedAt),
            "due_date" => Ok(TaskSort::DueDate),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Optional equality filters for task listings.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |s| task.status == s)
            && self.priority.map_or(true, |p| task.priority == p)
    }
}

fn due_key(due: Option<DateTime<Utc>>) -> (bool, Option<DateTime<Utc>>) {
    (due.is_none(), due)
}

/// Filter then order tasks for display.
pub fn list_tasks<'a, I>(tasks: I, filter: &TaskFilter, sort: TaskSort) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut listed: Vec<&Task> = tasks.into_iter().filter(|t| filter.matches(t)).collect();
    match sort {
        TaskSort::AiScore => listed = sort_suggestions(listed),
        TaskSort::CreatedAt => listed.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        TaskSort::DueDate => listed.sort_by_key(|t| due_key(t.due_date)),
    }
    listed
}
