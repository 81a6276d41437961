//! Task records as the surrounding task-management layer hands them to the
//! engines.
//!
//! Tags coming from storage or clients are free-form strings. Both
//! [`Priority`] and [`TaskStatus`] are closed enums with an explicit
//! `Unknown` variant, so an unrecognized tag falls back to a documented
//! weight instead of failing.

pub mod timestamp;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::scoring::{compute_score, ScoreInput};

/// Declared importance category of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
    /// Any tag not listed above; weighted like `Medium`.
    #[serde(other)]
    Unknown,
}

impl Priority {
    /// Base urgency weight of this tier.
    pub fn weight(self) -> f64 {
        match self {
            Priority::Low => 10.0,
            Priority::Medium => 30.0,
            Priority::High => 60.0,
            Priority::Critical => 90.0,
            Priority::Unknown => 30.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
            Priority::Unknown => "unknown",
        }
    }

    /// All recognized tiers, lowest first.
    pub fn known() -> [Priority; 4] {
        [Priority::Low, Priority::Medium, Priority::High, Priority::Critical]
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl FromStr for Priority {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            "critical" => Priority::Critical,
            _ => Priority::Unknown,
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle stage of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
    /// Any tag not listed above; contributes no adjustment.
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Additive score adjustment for this stage.
    pub fn adjustment(self) -> f64 {
        match self {
            TaskStatus::Done => -100.0,
            TaskStatus::Review => -20.0,
            TaskStatus::InProgress | TaskStatus::Todo | TaskStatus::Unknown => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
            TaskStatus::Unknown => "unknown",
        }
    }

    /// Human readable label, e.g. `In Progress`.
    pub fn title(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl FromStr for TaskStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "todo" => TaskStatus::Todo,
            "in_progress" => TaskStatus::InProgress,
            "review" => TaskStatus::Review,
            "done" => TaskStatus::Done,
            _ => TaskStatus::Unknown,
        })
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checklist item under a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub is_done: bool,
    #[serde(with = "timestamp::required")]
    pub created_at: DateTime<Utc>,
}

impl Subtask {
    /// Flip the done flag.
    pub fn toggle(&mut self) {
        self.is_done = !self.is_done;
    }
}

/// Discussion entry on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author_id: i64,
    #[serde(with = "timestamp::required")]
    pub created_at: DateTime<Utc>,
}

/// A task inside a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee_id: Option<i64>,
    #[serde(default, with = "timestamp::optional")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub actual_hours: f64,
    #[serde(default)]
    pub tags: String,
    /// Persisted urgency score. Stale until [`Task::refresh_score`] runs.
    #[serde(default)]
    pub ai_score: f64,
    #[serde(with = "timestamp::required")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::optional")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Task {
    /// New task with creation defaults: medium priority, todo, no estimate.
    pub fn new(
        id: i64,
        project_id: i64,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            project_id,
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            status: TaskStatus::default(),
            assignee_id: None,
            due_date: None,
            estimated_hours: 0.0,
            actual_hours: 0.0,
            tags: String::new(),
            ai_score: 0.0,
            created_at,
            updated_at: None,
            subtasks: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Engine input reflecting the task's current fields and child counts.
    pub fn score_input(&self) -> ScoreInput {
        ScoreInput {
            priority: self.priority,
            status: self.status,
            due_at: self.due_date,
            estimated_hours: self.estimated_hours,
            has_description: !self.description.is_empty(),
            subtask_count: u32::try_from(self.subtasks.len()).unwrap_or(u32::MAX),
            comment_count: u32::try_from(self.comments.len()).unwrap_or(u32::MAX),
        }
    }

    /// Recompute and store the urgency score.
    ///
    /// Must be called after any change to priority, status, due date,
    /// estimate, description, subtasks or comments.
    pub fn refresh_score(&mut self, now: DateTime<Utc>) -> f64 {
        self.ai_score = compute_score(&self.score_input(), now);
        self.ai_score
    }

    /// Past its due date and not done.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Done && self.due_date.is_some_and(|due| due < now)
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Split the comma-separated tag string.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}
