//! Projects, the activity log and the workspace snapshot that groups them
//! with their tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{timestamp, Task, TaskStatus};

fn default_color() -> String {
    "#6366f1".into()
}

fn default_emoji() -> String {
    "🚀".into()
}

/// A container of tasks owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    pub owner_id: i64,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default, with = "timestamp::optional")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::required")]
    pub created_at: DateTime<Utc>,
}

/// Task counts shown alongside a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub task_count: usize,
    pub completed_count: usize,
}

impl ProjectSummary {
    pub fn for_project<'a>(project_id: i64, tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks
            .into_iter()
            .filter(|t| t.project_id == project_id)
            .fold(Self::default(), |mut acc, t| {
                acc.task_count += 1;
                if t.is_done() {
                    acc.completed_count += 1;
                }
                acc
            })
    }
}

/// One entry of a user's activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub user_id: i64,
    pub action: String,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<i64>,
    #[serde(with = "timestamp::required")]
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn task_created(user_id: i64, task: &Task, at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            action: format!("Created task \"{}\"", task.title),
            entity_type: "task".into(),
            entity_id: Some(task.id),
            created_at: at,
        }
    }

    /// Entry for a status move, or `None` when the status did not change.
    pub fn status_changed(
        user_id: i64,
        task: &Task,
        previous: TaskStatus,
        at: DateTime<Utc>,
    ) -> Option<Self> {
        if task.status == previous {
            return None;
        }
        Some(Self {
            user_id,
            action: format!("Moved \"{}\" → {}", task.title, task.status.title()),
            entity_type: "task".into(),
            entity_id: Some(task.id),
            created_at: at,
        })
    }
}

/// Everything one user owns, as exported by the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Workspace {
    /// Recompute every task's stored score against one reference instant.
    pub fn refresh_scores(&mut self, now: DateTime<Utc>) {
        for task in &mut self.tasks {
            task.refresh_score(now);
        }
    }

    pub fn project(&self, id: i64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn tasks_in(&self, project_id: i64) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.project_id == project_id)
    }

    pub fn project_summary(&self, project_id: i64) -> ProjectSummary {
        ProjectSummary::for_project(project_id, &self.tasks)
    }
}
