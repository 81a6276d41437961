//! # NeuroTask Core Library
//!
//! Core logic behind the NeuroTask task manager. Users own projects, projects
//! contain tasks, and every task carries a derived urgency score used for
//! default ordering and next-task suggestions.
//!
//! ## Architecture
//!
//! - **Scoring**: pure urgency score (0-100) for one task, evaluated against a
//!   caller-supplied reference instant
//! - **Productivity**: pure aggregate score (0-100) over a user's rollups
//! - **Suggest**: stable ordering and filtering over already-scored tasks
//! - **Stats**: the analytics view assembled from a workspace snapshot
//! - **Storage**: TOML configuration and JSON snapshot loading
//!
//! Persistence, authentication and transport live outside this crate; they
//! hand plain values in and store the scores that come out.
//!
//! ## Key Components
//!
//! - [`compute_score`]: urgency score for a [`ScoreInput`]
//! - [`compute_productivity`]: productivity score for a [`ProductivityInput`]
//! - [`sort_suggestions`]: stable descending order by score
//! - [`AnalyticsReport`]: per-user analytics view
//! - [`Config`]: application configuration management

pub mod error;
pub mod productivity;
pub mod scoring;
pub mod stats;
pub mod storage;
pub mod suggest;
pub mod task;
pub mod workspace;

pub use error::{ConfigError, CoreError, ValidationError};
pub use productivity::{compute_productivity, ProductivityInput};
pub use scoring::{
    compute_score, compute_score_now, explain_score, DueBracket, ScoreBreakdown, ScoreInput,
    ScoreTerm,
};
pub use stats::AnalyticsReport;
pub use storage::{AnalyticsConfig, Config};
pub use suggest::{list_tasks, sort_suggestions, top_suggestions, Scored, TaskFilter, TaskSort};
pub use task::timestamp::parse_timestamp;
pub use task::{Comment, Priority, Subtask, Task, TaskStatus};
pub use workspace::{Activity, Project, ProjectSummary, Workspace};
