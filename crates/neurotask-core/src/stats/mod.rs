//! Statistics module for NeuroTask
//!
//! Rolls a user's workspace up into the analytics view: counts, breakdowns,
//! the weekly completion histogram, top projects and the productivity score.

mod analytics;

pub use analytics::{
    average_completion_days, AnalyticsReport, DailyCompletions, RecentActivity, TopProject,
};
