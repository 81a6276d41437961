//! Per-user analytics report.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::productivity::{compute_productivity, ProductivityInput};
use crate::scoring::round_one_decimal;
use crate::storage::AnalyticsConfig;
use crate::task::{Task, TaskStatus};
use crate::workspace::Workspace;

/// Completed task count for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCompletions {
    /// Weekday abbreviation, e.g. `Mon`
    pub date: String,
    pub count: usize,
}

/// Project entry in the top-projects list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProject {
    pub name: String,
    pub emoji: String,
    pub color: String,
    pub total: usize,
    pub done: usize,
}

/// Condensed activity feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub action: String,
    pub entity_type: String,
    pub created_at: String,
}

/// Aggregate analytics view for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub total_projects: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub overdue_tasks: usize,
    /// Percent of tasks done, one decimal
    pub completion_rate: f64,
    pub productivity_score: f64,
    pub tasks_by_priority: BTreeMap<String, usize>,
    pub tasks_by_status: BTreeMap<String, usize>,
    pub recent_activity: Vec<RecentActivity>,
    /// Oldest day first, today last
    pub weekly_completions: Vec<DailyCompletions>,
    pub top_projects: Vec<TopProject>,
}

/// Mean days from creation to last update across done tasks that carry an
/// update timestamp. `None` when no such task exists.
pub fn average_completion_days(tasks: &[Task]) -> Option<f64> {
    let spans: Vec<f64> = tasks
        .iter()
        .filter(|t| t.is_done())
        .filter_map(|t| t.updated_at.map(|u| u.signed_duration_since(t.created_at)))
        .map(|d| d.num_seconds().max(0) as f64 / 86_400.0)
        .collect();

    if spans.is_empty() {
        None
    } else {
        Some(spans.iter().sum::<f64>() / spans.len() as f64)
    }
}

fn count_by<K: Ord>(tasks: &[Task], key: impl Fn(&Task) -> K) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for task in tasks {
        *counts.entry(key(task)).or_insert(0) += 1;
    }
    counts
}

fn weekly_completions(done: &[&Task], now: DateTime<Utc>, days: u32) -> Vec<DailyCompletions> {
    (0..i64::from(days))
        .rev()
        .map(|offset| {
            let day = now - Duration::days(offset);
            let start = day.date_naive().and_time(NaiveTime::MIN).and_utc();
            let end = start + Duration::days(1);
            let count = done
                .iter()
                .filter(|t| t.updated_at.is_some_and(|u| u >= start && u < end))
                .count();
            DailyCompletions {
                date: day.format("%a").to_string(),
                count,
            }
        })
        .collect()
}

impl AnalyticsReport {
    /// Build the report for `workspace` as seen at `now`.
    pub fn build(workspace: &Workspace, now: DateTime<Utc>, config: &AnalyticsConfig) -> Self {
        let tasks = &workspace.tasks;
        let total_tasks = tasks.len();
        let done: Vec<&Task> = tasks.iter().filter(|t| t.is_done()).collect();
        let in_progress_tasks = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::InProgress)
            .count();
        let overdue_tasks = tasks.iter().filter(|t| t.is_overdue(now)).count();

        let completion_rate = if total_tasks == 0 {
            0.0
        } else {
            round_one_decimal(done.len() as f64 / total_tasks as f64 * 100.0)
        };

        let avg_completion_time_days = if config.measure_completion_time {
            average_completion_days(tasks).unwrap_or(config.avg_completion_days)
        } else {
            config.avg_completion_days
        };
        let productivity_score = compute_productivity(&ProductivityInput {
            total_tasks: total_tasks as u64,
            completed_tasks: done.len() as u64,
            overdue_tasks: overdue_tasks as u64,
            avg_completion_time_days,
        });

        let mut activities: Vec<_> = workspace.activities.iter().collect();
        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let recent_activity = activities
            .into_iter()
            .take(config.recent_activity)
            .map(|a| RecentActivity {
                action: a.action.clone(),
                entity_type: a.entity_type.clone(),
                created_at: a.created_at.to_rfc3339(),
            })
            .collect();

        let mut top_projects: Vec<TopProject> = workspace
            .projects
            .iter()
            .filter(|p| !p.is_archived)
            .map(|p| {
                let summary = workspace.project_summary(p.id);
                TopProject {
                    name: p.name.clone(),
                    emoji: p.emoji.clone(),
                    color: p.color.clone(),
                    total: summary.task_count,
                    done: summary.completed_count,
                }
            })
            .collect();
        top_projects.sort_by(|a, b| b.total.cmp(&a.total));
        top_projects.truncate(config.top_projects);

        debug!(
            total_tasks,
            completed = done.len(),
            overdue_tasks,
            productivity_score,
            "built analytics report"
        );

        Self {
            total_projects: workspace.projects.len(),
            total_tasks,
            completed_tasks: done.len(),
            in_progress_tasks,
            overdue_tasks,
            completion_rate,
            productivity_score,
            tasks_by_priority: count_by(tasks, |t| t.priority.as_str().to_string()),
            tasks_by_status: count_by(tasks, |t| t.status.as_str().to_string()),
            recent_activity,
            weekly_completions: weekly_completions(&done, now, config.weekly_days),
            top_projects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use crate::workspace::{Activity, Project};
    use chrono::TimeZone;

    // A Wednesday
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 15, 15, 0, 0).unwrap()
    }

    fn project(id: i64, name: &str, archived: bool) -> Project {
        Project {
            id,
            name: name.into(),
            description: String::new(),
            color: "#6366f1".into(),
            emoji: "🚀".into(),
            owner_id: 1,
            is_archived: archived,
            deadline: None,
            created_at: now() - Duration::days(30),
        }
    }

    fn task(id: i64, project_id: i64, status: TaskStatus) -> Task {
        let mut t = Task::new(id, project_id, format!("t{id}"), now() - Duration::days(10));
        t.status = status;
        t
    }

    #[test]
    fn empty_workspace_reports_zeroes() {
        let report =
            AnalyticsReport::build(&Workspace::default(), now(), &AnalyticsConfig::default());
        assert_eq!(report.total_tasks, 0);
        assert_eq!(report.completion_rate, 0.0);
        assert_eq!(report.productivity_score, 0.0);
        assert_eq!(report.weekly_completions.len(), 7);
        assert!(report.top_projects.is_empty());
    }

    #[test]
    fn counts_and_rates() {
        let mut overdue = task(3, 1, TaskStatus::Todo);
        overdue.due_date = Some(now() - Duration::days(1));
        overdue.priority = Priority::High;
        let mut done_late = task(4, 1, TaskStatus::Done);
        done_late.due_date = Some(now() - Duration::days(1));

        let ws = Workspace {
            projects: vec![project(1, "Apollo", false)],
            tasks: vec![
                task(1, 1, TaskStatus::Done),
                task(2, 1, TaskStatus::InProgress),
                overdue,
                done_late,
            ],
            activities: vec![],
        };
        let report = AnalyticsReport::build(&ws, now(), &AnalyticsConfig::default());

        assert_eq!(report.total_tasks, 4);
        assert_eq!(report.completed_tasks, 2);
        assert_eq!(report.in_progress_tasks, 1);
        assert_eq!(report.overdue_tasks, 1);
        assert_eq!(report.completion_rate, 50.0);
        // 0.5*0.8 - 0.25*0.3 + (1 - 7/30)*0.2 = 0.47833..
        assert_eq!(report.productivity_score, 47.8);
        assert_eq!(report.tasks_by_status["done"], 2);
        assert_eq!(report.tasks_by_priority["high"], 1);
        assert_eq!(report.tasks_by_priority["medium"], 3);
    }

    #[test]
    fn weekly_histogram_ends_today() {
        let mut today = task(1, 1, TaskStatus::Done);
        today.updated_at = Some(now() - Duration::hours(2));
        let mut yesterday = task(2, 1, TaskStatus::Done);
        yesterday.updated_at = Some(now() - Duration::days(1));
        let mut stale = task(3, 1, TaskStatus::Done);
        stale.updated_at = Some(now() - Duration::days(20));
        let mut undone = task(4, 1, TaskStatus::Review);
        undone.updated_at = Some(now());

        let ws = Workspace { tasks: vec![today, yesterday, stale, undone], ..Default::default() };
        let report = AnalyticsReport::build(&ws, now(), &AnalyticsConfig::default());
        let week = &report.weekly_completions;

        assert_eq!(week.len(), 7);
        assert_eq!(week[6], DailyCompletions { date: "Wed".into(), count: 1 });
        assert_eq!(week[5], DailyCompletions { date: "Tue".into(), count: 1 });
        assert_eq!(week[0].date, "Thu");
        assert_eq!(week.iter().map(|d| d.count).sum::<usize>(), 2);
    }

    #[test]
    fn top_projects_skip_archived_and_limit() {
        let ws = Workspace {
            projects: vec![
                project(1, "Small", false),
                project(2, "Big", false),
                project(3, "Hidden", true),
            ],
            tasks: vec![
                task(1, 1, TaskStatus::Todo),
                task(2, 2, TaskStatus::Done),
                task(3, 2, TaskStatus::Todo),
                task(4, 3, TaskStatus::Todo),
                task(5, 3, TaskStatus::Todo),
                task(6, 3, TaskStatus::Todo),
            ],
            activities: vec![],
        };
        let config = AnalyticsConfig { top_projects: 1, ..Default::default() };
        let report = AnalyticsReport::build(&ws, now(), &config);

        assert_eq!(report.total_projects, 3);
        assert_eq!(report.top_projects.len(), 1);
        assert_eq!(report.top_projects[0].name, "Big");
        assert_eq!(report.top_projects[0].done, 1);
    }

    #[test]
    fn recent_activity_is_newest_first() {
        let t = task(1, 1, TaskStatus::Todo);
        let activities = (0..12)
            .map(|i| Activity::task_created(1, &t, now() - Duration::minutes(i)))
            .rev()
            .collect();
        let ws = Workspace { activities, ..Default::default() };
        let report = AnalyticsReport::build(&ws, now(), &AnalyticsConfig::default());

        assert_eq!(report.recent_activity.len(), 10);
        assert_eq!(report.recent_activity[0].created_at, now().to_rfc3339());
    }

    #[test]
    fn measured_completion_time_feeds_productivity() {
        let mut slow = task(1, 1, TaskStatus::Done);
        slow.updated_at = Some(slow.created_at + Duration::days(45));
        let ws = Workspace { tasks: vec![slow], ..Default::default() };

        assert_eq!(average_completion_days(&ws.tasks), Some(45.0));

        let measured = AnalyticsConfig { measure_completion_time: true, ..Default::default() };
        // 1.0*0.8 with no time bonus
        assert_eq!(AnalyticsReport::build(&ws, now(), &measured).productivity_score, 80.0);
        // default 7 days: 0.8 + 0.15333..
        assert_eq!(
            AnalyticsReport::build(&ws, now(), &AnalyticsConfig::default()).productivity_score,
            95.3
        );
    }
}
