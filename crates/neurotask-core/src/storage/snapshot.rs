//! JSON snapshots exported by the storage layer.
//!
//! A snapshot is either a full [`Workspace`] object or a bare array of
//! tasks.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::task::Task;
use crate::workspace::Workspace;

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Workspace(Workspace),
    Tasks(Vec<Task>),
}

impl From<Snapshot> for Workspace {
    fn from(snapshot: Snapshot) -> Self {
        match snapshot {
            Snapshot::Workspace(ws) => ws,
            Snapshot::Tasks(tasks) => Workspace {
                tasks,
                ..Default::default()
            },
        }
    }
}

/// Parse a snapshot from a JSON string.
pub fn parse_workspace(json: &str) -> Result<Workspace> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    Ok(snapshot.into())
}

/// Read a snapshot file.
pub fn load_workspace(path: &Path) -> Result<Workspace> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::Snapshot {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let workspace = parse_workspace(&content).map_err(|e| CoreError::Snapshot {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(
        path = %path.display(),
        projects = workspace.projects.len(),
        tasks = workspace.tasks.len(),
        "loaded snapshot"
    );
    Ok(workspace)
}

/// Read only the tasks of a snapshot file.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    Ok(load_workspace(path)?.tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_task_array() {
        let ws = parse_workspace(
            r#"[{"id": 1, "project_id": 2, "title": "a", "created_at": "2026-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(ws.tasks.len(), 1);
        assert!(ws.projects.is_empty());
    }

    #[test]
    fn accepts_workspace_object() {
        let ws = parse_workspace(r#"{"projects": [], "tasks": []}"#).unwrap();
        assert!(ws.tasks.is_empty());
        assert!(ws.activities.is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_workspace("{tasks"), Err(CoreError::Json(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_workspace(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
