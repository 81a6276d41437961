mod config;
pub mod snapshot;

pub use config::{AnalyticsConfig, Config, LoggingConfig, SuggestionsConfig};
pub use snapshot::{load_tasks, load_workspace};

use std::path::PathBuf;

use crate::error::ConfigError;

/// `~/.config/neurotask[-dev]/` based on NEUROTASK_ENV, without touching
/// the filesystem.
///
/// Set NEUROTASK_ENV=dev to use development data directory.
pub fn data_dir_path() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("NEUROTASK_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("neurotask-dev")
    } else {
        base_dir.join("neurotask")
    }
}

/// Returns [`data_dir_path`], creating it if needed.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = data_dir_path();
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
