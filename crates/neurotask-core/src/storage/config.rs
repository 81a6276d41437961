//! TOML-based application configuration.
//!
//! Stores analytics and presentation preferences:
//! - Fallback average completion time for the productivity score
//! - List sizes for top projects, recent activity and suggestions
//! - Default log filter for the CLI
//!
//! Configuration is stored at `~/.config/neurotask/config.toml`. Scoring
//! weights are fixed and deliberately absent from this file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{data_dir, data_dir_path};
use crate::error::ConfigError;

const FILE_NAME: &str = "config.toml";

/// Analytics view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Average completion time (days) fed to the productivity score
    #[serde(default = "default_avg_completion_days")]
    pub avg_completion_days: f64,
    /// Measure the average from done tasks instead, falling back to
    /// `avg_completion_days` when nothing has been completed
    #[serde(default)]
    pub measure_completion_time: bool,
    #[serde(default = "default_top_projects")]
    pub top_projects: usize,
    #[serde(default = "default_recent_activity")]
    pub recent_activity: usize,
    #[serde(default = "default_weekly_days")]
    pub weekly_days: u32,
}

/// Suggestion list configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionsConfig {
    #[serde(default = "default_suggestion_limit")]
    pub limit: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` env-filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/neurotask/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default functions
fn default_avg_completion_days() -> f64 {
    7.0
}
fn default_top_projects() -> usize {
    5
}
fn default_recent_activity() -> usize {
    10
}
fn default_weekly_days() -> u32 {
    7
}
fn default_suggestion_limit() -> usize {
    5
}
fn default_log_filter() -> String {
    "warn".into()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            avg_completion_days: default_avg_completion_days(),
            measure_completion_time: false,
            top_projects: default_top_projects(),
            recent_activity: default_recent_activity(),
            weekly_days: default_weekly_days(),
        }
    }
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            limit: default_suggestion_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn parse_like(
        existing: &serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<serde_json::Value, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        match existing {
            serde_json::Value::Bool(_) => value
                .parse::<bool>()
                .map(serde_json::Value::Bool)
                .map_err(|e| invalid(e.to_string())),
            serde_json::Value::Number(n) if n.is_u64() => value
                .parse::<u64>()
                .map(|v| serde_json::Value::Number(v.into()))
                .map_err(|e| invalid(e.to_string())),
            serde_json::Value::Number(_) => value
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(serde_json::Value::Number)
                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number"))),
            serde_json::Value::String(_) => Ok(serde_json::Value::String(value.into())),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;
        let new_value = Self::parse_like(existing, key, value)?;
        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Path of the config file inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join(FILE_NAME))
    }

    /// Load from the default data directory, writing defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&data_dir()?)
    }

    /// Load `config.toml` from `dir`, writing defaults when absent.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        match Self::read_existing(dir)? {
            Some(cfg) => Ok(cfg),
            None => {
                let cfg = Self::default();
                cfg.save_to(dir)?;
                Ok(cfg)
            }
        }
    }

    /// Read `config.toml` from `dir` without writing anything; defaults when
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read_from(dir: &Path) -> Result<Self, ConfigError> {
        Ok(Self::read_existing(dir)?.unwrap_or_default())
    }

    fn read_existing(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join(FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                debug!(path = %path.display(), "loaded config");
                Ok(Some(cfg))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default data directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&data_dir()?)
    }

    /// Persist as `config.toml` inside `dir`.
    pub fn save_to(&self, dir: &Path) -> Result<(), ConfigError> {
        let path = dir.join(FILE_NAME);
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.clone(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| save_failed(e.to_string()))?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The value is parsed as the
    /// type of the current value. Does not persist; call [`Config::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }

    /// Read from the default data directory, returning default on error.
    /// Never creates the directory or the file.
    pub fn read_or_default() -> Self {
        Self::read_from(&data_dir_path()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.analytics.avg_completion_days, 7.0);
        assert_eq!(parsed.suggestions.limit, 5);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[analytics]\ntop_projects = 3\n").unwrap();
        assert_eq!(parsed.analytics.top_projects, 3);
        assert_eq!(parsed.analytics.recent_activity, 10);
        assert_eq!(parsed.logging.filter, "warn");
    }

    #[test]
    fn get_by_dotted_key() {
        let cfg = Config::default();
        assert_eq!(cfg.get("analytics.top_projects").as_deref(), Some("5"));
        assert_eq!(cfg.get("logging.filter").as_deref(), Some("warn"));
        assert_eq!(cfg.get("analytics.avg_completion_days").as_deref(), Some("7.0"));
        assert!(cfg.get("analytics.nope").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_parses_by_existing_type() {
        let mut cfg = Config::default();
        cfg.set("analytics.top_projects", "8").unwrap();
        cfg.set("analytics.avg_completion_days", "3.5").unwrap();
        cfg.set("analytics.measure_completion_time", "true").unwrap();
        cfg.set("logging.filter", "neurotask_core=debug").unwrap();

        assert_eq!(cfg.analytics.top_projects, 8);
        assert_eq!(cfg.analytics.avg_completion_days, 3.5);
        assert!(cfg.analytics.measure_completion_time);
        assert_eq!(cfg.logging.filter, "neurotask_core=debug");
    }

    #[test]
    fn read_from_leaves_missing_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::read_from(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(!dir.path().join(FILE_NAME).exists());

        let missing = dir.path().join("not-created");
        assert_eq!(Config::read_from(&missing).unwrap(), Config::default());
        assert!(!missing.exists());
    }

    #[test]
    fn read_from_sees_saved_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.set("logging.filter", "debug").unwrap();
        cfg.save_to(dir.path()).unwrap();
        assert_eq!(Config::read_from(dir.path()).unwrap().logging.filter, "debug");
    }

    #[test]
    fn set_rejects_unknown_and_mistyped() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("analytics.weights", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("analytics", "1"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(
            cfg.set("suggestions.limit", "many"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg, Config::default());
    }
}
