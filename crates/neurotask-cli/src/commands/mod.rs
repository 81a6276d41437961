//! Subcommand implementations.

pub mod config;
pub mod score;
pub mod stats;
pub mod task;

use chrono::{DateTime, Utc};
use neurotask_core::{parse_timestamp, ValidationError};

/// Reference instant for a run: `--now` when given, else the clock, read once.
pub fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>, ValidationError> {
    match now {
        Some(raw) => parse_timestamp(raw),
        None => Ok(Utc::now()),
    }
}
