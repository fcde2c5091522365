//! Audit log for strip-instructions.
//!
//! When an events file is configured, every successful operation appends one
//! JSON object per line (NDJSON) so a delivery can later be traced back to the
//! template and backup it came from.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: `strip` or `restore`
//! - `actor`: `user@HOST`
//! - `details`: the operation's report (paths and line counts)

use crate::error::{Result, StripError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Instruction lines stripped from a template
    Strip,
    /// Template restored from its backup
    Restore,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Strip => write!(f, "strip"),
            EventAction::Restore => write!(f, "restore"),
        }
    }
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// Who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Action-specific details.
    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the details from any serializable report.
    pub fn with_details<T: Serialize>(mut self, details: &T) -> Result<Self> {
        self.details = serde_json::to_value(details).map_err(|e| {
            StripError::UserError(format!("failed to serialize event details: {}", e))
        })?;
        Ok(self)
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            StripError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Check that the log at `path` can be appended to, creating it if needed.
///
/// Run before any template is touched so a bad log path fails up front.
pub fn ensure_events_file(path: &Path) -> Result<()> {
    open_for_append(path).map(|_| ())
}

/// Append an event to the NDJSON log at `path`, creating the file if needed.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    let mut file = open_for_append(path)?;

    writeln!(file, "{}", json_line).map_err(|e| StripError::io("write event to", path, e))?;

    file.sync_all()
        .map_err(|e| StripError::io("sync events file", path, e))?;

    Ok(())
}

fn open_for_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StripError::io("open events file", path, e))
}
