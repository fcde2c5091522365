//! Configuration model for strip-instructions.
//!
//! An optional YAML file, passed explicitly with `--config`. It supports
//! forward-compatible parsing (unknown fields are ignored), defaults for every
//! field, and validation of values.

use crate::error::{Result, StripError};
use crate::stripper::{DEFAULT_BACKUP_SUFFIX, StripOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration for stripping runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Appended to a template's file name to form its backup (default: ".backup").
    pub backup_suffix: String,

    /// Whether to fsync backups and outputs before reporting success.
    pub sync_output: bool,

    /// NDJSON audit log to append an event to after each operation.
    pub events_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            sync_output: true,
            events_file: None,
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(StripError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            StripError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| StripError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// - `backup_suffix` must be non-empty, so a backup never aliases its template
    /// - `backup_suffix` must not contain a path separator
    pub fn validate(&self) -> Result<()> {
        if self.backup_suffix.is_empty() {
            return Err(StripError::UserError(
                "config validation failed: backup_suffix must be non-empty".to_string(),
            ));
        }

        if self.backup_suffix.contains('/') || self.backup_suffix.contains('\\') {
            return Err(StripError::UserError(format!(
                "config validation failed: backup_suffix must not contain a path separator (found '{}')",
                self.backup_suffix
            )));
        }

        Ok(())
    }

    /// Options for the stripper derived from this config.
    pub fn strip_options(&self) -> StripOptions {
        StripOptions {
            backup_suffix: self.backup_suffix.clone(),
            sync: self.sync_output,
        }
    }
}
