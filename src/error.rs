//! Error types for strip-instructions.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for stripping operations.
///
/// Each variant maps to its own exit code so scripts driving the tool can
/// tell a missing template apart from a stale backup.
#[derive(Error, Debug)]
pub enum StripError {
    /// The input path does not exist or is not a regular file.
    #[error("input '{}' not found", path.display())]
    NotFound { path: PathBuf },

    /// `restore` was asked for but there is no backup to restore from.
    #[error("no backup '{}' to restore from", path.display())]
    BackupNotFound { path: PathBuf },

    /// A backup left by an earlier in-place rewrite would be clobbered.
    #[error(
        "backup '{}' already exists; remove or rename it before stripping in place again",
        path.display()
    )]
    AlreadyExists { path: PathBuf },

    /// Any read or write failure, with the path it happened on.
    #[error("failed to {action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),
}

impl StripError {
    /// Build an `Io` error for `path`.
    pub fn io(action: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        StripError::Io {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            StripError::NotFound { .. } | StripError::BackupNotFound { .. } => {
                exit_codes::NOT_FOUND
            }
            StripError::AlreadyExists { .. } => exit_codes::ALREADY_EXISTS,
            StripError::Io { .. } => exit_codes::IO_FAILURE,
            StripError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for stripping operations.
pub type Result<T> = std::result::Result<T, StripError>;
