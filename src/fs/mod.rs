//! Filesystem utilities for strip-instructions.
//!
//! Safe file operations used by the stripper: an atomically committed output
//! file, exclusive backup creation for in-place rewrites, and the file move
//! used to restore a backup.

pub mod atomic;
pub mod backup;
mod move_file;

pub use atomic::AtomicFile;
pub(crate) use atomic::resolve_target;
pub use backup::{backup_path, create_backup, is_same_file};
pub use move_file::move_file;
