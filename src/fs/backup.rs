//! Backups for in-place rewrites.
//!
//! Before a template is rewritten in place its original bytes are copied to a
//! sibling backup file. The backup is opened with `create_new`, so an existing
//! backup (from an earlier run) is never overwritten and the rewrite is
//! refused instead.

use crate::error::{Result, StripError};
use std::fs::{self, File, Metadata, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Derive the backup path for `input` by appending `suffix` to its file name.
///
/// `script.py` with suffix `.backup` becomes `script.py.backup`.
pub fn backup_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Copy `source` to `backup`, failing with `AlreadyExists` if `backup` exists.
///
/// On a failed copy the partially written backup is removed again; it was
/// created by this call, so nothing older is lost.
pub fn create_backup(source: &Path, backup: &Path, sync: bool) -> Result<()> {
    let mut dest = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(backup)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => StripError::AlreadyExists {
                path: backup.to_path_buf(),
            },
            _ => StripError::io("create backup", backup, e),
        })?;

    let copied = File::open(source)
        .map_err(|e| StripError::io("open", source, e))
        .and_then(|mut src| {
            io::copy(&mut src, &mut dest).map_err(|e| StripError::io("write backup", backup, e))
        })
        .and_then(|_| {
            if sync {
                dest.sync_all()
                    .map_err(|e| StripError::io("sync backup", backup, e))
            } else {
                Ok(())
            }
        });

    if copied.is_err() {
        drop(dest);
        let _ = fs::remove_file(backup);
    }
    copied
}

/// Whether `a` and `b` name the same physical file.
///
/// A `b` that does not exist yet is never the same file. On unix this compares
/// device and inode, so hard links and symlinks are recognised.
pub fn is_same_file(a: &Path, b: &Path) -> Result<bool> {
    let meta_b = match fs::metadata(b) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(StripError::io("inspect", b, e)),
    };
    let meta_a = fs::metadata(a).map_err(|e| StripError::io("inspect", a, e))?;

    same_identity(a, &meta_a, b, &meta_b)
}

#[cfg(unix)]
fn same_identity(_a: &Path, meta_a: &Metadata, _b: &Path, meta_b: &Metadata) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;
    Ok(meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino())
}

#[cfg(not(unix))]
fn same_identity(a: &Path, _meta_a: &Metadata, b: &Path, _meta_b: &Metadata) -> Result<bool> {
    let a = fs::canonicalize(a).map_err(|e| StripError::io("resolve", a, e))?;
    let b = fs::canonicalize(b).map_err(|e| StripError::io("resolve", b, e))?;
    Ok(a == b)
}
