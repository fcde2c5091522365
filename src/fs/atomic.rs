//! Atomically committed output files.
//!
//! The stripper streams its output line by line, so instead of buffering the
//! whole document and writing it in one go, [`AtomicFile`] hands out a writer
//! backed by a temporary sibling of the target:
//!
//! 1. Lines are written to `.{filename}.{pid}.{n}.tmp` in the target's directory
//! 2. On [`AtomicFile::commit`] the buffer is flushed and optionally synced
//! 3. The temporary file is renamed over the target
//!
//! If the writer is dropped without being committed (an error part way
//! through), the temporary file is removed and the target is untouched.
//!
//! # Notes
//!
//! - `rename()` is atomic on POSIX when source and target share a filesystem,
//!   which is why the temporary file lives next to the target
//! - The temporary file is opened with `create_new`, so an existing file that
//!   happens to carry that name (the input, say) is skipped, never truncated
//! - On crash, a temporary file may remain (named `.{filename}.{pid}.{n}.tmp`)
//! - When the target is a symlink, the file it points to is replaced and the
//!   link is left in place

use crate::error::{Result, StripError};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// A write handle whose content only appears at the target path on commit.
#[derive(Debug)]
pub struct AtomicFile {
    target: PathBuf,
    temp_path: PathBuf,
    writer: Option<BufWriter<File>>,
    sync: bool,
    committed: bool,
}

impl AtomicFile {
    /// Create the temporary file for `target`.
    ///
    /// `sync` controls whether the content is fsynced before the rename.
    pub fn create<P: AsRef<Path>>(target: P, sync: bool) -> Result<Self> {
        let target = resolve_target(target.as_ref())?;
        let (temp_path, file) = create_temp_file(&target)?;

        Ok(Self {
            target,
            temp_path,
            writer: Some(BufWriter::new(file)),
            sync,
            committed: false,
        })
    }

    /// Flush, optionally sync, and move the content into place.
    pub fn commit(mut self) -> Result<()> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| StripError::UserError("output already committed".to_string()))?;

        let file = writer
            .into_inner()
            .map_err(|e| StripError::io("write", &self.target, e.into_error()))?;

        if self.sync {
            file.sync_all()
                .map_err(|e| StripError::io("sync", &self.temp_path, e))?;
        }
        drop(file);

        // Keep the mode of a file being replaced (e.g. an executable script).
        if let Ok(meta) = fs::metadata(&self.target) {
            fs::set_permissions(&self.temp_path, meta.permissions())
                .map_err(|e| StripError::io("set permissions on", &self.temp_path, e))?;
        }

        fs::rename(&self.temp_path, &self.target)
            .map_err(|e| StripError::io("replace", &self.target, e))?;
        self.committed = true;

        // Persist the directory entry as well.
        #[cfg(unix)]
        {
            if self.sync
                && let Some(parent) = self.target.parent()
                && let Ok(dir) = File::open(non_empty_dir(parent))
            {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.writer.as_mut() {
            Some(writer) => writer.write(buf),
            None => Err(io::Error::other("output already committed")),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.write_all(buf),
            None => Err(io::Error::other("output already committed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        if !self.committed {
            drop(self.writer.take());
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Follow a symlinked target so a rename replaces the real file.
pub(crate) fn resolve_target(target: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(target) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(target)
            .map_err(|e| StripError::io("resolve symlink", target, e)),
        _ => Ok(target.to_path_buf()),
    }
}

/// Exclusively create a fresh temporary sibling of `target`.
fn create_temp_file(target: &Path) -> Result<(PathBuf, File)> {
    for attempt in 0..MAX_TEMP_ATTEMPTS {
        let temp_path = generate_temp_path(target, attempt)?;
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
        {
            Ok(file) => return Ok((temp_path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(StripError::io("create temporary file", &temp_path, e)),
        }
    }

    Err(StripError::io(
        "create temporary file for",
        target,
        io::Error::new(ErrorKind::AlreadyExists, "no unused temporary name left"),
    ))
}

const MAX_TEMP_ATTEMPTS: u32 = 64;

/// Temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path, attempt: u32) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new(""));
    let filename = target.file_name().ok_or_else(|| {
        StripError::UserError(format!(
            "output path '{}' does not name a file",
            target.display()
        ))
    })?;

    let mut temp_name = OsString::from(".");
    temp_name.push(filename);
    temp_name.push(format!(".{}.{}.tmp", std::process::id(), attempt));
    Ok(parent.join(temp_name))
}

#[cfg(unix)]
fn non_empty_dir(dir: &Path) -> &Path {
    if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    }
}
