//! File move helper used to restore a backup over its template.
//!
//! On POSIX filesystems this is normally an atomic `rename(2)`. Some
//! environments (certain mounts, containers, or cross-volume configs) can
//! surface `EXDEV` ("Invalid cross-device link") even when paths look local.
//! For those cases we fall back to a copy + delete strategy.

use crate::error::{Result, StripError};
use crate::fs::AtomicFile;
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Move a single file from `source` to `destination`, replacing it.
///
/// - Tries `rename()` first (atomic when possible).
/// - Falls back to an atomic copy to `destination` + delete of `source` on EXDEV.
pub fn move_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_rename(&e) => move_file_cross_device(source, destination),
        Err(e) => Err(StripError::io("move", source, e)),
    }
}

fn move_file_cross_device(source: &Path, destination: &Path) -> Result<()> {
    let mut src = File::open(source).map_err(|e| StripError::io("open", source, e))?;

    let mut out = AtomicFile::create(destination, true)?;
    io::copy(&mut src, &mut out).map_err(|e| StripError::io("copy to", destination, e))?;
    out.commit()?;

    fs::remove_file(source).map_err(|e| StripError::io("remove moved file", source, e))?;

    Ok(())
}

fn is_cross_device_rename(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices || err.raw_os_error() == Some(18)
}
