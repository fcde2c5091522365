//! Instruction stripping.
//!
//! Template scripts carry notes for the person preparing a delivery on lines
//! that start with the marker `#>>>`. This module removes those lines and
//! passes every other line through byte for byte.
//!
//! - [`is_instruction`] is a literal prefix test on the raw line bytes.
//! - [`raw_lines`] lazily splits a reader into lines that keep their
//!   terminators, so CRLF files and a missing final newline survive untouched.
//! - [`strip`] runs the filter between two paths. When both paths name the
//!   same file the original is first copied to a backup, and the run is
//!   refused if that backup already exists.

use crate::error::{Result, StripError};
use crate::fs::{AtomicFile, backup_path, create_backup, is_same_file, move_file, resolve_target};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Marker that opens every instruction line.
pub const INSTRUCTION_MARKER: &[u8] = b"#>>>";

/// Default suffix appended to a template's file name to form its backup.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".backup";

/// Whether `line` is an instruction line.
///
/// The marker must occupy the first four bytes; leading whitespace disqualifies
/// the line.
pub fn is_instruction(line: &[u8]) -> bool {
    line.starts_with(INSTRUCTION_MARKER)
}

/// Lazy iterator over the lines of a reader, terminators included.
#[derive(Debug)]
pub struct RawLines<R> {
    reader: R,
    done: bool,
}

/// Split `reader` into byte lines that keep their trailing `\n`.
pub fn raw_lines<R: BufRead>(reader: R) -> RawLines<R> {
    RawLines {
        reader,
        done: false,
    }
}

impl<R: BufRead> Iterator for RawLines<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => Some(Ok(line)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Line counts from one pass over a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StripStats {
    pub lines_read: usize,
    pub lines_removed: usize,
    pub lines_kept: usize,
}

impl StripStats {
    fn record(&mut self, removed: bool) {
        self.lines_read += 1;
        if removed {
            self.lines_removed += 1;
        } else {
            self.lines_kept += 1;
        }
    }
}

/// Which side of a stream failed.
#[derive(Debug)]
pub enum StreamError {
    Read(io::Error),
    Write(io::Error),
}

/// Copy every non-instruction line from `reader` to `writer`.
///
/// The writer is flushed before returning.
pub fn strip_stream<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
) -> std::result::Result<StripStats, StreamError> {
    let mut stats = StripStats::default();

    for line in raw_lines(reader) {
        let line = line.map_err(StreamError::Read)?;
        let removed = is_instruction(&line);
        stats.record(removed);
        if !removed {
            writer.write_all(&line).map_err(StreamError::Write)?;
        }
    }

    writer.flush().map_err(StreamError::Write)?;
    Ok(stats)
}

/// Knobs for a strip run, usually taken from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOptions {
    /// Appended to the input's file name to form the backup path.
    pub backup_suffix: String,
    /// Fsync the backup and output before returning.
    pub sync: bool,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            sync: true,
        }
    }
}

/// Outcome of a successful strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripReport {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,
    #[serde(flatten)]
    pub stats: StripStats,
}

/// Write `input` minus its instruction lines to `output`.
///
/// If `output` is the same physical file as `input`, the original content is
/// first copied to the backup path (see [`backup_path`]) and read back from
/// there. An existing backup makes the call fail with
/// [`StripError::AlreadyExists`] before anything is written.
///
/// The output is committed atomically: on failure the previous content of
/// `output` (if any) stays in place.
pub fn strip(input: &Path, output: &Path, options: &StripOptions) -> Result<StripReport> {
    ensure_input_file(input)?;

    let backup = if is_same_file(input, output)? {
        let backup = backup_path(input, &options.backup_suffix);
        create_backup(input, &backup, options.sync)?;
        Some(backup)
    } else {
        None
    };
    let source = backup.as_deref().unwrap_or(input);

    let reader = File::open(source)
        .map(BufReader::new)
        .map_err(|e| open_error(source, e))?;
    let mut out = AtomicFile::create(output, options.sync)?;

    let stats = strip_stream(reader, &mut out).map_err(|e| match e {
        StreamError::Read(e) => StripError::io("read", source, e),
        StreamError::Write(e) => StripError::io("write", output, e),
    })?;
    out.commit()?;

    Ok(StripReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        backup,
        stats,
    })
}

/// Strip a template in place, keeping its original as a backup.
pub fn strip_in_place(path: &Path, options: &StripOptions) -> Result<StripReport> {
    strip(path, path, options)
}

/// An instruction line found by [`scan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionLine {
    /// 1-based line number.
    pub number: usize,
    /// Line text without its terminator, lossily decoded for display.
    pub text: String,
}

/// Read-only preview of what [`strip`] would remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub input: PathBuf,
    pub instructions: Vec<InstructionLine>,
    #[serde(flatten)]
    pub stats: StripStats,
}

/// List the instruction lines of `input` without writing anything.
pub fn scan(input: &Path) -> Result<ScanReport> {
    ensure_input_file(input)?;

    let reader = File::open(input)
        .map(BufReader::new)
        .map_err(|e| open_error(input, e))?;

    let mut stats = StripStats::default();
    let mut instructions = Vec::new();
    for (index, line) in raw_lines(reader).enumerate() {
        let line = line.map_err(|e| StripError::io("read", input, e))?;
        let removed = is_instruction(&line);
        stats.record(removed);
        if removed {
            instructions.push(InstructionLine {
                number: index + 1,
                text: display_text(&line),
            });
        }
    }

    Ok(ScanReport {
        input: input.to_path_buf(),
        instructions,
        stats,
    })
}

/// Outcome of a successful restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreReport {
    pub path: PathBuf,
    pub backup: PathBuf,
}

/// Move the backup of `path` back over `path`.
///
/// A symlinked `path` is followed, matching how [`strip`] rewrote it, so the
/// link survives and its target gets the original content back. Fails with
/// [`StripError::BackupNotFound`] when there is no backup to restore.
pub fn restore(path: &Path, options: &StripOptions) -> Result<RestoreReport> {
    let backup = backup_path(path, &options.backup_suffix);

    match fs::symlink_metadata(&backup) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(StripError::BackupNotFound { path: backup });
        }
        Err(e) => return Err(StripError::io("inspect", &backup, e)),
    }

    let target = resolve_target(path)?;
    move_file(&backup, &target)?;

    Ok(RestoreReport {
        path: path.to_path_buf(),
        backup,
    })
}

fn ensure_input_file(input: &Path) -> Result<()> {
    match fs::metadata(input) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(StripError::UserError(format!(
            "input '{}' is not a regular file",
            input.display()
        ))),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(StripError::NotFound {
            path: input.to_path_buf(),
        }),
        Err(e) => Err(StripError::io("inspect", input, e)),
    }
}

fn open_error(path: &Path, e: io::Error) -> StripError {
    if e.kind() == ErrorKind::NotFound {
        StripError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        StripError::io("open", path, e)
    }
}

fn display_text(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
