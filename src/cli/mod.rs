//! CLI argument parsing for strip-instructions.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strip imager-only instruction lines (`#>>>`) from template scripts.
///
/// Every line that starts with `#>>>` is removed; all other lines are copied
/// byte for byte. Rewriting a file in place keeps the original next to it as
/// `<file>.backup` and refuses to run again while that backup exists.
#[derive(Parser, Debug)]
#[command(name = "strip-instructions")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML config file (backup suffix, fsync, events file).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append an NDJSON audit event per operation to this file.
    #[arg(long, global = true, value_name = "PATH")]
    pub events: Option<PathBuf>,

    /// Print reports as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress the summary on success.
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write INPUT without its instruction lines to OUTPUT.
    ///
    /// Passing the same path twice rewrites the file in place after backing
    /// it up.
    Strip(StripArgs),

    /// Rewrite each FILE in place, keeping a backup of the original.
    ///
    /// Files are processed in order; the first failure stops the run.
    InPlace(InPlaceArgs),

    /// List the instruction lines of FILE without writing anything.
    Check(CheckArgs),

    /// Move FILE's backup back over FILE.
    Restore(RestoreArgs),
}

/// Arguments for the `strip` command.
#[derive(Parser, Debug)]
pub struct StripArgs {
    /// Template to read.
    pub input: PathBuf,

    /// Destination; may be the same as INPUT.
    pub output: PathBuf,
}

/// Arguments for the `in-place` command.
#[derive(Parser, Debug)]
pub struct InPlaceArgs {
    /// Templates to rewrite.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Template to inspect.
    pub file: PathBuf,
}

/// Arguments for the `restore` command.
#[derive(Parser, Debug)]
pub struct RestoreArgs {
    /// Template whose backup should be restored.
    pub file: PathBuf,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_strip_requires_both_paths() {
        let cli = Cli::try_parse_from(["strip-instructions", "strip", "in.py", "out.py"]).unwrap();
        match cli.command {
            Command::Strip(args) => {
                assert_eq!(args.input, PathBuf::from("in.py"));
                assert_eq!(args.output, PathBuf::from("out.py"));
            }
            _ => panic!("Expected Strip command"),
        }

        assert!(Cli::try_parse_from(["strip-instructions", "strip", "in.py"]).is_err());
        assert!(Cli::try_parse_from(["strip-instructions", "strip"]).is_err());
    }

    #[test]
    fn parse_in_place_multiple_files() {
        let cli = Cli::try_parse_from([
            "strip-instructions",
            "in-place",
            "scriptForImagingPrep_template.py",
            "scriptForImaging_template.py",
        ])
        .unwrap();
        match cli.command {
            Command::InPlace(args) => assert_eq!(args.files.len(), 2),
            _ => panic!("Expected InPlace command"),
        }

        assert!(Cli::try_parse_from(["strip-instructions", "in-place"]).is_err());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "strip-instructions",
            "check",
            "t.py",
            "--json",
            "--config",
            "strip.yaml",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("strip.yaml")));
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn quiet_conflicts_with_json() {
        assert!(
            Cli::try_parse_from(["strip-instructions", "-q", "--json", "restore", "t.py"]).is_err()
        );
    }
}
