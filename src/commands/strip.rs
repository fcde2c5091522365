//! Implementation of the `strip` and `in-place` commands.

use super::emit;
use crate::cli::{InPlaceArgs, StripArgs};
use crate::context::RunContext;
use crate::error::Result;
use crate::events::EventAction;
use crate::stripper::{self, StripReport};

/// Execute the `strip` command.
pub fn cmd_strip(ctx: &RunContext, args: StripArgs) -> Result<()> {
    let report = stripper::strip(&args.input, &args.output, &ctx.strip_options())?;
    finish(ctx, &report)
}

/// Execute the `in-place` command.
///
/// Stops at the first file that fails; files before it stay stripped.
pub fn cmd_in_place(ctx: &RunContext, args: InPlaceArgs) -> Result<()> {
    let options = ctx.strip_options();

    for file in &args.files {
        let report = stripper::strip_in_place(file, &options)?;
        finish(ctx, &report)?;
    }

    Ok(())
}

fn finish(ctx: &RunContext, report: &StripReport) -> Result<()> {
    ctx.record(EventAction::Strip, report);
    emit(ctx, report, print_report)
}

fn print_report(report: &StripReport) {
    println!("Read:     {}", report.input.display());
    println!("Wrote:    {}", report.output.display());
    if let Some(backup) = &report.backup {
        println!("Backup:   {}", backup.display());
    }
    println!(
        "Removed {} of {} lines ({} kept).",
        report.stats.lines_removed, report.stats.lines_read, report.stats.lines_kept
    );
}
