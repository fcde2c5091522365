//! Implementation of the `restore` command.

use super::emit;
use crate::cli::RestoreArgs;
use crate::context::RunContext;
use crate::error::Result;
use crate::events::EventAction;
use crate::stripper::{self, RestoreReport};

/// Execute the `restore` command.
///
/// Moves `<file><backup_suffix>` back over `<file>`, which also lifts the
/// guard against a second in-place strip.
pub fn cmd_restore(ctx: &RunContext, args: RestoreArgs) -> Result<()> {
    let report = stripper::restore(&args.file, &ctx.strip_options())?;
    ctx.record(EventAction::Restore, &report);
    emit(ctx, &report, print_report)
}

fn print_report(report: &RestoreReport) {
    println!(
        "Restored {} from {}",
        report.path.display(),
        report.backup.display()
    );
}
