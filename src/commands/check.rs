//! Implementation of the `check` command.
//!
//! Lists the instruction lines a strip would remove, without writing anything.

use super::emit;
use crate::cli::CheckArgs;
use crate::context::RunContext;
use crate::error::Result;
use crate::stripper::{self, ScanReport};

/// Execute the `check` command.
pub fn cmd_check(ctx: &RunContext, args: CheckArgs) -> Result<()> {
    let report = stripper::scan(&args.file)?;
    emit(ctx, &report, print_report)
}

fn print_report(report: &ScanReport) {
    println!(
        "{}: {} instruction line(s) of {}",
        report.input.display(),
        report.stats.lines_removed,
        report.stats.lines_read
    );

    if report.instructions.is_empty() {
        return;
    }

    println!();
    let width = report
        .instructions
        .last()
        .map(|line| line.number.to_string().len())
        .unwrap_or(1);
    for line in &report.instructions {
        println!("  {:>width$}  {}", line.number, line.text, width = width);
    }
}
