//! Command implementations for strip-instructions.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the shared report printing.

mod check;
mod restore;
mod strip;

use crate::cli::{Cli, Command};
use crate::context::{OutputMode, RunContext};
use crate::error::{Result, StripError};
use serde::Serialize;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = RunContext::from_cli(&cli)?;

    match cli.command {
        Command::Strip(args) => strip::cmd_strip(&ctx, args),
        Command::InPlace(args) => strip::cmd_in_place(&ctx, args),
        Command::Check(args) => check::cmd_check(&ctx, args),
        Command::Restore(args) => restore::cmd_restore(&ctx, args),
    }
}

/// Print `report` according to the output mode; `text` renders the text form.
fn emit<T: Serialize>(ctx: &RunContext, report: &T, text: impl FnOnce(&T)) -> Result<()> {
    match ctx.output {
        OutputMode::Text => text(report),
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(report).map_err(|e| {
                StripError::UserError(format!("failed to serialize report to JSON: {}", e))
            })?;
            println!("{}", json);
        }
        OutputMode::Quiet => {}
    }
    Ok(())
}
