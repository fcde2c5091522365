//! Per-invocation context: resolved config and output preferences.

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event, ensure_events_file};
use crate::stripper::StripOptions;
use serde::Serialize;
use std::path::PathBuf;

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
    Quiet,
}

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: Config,
    pub events_file: Option<PathBuf>,
    pub output: OutputMode,
}

impl RunContext {
    /// Resolve the context from global CLI flags.
    ///
    /// `--events` takes precedence over `events_file` in the config. The
    /// events file is opened here, so an unwritable log stops the run before
    /// any template is touched.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        let events_file = cli.events.clone().or_else(|| config.events_file.clone());
        if let Some(path) = &events_file {
            ensure_events_file(path)?;
        }

        let output = if cli.json {
            OutputMode::Json
        } else if cli.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Text
        };

        Ok(Self {
            config,
            events_file,
            output,
        })
    }

    pub fn strip_options(&self) -> StripOptions {
        self.config.strip_options()
    }

    /// Append an audit event if an events file is configured.
    ///
    /// The operation has already happened by the time this runs, so a failed
    /// append is a warning on stderr and never changes the outcome.
    pub fn record<T: Serialize>(&self, action: EventAction, details: &T) {
        let Some(path) = &self.events_file else {
            return;
        };

        let appended = Event::new(action)
            .with_details(details)
            .and_then(|event| append_event(path, &event));
        if let Err(err) = appended {
            eprintln!("Warning: {} event not logged: {}", action, err);
        }
    }
}
