//! Shared utilities for CLI commands.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use gtr_core::{CancelToken, CommitLimiter, LimiterParams, Reporter, to_json};
use gtr_git::{EventProbe, Git, GitHistory, GitNotes, ProjectIndex};
use serde::Serialize;

use crate::Config;
use crate::cli::LimitArgs;

/// The data sources a report reads from.
#[derive(Debug, Clone)]
pub struct Sources {
    pub index: ProjectIndex,
    pub history: GitHistory,
    pub notes: GitNotes,
    pub probe: EventProbe,
}

/// Which projects a report covers and how long it may take.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub tags: Vec<String>,
    pub include_untagged: bool,
    pub timeout: Option<Duration>,
}

impl Sources {
    pub fn from_config(config: &Config) -> Self {
        let git = Git::new(&config.git_binary);
        Self {
            index: ProjectIndex::new(&config.project_index),
            history: GitHistory::new(git.clone()),
            notes: GitNotes::new(git, &config.notes_ref),
            probe: EventProbe,
        }
    }

    pub fn reporter(&self, options: &ReportOptions) -> Reporter<'_> {
        let cancel = options
            .timeout
            .map_or_else(CancelToken::new, CancelToken::with_timeout);
        Reporter::new(&self.index, &self.history, &self.notes, &self.probe)
            .with_tags(options.tags.clone(), options.include_untagged)
            .with_cancel(cancel)
    }
}

/// Validates limit arguments into a commit limiter.
pub fn limiter(args: &LimitArgs) -> Result<CommitLimiter> {
    CommitLimiter::new(&LimiterParams::from(args)).context("invalid commit limits")
}

/// Writes a report as one JSON document.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    report: &T,
    pretty: bool,
) -> Result<()> {
    let json = to_json(report, pretty)?;
    writeln!(writer, "{json}")?;
    Ok(())
}
