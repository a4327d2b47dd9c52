//! Commits command: one row per commit that carries a time note.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use gtr_core::Reporter;

use crate::cli::LimitArgs;
use crate::commands::util::{limiter, write_json};

pub fn run<W, Tz>(
    writer: &mut W,
    reporter: &Reporter<'_>,
    args: &LimitArgs,
    now: &DateTime<Tz>,
    pretty: bool,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone + Sync,
    Tz::Offset: Sync,
{
    let limiter = limiter(args)?;
    let rows = reporter
        .commit_export(&limiter, now)
        .context("failed to export commit notes")?;
    tracing::debug!(rows = rows.len(), "exported commit notes");
    write_json(writer, &rows, pretty)
}
