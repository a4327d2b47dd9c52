//! Timeline command: committed time per day and hour.

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
    let entries = reporter
        .timeline(&limiter, now)
        .context("failed to build timeline")?;
    write_json(writer, &entries, pretty)
}
