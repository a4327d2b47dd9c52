//! Export command: raw data sets for other tools.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use gtr_core::Reporter;

use crate::cli::{ExportData, LimitArgs};
use crate::commands::{commits, projects, status};

pub fn run<W, Tz>(
    writer: &mut W,
    reporter: &Reporter<'_>,
    data: ExportData,
    args: &LimitArgs,
    now: &DateTime<Tz>,
    pretty: bool,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone + Sync,
    Tz::Offset: Sync,
{
    match data {
        ExportData::Commits => commits::run(writer, reporter, args, now, pretty),
        ExportData::Status => status::run(writer, reporter, pretty),
        ExportData::Projects => projects::run(writer, reporter, pretty),
    }
}
