//! Status command: time accrued since the last commit, per project.

use std::io::Write;

use anyhow::{Context, Result};
use gtr_core::Reporter;

use crate::commands::util::write_json;

pub fn run<W: Write>(writer: &mut W, reporter: &Reporter<'_>, pretty: bool) -> Result<()> {
    let totals = reporter
        .status_totals()
        .context("failed to read uncommitted time")?;
    write_json(writer, &totals, pretty)
}
