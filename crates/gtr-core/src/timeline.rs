//! Day-by-day, hour-by-hour breakdown of aggregated time.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Timelike};
use serde::Serialize;

use crate::aggregate::CommitNoteDetail;

pub const HOURS_PER_DAY: usize = 24;

/// Time spent on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub day: NaiveDate,
    /// Seconds across the whole day; equals the sum of `hours`.
    pub total: i64,
    /// Seconds per hour of day, index 0 = 00:00–00:59.
    pub hours: [i64; HOURS_PER_DAY],
}

impl TimelineEntry {
    fn empty(day: NaiveDate) -> Self {
        Self {
            day,
            total: 0,
            hours: [0; HOURS_PER_DAY],
        }
    }
}

/// Buckets every file contribution into its day and hour in `tz`.
///
/// Timeline points are placed at their own instant. Seconds a file recorded
/// without timeline points are placed at the commit time, so the entry totals
/// always add up to the notes' totals. Timeline points beyond a file's
/// `time_spent` (parsed notes reject these) place nothing at the commit time,
/// so no bucket goes negative. Days without activity are omitted.
pub fn bucketize<Tz: TimeZone>(details: &[CommitNoteDetail], tz: &Tz) -> Vec<TimelineEntry> {
    let mut days: BTreeMap<NaiveDate, TimelineEntry> = BTreeMap::new();

    for detail in details {
        for file in &detail.note.files {
            let mut placed = 0_i64;
            for (&epoch, &seconds) in &file.timeline {
                let Some(at) = DateTime::from_timestamp(epoch, 0) else {
                    tracing::warn!(
                        commit = %detail.commit,
                        file = %file.source_file,
                        epoch,
                        "timeline point out of range"
                    );
                    continue;
                };
                add(&mut days, &at.with_timezone(tz), seconds);
                placed = placed.saturating_add(seconds);
            }

            let unplaced = file.time_spent.saturating_sub(placed).max(0);
            if unplaced > 0 {
                add(&mut days, &detail.date.with_timezone(tz), unplaced);
            }
        }
    }

    days.into_values().filter(|entry| entry.total != 0).collect()
}

fn add<Tz: TimeZone>(
    days: &mut BTreeMap<NaiveDate, TimelineEntry>,
    at: &DateTime<Tz>,
    seconds: i64,
) {
    let local = at.naive_local();
    let entry = days
        .entry(local.date())
        .or_insert_with(|| TimelineEntry::empty(local.date()));
    entry.total = entry.total.saturating_add(seconds);
    let hour = &mut entry.hours[local.hour() as usize];
    *hour = hour.saturating_add(seconds);
}
