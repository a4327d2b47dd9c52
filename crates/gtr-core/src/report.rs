//! Report builders composed from selection, aggregation and bucketing.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone};
use rayon::prelude::*;
use serde::Serialize;

use crate::aggregate::{CommitNoteDetail, aggregate};
use crate::cancel::CancelToken;
use crate::error::ReportError;
use crate::limiter::CommitLimiter;
use crate::note::CommitNote;
use crate::select::select_projects;
use crate::source::{
    ActivityProbe, CommitHistory, NoteStore, ProjectRegistry, project_name,
};
use crate::timeline::{TimelineEntry, bucketize};

/// Turns seconds into a human-readable label.
pub type DurationFormatter = fn(i64) -> String;

/// Formats seconds as "Xh Ym" at or above one hour, "Xm" below.
///
/// Negative durations are shown as 0m.
pub fn format_duration(seconds: i64) -> String {
    if seconds < 0 {
        return "0m".to_string();
    }
    let total_minutes = seconds / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Time for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectTotal {
    pub seconds: i64,
    pub label: String,
    /// Only set for status totals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<CommitNote>,
}

/// Totals keyed by project display name.
pub type ProjectTotals = BTreeMap<String, ProjectTotal>;

/// Builds reports from a set of collaborators.
pub struct Reporter<'a> {
    registry: &'a dyn ProjectRegistry,
    history: &'a dyn CommitHistory,
    notes: &'a dyn NoteStore,
    probe: &'a dyn ActivityProbe,
    formatter: DurationFormatter,
    tags: Vec<String>,
    include_untagged: bool,
    cancel: CancelToken,
}

impl<'a> Reporter<'a> {
    pub fn new(
        registry: &'a dyn ProjectRegistry,
        history: &'a dyn CommitHistory,
        notes: &'a dyn NoteStore,
        probe: &'a dyn ActivityProbe,
    ) -> Self {
        Self {
            registry,
            history,
            notes,
            probe,
            formatter: format_duration,
            tags: Vec::new(),
            include_untagged: true,
            cancel: CancelToken::new(),
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: DurationFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Restricts reports to projects carrying one of `tags`.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>, include_untagged: bool) -> Self {
        self.tags = tags;
        self.include_untagged = include_untagged;
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Tracked project paths, unfiltered by time.
    pub fn project_list(&self) -> Result<Vec<PathBuf>, ReportError> {
        self.registry
            .list(&self.tags, self.include_untagged)
            .map_err(ReportError::RegistryUnavailable)
    }

    /// One row per selected commit that carries a note.
    pub fn commit_export<Tz>(
        &self,
        limiter: &CommitLimiter,
        now: &DateTime<Tz>,
    ) -> Result<Vec<CommitNoteDetail>, ReportError>
    where
        Tz: TimeZone + Sync,
        Tz::Offset: Sync,
    {
        let projects = self.project_list()?;
        let selected = select_projects(limiter, self.history, &projects, now, &self.cancel)?;
        aggregate(self.notes, &selected, &self.cancel)
    }

    /// Committed time per project within `limiter`.
    pub fn project_totals<Tz>(
        &self,
        limiter: &CommitLimiter,
        now: &DateTime<Tz>,
    ) -> Result<ProjectTotals, ReportError>
    where
        Tz: TimeZone + Sync,
        Tz::Offset: Sync,
    {
        let details = self.commit_export(limiter, now)?;

        let mut seconds: BTreeMap<String, i64> = BTreeMap::new();
        for detail in &details {
            *seconds.entry(detail.project.clone()).or_insert(0) += detail.note.total();
        }

        Ok(seconds
            .into_iter()
            .map(|(name, total)| {
                let total = ProjectTotal {
                    seconds: total,
                    label: (self.formatter)(total),
                    note: None,
                };
                (name, total)
            })
            .collect())
    }

    /// Uncommitted time per project, from read-only snapshots.
    pub fn status_totals(&self) -> Result<ProjectTotals, ReportError> {
        let mut projects = self.project_list()?;
        projects.sort();

        let snapshots = projects
            .par_iter()
            .map(|path| {
                self.cancel.check()?;
                self.probe
                    .snapshot(path, true)
                    .map(|note| (project_name(path), note))
                    .map_err(|source| ReportError::ProbeFailure {
                        project: path.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        let mut notes: BTreeMap<String, CommitNote> = BTreeMap::new();
        for (name, note) in snapshots {
            notes.entry(name).or_default().absorb(note);
        }

        Ok(notes
            .into_iter()
            .map(|(name, note)| {
                let seconds = note.total();
                let total = ProjectTotal {
                    seconds,
                    label: (self.formatter)(seconds),
                    note: Some(note),
                };
                (name, total)
            })
            .collect())
    }

    /// Day/hour breakdown of committed time within `limiter`, in `now`'s time zone.
    pub fn timeline<Tz>(
        &self,
        limiter: &CommitLimiter,
        now: &DateTime<Tz>,
    ) -> Result<Vec<TimelineEntry>, ReportError>
    where
        Tz: TimeZone + Sync,
        Tz::Offset: Sync,
    {
        let details = self.commit_export(limiter, now)?;
        Ok(bucketize(&details, &now.timezone()))
    }
}

/// Serializes a report as JSON.
pub fn to_json<T: Serialize + ?Sized>(report: &T, pretty: bool) -> Result<String, ReportError> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}
