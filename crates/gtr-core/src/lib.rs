//! Commit-scoped query and aggregation engine for git time reports.
//!
//! This crate contains the pure query layer:
//! - Commit limiting: validating count caps, date ranges, named periods and search
//! - Commit selection: filtering a project's history with a limiter
//! - Note aggregation: flattening per-commit time notes across projects
//! - Timeline bucketing: per-day, per-hour breakdowns
//! - Report builders: project list, totals, status, export, timeline
//!
//! Git access, the project index and pending-activity files are reached only
//! through the traits in [`source`].

mod aggregate;
mod cancel;
mod error;
mod limiter;
pub mod note;
pub mod period;
mod report;
mod select;
pub mod source;
mod timeline;

#[cfg(test)]
mod testing;

pub use aggregate::{CommitNoteDetail, aggregate};
pub use cancel::CancelToken;
pub use error::{BoxError, ReportError, SourceError};
pub use limiter::{CommitLimiter, LimiterParams, TimeScope};
pub use note::{CommitNote, FileDetail, FileStatus, NoteParseError};
pub use period::{Period, Window};
pub use report::{
    DurationFormatter, ProjectTotal, ProjectTotals, Reporter, format_duration, to_json,
};
pub use select::{select_commits, select_projects};
pub use source::{
    ActivityProbe, CommitHistory, CommitRef, NoteLookup, NoteStore, ProjectCommits,
    ProjectRegistry, project_name,
};
pub use timeline::{HOURS_PER_DAY, TimelineEntry, bucketize};
