//! Applying a commit limiter to project histories.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use rayon::prelude::*;

use crate::cancel::CancelToken;
use crate::error::ReportError;
use crate::limiter::CommitLimiter;
use crate::source::{CommitHistory, CommitRef, ProjectCommits};

/// Selects the commits of one project that fall within `limiter`.
///
/// Filters by time window (resolved against `now`, compared in `now`'s time
/// zone), then by search term, orders newest first and truncates to the cap.
pub fn select_commits<Tz: TimeZone>(
    limiter: &CommitLimiter,
    history: &dyn CommitHistory,
    project: &Path,
    now: &DateTime<Tz>,
) -> Result<Vec<CommitRef>, ReportError> {
    let window = limiter.scope().window(now.naive_local());
    let tz = now.timezone();

    let commits = history
        .enumerate(project)
        .map_err(|source| ReportError::SelectionFailure {
            project: project.to_path_buf(),
            source,
        })?;
    let enumerated = commits.len();

    let mut selected: Vec<CommitRef> = commits
        .into_iter()
        .filter(|c| window.contains(c.timestamp.with_timezone(&tz).naive_local()))
        .filter(|c| limiter.matches_search(c))
        .collect();
    selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    if let Some(max) = limiter.max_count() {
        selected.truncate(max.get());
    }

    tracing::debug!(
        project = %project.display(),
        enumerated,
        selected = selected.len(),
        "selected commits"
    );
    Ok(selected)
}

/// Selects commits for many projects in parallel.
///
/// The result is ordered by project path regardless of completion order.
pub fn select_projects<Tz>(
    limiter: &CommitLimiter,
    history: &dyn CommitHistory,
    projects: &[PathBuf],
    now: &DateTime<Tz>,
    cancel: &CancelToken,
) -> Result<Vec<ProjectCommits>, ReportError>
where
    Tz: TimeZone + Sync,
    Tz::Offset: Sync,
{
    let mut selected = projects
        .par_iter()
        .map(|path| {
            cancel.check()?;
            let commits = select_commits(limiter, history, path, now)?;
            Ok(ProjectCommits {
                path: path.clone(),
                commits,
            })
        })
        .collect::<Result<Vec<_>, ReportError>>()?;
    selected.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(selected)
}
