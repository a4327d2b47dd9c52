//! Collaborator interfaces the engine reads from.
//!
//! Concrete implementations live outside this crate (see `gtr-git`); tests
//! use in-memory fakes. All traits are `Send + Sync` so per-project work can
//! fan out across threads.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::SourceError;
use crate::note::CommitNote;

/// One commit from a project's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRef {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub author: String,
    /// First line of the message.
    pub subject: String,
    /// Full message, subject and body.
    pub message: String,
}

/// Commits selected for one project, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCommits {
    pub path: PathBuf,
    pub commits: Vec<CommitRef>,
}

/// Outcome of looking up a commit's note.
///
/// Read failures are reported through the `Err` side of the surrounding
/// `Result`, never as `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteLookup {
    Present(CommitNote),
    Absent,
}

/// Lists tracked projects.
pub trait ProjectRegistry: Send + Sync {
    /// Returns project paths in a stable order.
    ///
    /// An empty `tags` slice selects every project. Otherwise a project is
    /// included when it carries one of `tags`, or when it has no tags at all
    /// and `include_untagged` is set.
    fn list(&self, tags: &[String], include_untagged: bool) -> Result<Vec<PathBuf>, SourceError>;
}

/// Enumerates a project's commit history, newest first.
pub trait CommitHistory: Send + Sync {
    fn enumerate(&self, project: &Path) -> Result<Vec<CommitRef>, SourceError>;
}

/// Reads the time note attached to a commit.
pub trait NoteStore: Send + Sync {
    fn read(&self, project: &Path, commit_id: &str) -> Result<NoteLookup, SourceError>;
}

/// Reads time accrued since the last commit.
pub trait ActivityProbe: Send + Sync {
    /// With `read_only` set, no persisted state may change.
    fn snapshot(&self, project: &Path, read_only: bool) -> Result<CommitNote, SourceError>;
}

/// Display name of a project: the final path segment.
pub fn project_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_name_is_last_segment() {
        assert_eq!(project_name(Path::new("/home/dev/repoA")), "repoA");
        assert_eq!(project_name(Path::new("/home/dev/repoA/")), "repoA");
        assert_eq!(project_name(Path::new("/")), "/");
    }
}
