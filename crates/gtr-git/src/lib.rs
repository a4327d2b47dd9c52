//! Read-only data sources for gtr backed by git and the time-metric files.
//!
//! Implements the collaborator traits from `gtr-core`:
//! - [`ProjectIndex`]: tracked projects from the JSON project index
//! - [`GitHistory`]: commit history via `git log`
//! - [`GitNotes`]: time notes via `git notes show`
//! - [`EventProbe`]: uncommitted activity from pending `.gtm/*.event` files
//!
//! # Thread Safety
//!
//! Every source is immutable after construction and spawns a fresh `git`
//! process per call, so they can be shared across the report fan-out.

mod events;
mod git;
mod history;
mod index;
mod notes;

use std::path::PathBuf;

use thiserror::Error;

pub use events::EventProbe;
pub use git::Git;
pub use history::GitHistory;
pub use index::ProjectIndex;
pub use notes::{DEFAULT_NOTES_REF, GitNotes};

/// Name of the per-project metadata directory.
pub const GTM_DIR: &str = ".gtm";

/// Errors from git and time-metric file access.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be started.
    #[error("failed to run {}: {source}", .binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// git exited unsuccessfully.
    #[error("`git {command}` failed in {}: {stderr}", .project.display())]
    Command {
        command: String,
        project: PathBuf,
        stderr: String,
    },
    /// git produced output we could not understand.
    #[error("unexpected git output: {0}")]
    Output(String),
    /// A file could not be read or removed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The project index is not valid JSON.
    #[error("invalid project index {}: {source}", .path.display())]
    Index {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A commit note could not be parsed.
    #[error("invalid note for commit {commit}: {source}")]
    Note {
        commit: String,
        #[source]
        source: gtr_core::NoteParseError,
    },
}

impl From<GitError> for gtr_core::SourceError {
    fn from(err: GitError) -> Self {
        Self::from_error(err)
    }
}
