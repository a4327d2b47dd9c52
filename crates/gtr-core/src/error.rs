//! Error types for report queries.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed error carried by collaborator failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure reported by a collaborator (registry, commit history, note store, probe).
///
/// Displays as the underlying error.
#[derive(Debug)]
pub struct SourceError(BoxError);

impl SourceError {
    /// Creates an error from a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }

    /// Wraps an underlying error.
    pub fn from_error(err: impl Into<BoxError>) -> Self {
        Self(err.into())
    }

    /// The wrapped error.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

/// Errors surfaced by report queries.
#[derive(Debug, Error)]
pub enum ReportError {
    /// More than one time scope was requested.
    #[error("conflicting commit scope: {0}")]
    InvalidScope(String),

    /// A date bound could not be parsed, or the range is inverted.
    #[error("invalid date {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },

    /// The project registry could not be loaded.
    #[error("project registry unavailable")]
    RegistryUnavailable(#[source] SourceError),

    /// Commit enumeration failed for a project.
    #[error("failed to list commits for {}", .project.display())]
    SelectionFailure {
        project: PathBuf,
        #[source]
        source: SourceError,
    },

    /// A note exists (or might) but could not be read or parsed.
    #[error("failed to read note for commit {commit} in {}", .project.display())]
    NoteReadFailure {
        project: PathBuf,
        commit: String,
        #[source]
        source: SourceError,
    },

    /// Uncommitted activity could not be read for a project.
    #[error("failed to read uncommitted activity in {}", .project.display())]
    ProbeFailure {
        project: PathBuf,
        #[source]
        source: SourceError,
    },

    /// The report could not be encoded.
    #[error("failed to serialize report: {0}")]
    SerializationFailure(#[from] serde_json::Error),

    /// The query was cancelled or ran past its deadline.
    #[error("query cancelled")]
    Cancelled,
}
