//! Time notes via `git notes show`.

use std::path::Path;

use gtr_core::{CommitNote, NoteLookup, NoteStore, SourceError};

use crate::{Git, GitError};

/// Notes ref the time-metric recorder writes to.
pub const DEFAULT_NOTES_REF: &str = "gtm-data";

/// Reads commit notes from a notes ref.
#[derive(Debug, Clone)]
pub struct GitNotes {
    git: Git,
    notes_ref: String,
}

impl Default for GitNotes {
    fn default() -> Self {
        Self::new(Git::default(), DEFAULT_NOTES_REF)
    }
}

impl GitNotes {
    pub fn new(git: Git, notes_ref: impl Into<String>) -> Self {
        Self {
            git,
            notes_ref: notes_ref.into(),
        }
    }

    fn show(&self, project: &Path, commit_id: &str) -> Result<NoteLookup, GitError> {
        let args = ["notes", "--ref", self.notes_ref.as_str(), "show", commit_id];
        let output = self.git.output(project, &args)?;
        if !output.status.success() {
            if is_missing_note(&String::from_utf8_lossy(&output.stderr)) {
                return Ok(NoteLookup::Absent);
            }
            return Err(Git::failure(project, &args, &output));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let note = CommitNote::parse(&text).map_err(|source| GitError::Note {
            commit: commit_id.to_string(),
            source,
        })?;
        Ok(NoteLookup::Present(note))
    }
}

impl NoteStore for GitNotes {
    fn read(&self, project: &Path, commit_id: &str) -> Result<NoteLookup, SourceError> {
        Ok(self.show(project, commit_id)?)
    }
}

/// git reports "error: no note found for object <id>." when a commit has no note.
fn is_missing_note(stderr: &str) -> bool {
    stderr.contains("no note found for object")
}
