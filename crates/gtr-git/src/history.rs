//! Commit history via `git log`.

use std::path::Path;

use chrono::{DateTime, Utc};
use gtr_core::{CommitHistory, CommitRef, SourceError};

use crate::{Git, GitError};

const FIELD_SEP: char = '\x1f';
const RECORD_SEP: char = '\x1e';
const LOG_FORMAT: &str = "--format=%H%x1f%aI%x1f%an%x1f%s%x1f%B%x1e";

/// Enumerates commits reachable from `HEAD`, newest first.
#[derive(Debug, Clone, Default)]
pub struct GitHistory {
    git: Git,
}

impl GitHistory {
    pub const fn new(git: Git) -> Self {
        Self { git }
    }

    fn log(&self, project: &Path) -> Result<Vec<CommitRef>, GitError> {
        let args = ["log", "--no-color", LOG_FORMAT];
        let output = self.git.output(project, &args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // A freshly initialised repository has no HEAD yet
            if stderr.contains("does not have any commits")
                || stderr.contains("bad default revision")
            {
                return Ok(Vec::new());
            }
            return Err(Git::failure(project, &args, &output));
        }
        parse_log(&String::from_utf8_lossy(&output.stdout))
    }
}

impl CommitHistory for GitHistory {
    fn enumerate(&self, project: &Path) -> Result<Vec<CommitRef>, SourceError> {
        Ok(self.log(project)?)
    }
}

/// Parses `git log` output produced with [`LOG_FORMAT`].
fn parse_log(text: &str) -> Result<Vec<CommitRef>, GitError> {
    // `str::trim` would also strip the separators, which count as whitespace
    text.split(RECORD_SEP)
        .map(|record| record.trim_matches(['\n', '\r']))
        .filter(|record| !record.is_empty())
        .map(parse_record)
        .collect()
}

fn parse_record(record: &str) -> Result<CommitRef, GitError> {
    let mut fields = record.splitn(5, FIELD_SEP);
    let (Some(id), Some(date), Some(author), Some(subject), Some(message)) = (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) else {
        return Err(GitError::Output(format!("truncated log record {record:?}")));
    };

    let timestamp = DateTime::parse_from_rfc3339(date)
        .map_err(|e| GitError::Output(format!("invalid commit date {date:?} for {id}: {e}")))?
        .with_timezone(&Utc);

    Ok(CommitRef {
        id: id.to_string(),
        timestamp,
        author: author.to_string(),
        subject: subject.to_string(),
        message: message.trim_end().to_string(),
    })
}
