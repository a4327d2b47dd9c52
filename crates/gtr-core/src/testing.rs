//! In-memory collaborators for unit tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};

use crate::error::SourceError;
use crate::note::{CommitNote, FileDetail, FileStatus};
use crate::source::{
    ActivityProbe, CommitHistory, CommitRef, NoteLookup, NoteStore, ProjectRegistry,
};

#[derive(Default)]
pub struct FakeRepos {
    pub projects: Vec<PathBuf>,
    pub registry_broken: bool,
    pub history: HashMap<PathBuf, Vec<CommitRef>>,
    pub broken_history: HashSet<PathBuf>,
    pub notes: HashMap<(PathBuf, String), CommitNote>,
    pub broken_notes: HashSet<(PathBuf, String)>,
    pub pending: HashMap<PathBuf, CommitNote>,
    pub snapshots_taken: AtomicUsize,
}

impl FakeRepos {
    pub fn add_project(&mut self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        self.projects.push(path.clone());
        self.history.entry(path.clone()).or_default();
        path
    }

    pub fn add_commit(&mut self, project: &Path, commit: CommitRef, note: Option<CommitNote>) {
        if let Some(note) = note {
            self.notes
                .insert((project.to_path_buf(), commit.id.clone()), note);
        }
        self.history
            .entry(project.to_path_buf())
            .or_default()
            .push(commit);
    }
}

impl ProjectRegistry for FakeRepos {
    fn list(&self, _tags: &[String], _include_untagged: bool) -> Result<Vec<PathBuf>, SourceError> {
        if self.registry_broken {
            return Err(SourceError::new("index is corrupt"));
        }
        Ok(self.projects.clone())
    }
}

impl CommitHistory for FakeRepos {
    fn enumerate(&self, project: &Path) -> Result<Vec<CommitRef>, SourceError> {
        if self.broken_history.contains(project) {
            return Err(SourceError::new("not a git repository"));
        }
        Ok(self.history.get(project).cloned().unwrap_or_default())
    }
}

impl NoteStore for FakeRepos {
    fn read(&self, project: &Path, commit_id: &str) -> Result<NoteLookup, SourceError> {
        let key = (project.to_path_buf(), commit_id.to_string());
        if self.broken_notes.contains(&key) {
            return Err(SourceError::new("bad object"));
        }
        Ok(self
            .notes
            .get(&key)
            .cloned()
            .map_or(NoteLookup::Absent, NoteLookup::Present))
    }
}

impl ActivityProbe for FakeRepos {
    fn snapshot(&self, project: &Path, read_only: bool) -> Result<CommitNote, SourceError> {
        assert!(read_only, "reports must only take read-only snapshots");
        self.snapshots_taken.fetch_add(1, Ordering::Relaxed);
        Ok(self.pending.get(project).cloned().unwrap_or_default())
    }
}

pub fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn commit(id: &str, at: DateTime<Utc>, subject: &str) -> CommitRef {
    CommitRef {
        id: id.to_string(),
        timestamp: at,
        author: "Dev Eloper".to_string(),
        subject: subject.to_string(),
        message: subject.to_string(),
    }
}

/// A note without timeline points.
pub fn note(files: &[(&str, i64)]) -> CommitNote {
    CommitNote {
        files: files
            .iter()
            .map(|&(file, seconds)| FileDetail {
                source_file: file.to_string(),
                time_spent: seconds,
                timeline: BTreeMap::new(),
                status: FileStatus::Modified,
            })
            .collect(),
    }
}

/// A single-file note whose time is fully described by timeline points.
pub fn timed_note(file: &str, points: &[(DateTime<Utc>, i64)]) -> CommitNote {
    CommitNote {
        files: vec![FileDetail {
            source_file: file.to_string(),
            time_spent: points.iter().map(|(_, s)| s).sum(),
            timeline: points.iter().map(|(at, s)| (at.timestamp(), *s)).collect(),
            status: FileStatus::Modified,
        }],
    }
}
