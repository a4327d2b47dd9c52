//! Uncommitted activity from pending event files.
//!
//! The recorder drops one `<epoch>.event` file into `<project>/.gtm` per file
//! edit it observes; the file holds the edited path relative to the project.
//! Every minute with at least one event counts as 60 seconds of work, split
//! evenly across the distinct files edited in that minute.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use gtr_core::{ActivityProbe, CommitNote, FileDetail, FileStatus, SourceError};

use crate::{GTM_DIR, GitError};

const EVENT_EXT: &str = "event";
const SECONDS_PER_MINUTE: i64 = 60;

/// Reads pending `.event` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventProbe;

struct PendingEvent {
    path: PathBuf,
    epoch: i64,
    source_file: String,
}

impl EventProbe {
    fn pending(project: &Path) -> Result<Vec<PendingEvent>, GitError> {
        let dir = project.join(GTM_DIR);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(GitError::Io { path: dir, source }),
        };

        let mut events = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| GitError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EVENT_EXT) {
                continue;
            }
            let Some(epoch) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<i64>().ok())
            else {
                tracing::warn!(path = %path.display(), "skipping event file without epoch name");
                continue;
            };
            let source_file = fs::read_to_string(&path)
                .map_err(|source| GitError::Io {
                    path: path.clone(),
                    source,
                })?
                .trim()
                .to_string();
            if source_file.is_empty() {
                tracing::warn!(path = %path.display(), "skipping empty event file");
                continue;
            }
            events.push(PendingEvent {
                path,
                epoch,
                source_file,
            });
        }
        Ok(events)
    }

    fn read(project: &Path, read_only: bool) -> Result<CommitNote, GitError> {
        let events = Self::pending(project)?;
        let note = note_from_events(&events);

        if !read_only {
            for event in &events {
                fs::remove_file(&event.path).map_err(|source| GitError::Io {
                    path: event.path.clone(),
                    source,
                })?;
            }
        }

        tracing::debug!(
            project = %project.display(),
            events = events.len(),
            seconds = note.total(),
            read_only,
            "read pending activity"
        );
        Ok(note)
    }
}

impl ActivityProbe for EventProbe {
    fn snapshot(&self, project: &Path, read_only: bool) -> Result<CommitNote, SourceError> {
        Ok(Self::read(project, read_only)?)
    }
}

fn note_from_events(events: &[PendingEvent]) -> CommitNote {
    let mut minutes: BTreeMap<i64, BTreeSet<&str>> = BTreeMap::new();
    for event in events {
        let minute = event.epoch.div_euclid(SECONDS_PER_MINUTE) * SECONDS_PER_MINUTE;
        minutes
            .entry(minute)
            .or_default()
            .insert(event.source_file.as_str());
    }

    let mut files: BTreeMap<&str, FileDetail> = BTreeMap::new();
    for (minute, sources) in minutes {
        let count = i64::try_from(sources.len()).unwrap_or(i64::MAX);
        let share = SECONDS_PER_MINUTE / count;
        let mut remainder = SECONDS_PER_MINUTE % count;

        for source in sources {
            let seconds = share + std::mem::take(&mut remainder);
            let detail = files.entry(source).or_insert_with(|| FileDetail {
                source_file: source.to_string(),
                time_spent: 0,
                timeline: BTreeMap::new(),
                status: FileStatus::Modified,
            });
            detail.time_spent += seconds;
            *detail.timeline.entry(minute).or_insert(0) += seconds;
        }
    }

    CommitNote {
        files: files.into_values().collect(),
    }
}
