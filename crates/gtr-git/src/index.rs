//! The project index: which repositories are tracked.
//!
//! The index is a JSON object mapping each project path to the time it was
//! last used. Tags live in `<project>/.gtm/tags`, one per line.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use gtr_core::{ProjectRegistry, SourceError};

use crate::{GTM_DIR, GitError};

const TAGS_FILE: &str = "tags";

/// Project index stored as a JSON file.
#[derive(Debug, Clone)]
pub struct ProjectIndex {
    path: PathBuf,
}

impl ProjectIndex {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the index. A missing file is an empty index.
    fn load(&self) -> Result<BTreeMap<String, DateTime<Utc>>, GitError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no project index yet");
                return Ok(BTreeMap::new());
            }
            Err(source) => {
                return Err(GitError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|source| GitError::Index {
            path: self.path.clone(),
            source,
        })
    }
}

impl ProjectRegistry for ProjectIndex {
    fn list(&self, tags: &[String], include_untagged: bool) -> Result<Vec<PathBuf>, SourceError> {
        let projects = self.load()?;

        let selected = projects
            .into_keys()
            .map(PathBuf::from)
            .filter(|project| {
                if tags.is_empty() {
                    return true;
                }
                let project_tags = read_tags(project);
                if project_tags.is_empty() {
                    include_untagged
                } else {
                    project_tags.iter().any(|t| tags.contains(t))
                }
            })
            .collect();
        Ok(selected)
    }
}

/// Reads a project's tags. Unreadable tag files count as untagged.
fn read_tags(project: &Path) -> Vec<String> {
    let path = project.join(GTM_DIR).join(TAGS_FILE);
    match fs::read_to_string(&path) {
        Ok(text) => text
            .lines()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable tags file");
            Vec::new()
        }
    }
}
