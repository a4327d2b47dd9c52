//! Flattening per-commit notes across projects.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;

use crate::cancel::CancelToken;
use crate::error::ReportError;
use crate::note::CommitNote;
use crate::source::{NoteLookup, NoteStore, ProjectCommits, project_name};

/// One exported row: a commit and its time note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitNoteDetail {
    /// Project display name.
    pub project: String,
    pub commit: String,
    pub author: String,
    pub subject: String,
    pub date: DateTime<Utc>,
    pub note: CommitNote,
}

/// Reads the note of every selected commit.
///
/// Projects are processed in parallel and emitted in ascending path order;
/// commits keep their selection order. Commits without a note are skipped.
/// Any read failure aborts the whole aggregation.
pub fn aggregate(
    store: &dyn NoteStore,
    projects: &[ProjectCommits],
    cancel: &CancelToken,
) -> Result<Vec<CommitNoteDetail>, ReportError> {
    let mut ordered: Vec<&ProjectCommits> = projects.iter().collect();
    ordered.sort_by(|a, b| a.path.cmp(&b.path));

    let per_project = ordered
        .par_iter()
        .map(|project| project_details(store, project, cancel))
        .collect::<Result<Vec<_>, ReportError>>()?;

    Ok(per_project.into_iter().flatten().collect())
}

fn project_details(
    store: &dyn NoteStore,
    project: &ProjectCommits,
    cancel: &CancelToken,
) -> Result<Vec<CommitNoteDetail>, ReportError> {
    let name = project_name(&project.path);
    let mut details = Vec::with_capacity(project.commits.len());

    for commit in &project.commits {
        cancel.check()?;
        match store.read(&project.path, &commit.id) {
            Ok(NoteLookup::Present(note)) => details.push(CommitNoteDetail {
                project: name.clone(),
                commit: commit.id.clone(),
                author: commit.author.clone(),
                subject: commit.subject.clone(),
                date: commit.timestamp,
                note,
            }),
            Ok(NoteLookup::Absent) => {
                tracing::debug!(project = %name, commit = %commit.id, "no time note");
            }
            Err(source) => {
                return Err(ReportError::NoteReadFailure {
                    project: project.path.clone(),
                    commit: commit.id.clone(),
                    source,
                });
            }
        }
    }

    tracing::debug!(
        project = %name,
        commits = project.commits.len(),
        with_notes = details.len(),
        "aggregated notes"
    );
    Ok(details)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::testing::{FakeRepos, commit, note, ts};

    fn fixture() -> (FakeRepos, Vec<ProjectCommits>) {
        let mut repos = FakeRepos::default();
        let a = repos.add_project("/src/repoA");
        let b = repos.add_project("/src/repoB");

        let a1 = commit("a1", ts(2024, 3, 12, 9, 0), "first");
        let a2 = commit("a2", ts(2024, 3, 13, 9, 0), "untracked");
        let a3 = commit("a3", ts(2024, 3, 14, 9, 0), "third");
        let b1 = commit("b1", ts(2024, 3, 11, 9, 0), "other");
        repos.add_commit(&a, a1.clone(), Some(note(&[("x.rs", 600)])));
        repos.add_commit(&a, a2.clone(), None);
        repos.add_commit(&a, a3.clone(), Some(note(&[("y.rs", 1200)])));
        repos.add_commit(&b, b1.clone(), Some(note(&[("z.rs", 60)])));

        // Deliberately not sorted by path
        let selection = vec![
            ProjectCommits {
                path: b,
                commits: vec![b1],
            },
            ProjectCommits {
                path: a,
                commits: vec![a3, a2, a1],
            },
        ];
        (repos, selection)
    }

    #[test]
    fn absent_notes_are_skipped() {
        let (repos, selection) = fixture();
        let details = aggregate(&repos, &selection, &CancelToken::new()).unwrap();

        let rows: Vec<_> = details
            .iter()
            .map(|d| (d.project.as_str(), d.commit.as_str(), d.note.total()))
            .collect();
        assert_eq!(
            rows,
            [("repoA", "a3", 1200), ("repoA", "a1", 600), ("repoB", "b1", 60)]
        );
    }

    #[test]
    fn read_error_aborts_everything() {
        let (mut repos, selection) = fixture();
        repos
            .broken_notes
            .insert((PathBuf::from("/src/repoB"), "b1".to_string()));

        let err = aggregate(&repos, &selection, &CancelToken::new()).unwrap_err();
        match err {
            ReportError::NoteReadFailure {
                project, commit, ..
            } => {
                assert_eq!(project, PathBuf::from("/src/repoB"));
                assert_eq!(commit, "b1");
            }
            other => panic!("expected NoteReadFailure, got {other:?}"),
        }
    }

    #[test]
    fn aggregation_is_repeatable() {
        let (repos, selection) = fixture();
        let render = || {
            let rows = aggregate(&repos, &selection, &CancelToken::new()).unwrap();
            serde_json::to_string(&rows).unwrap()
        };
        let (first, second) = (render(), render());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_selection_is_empty_output() {
        let repos = FakeRepos::default();
        assert!(aggregate(&repos, &[], &CancelToken::new()).unwrap().is_empty());
    }

    #[test]
    fn cancelled_aggregation_returns_nothing() {
        let (repos, selection) = fixture();
        let cancel = CancelToken::new();
        cancel.cancel();
        assert!(matches!(
            aggregate(&repos, &selection, &cancel),
            Err(ReportError::Cancelled)
        ));
    }

    #[test]
    fn detail_serializes_as_flat_row() {
        let (repos, selection) = fixture();
        let details = aggregate(&repos, &selection[..1], &CancelToken::new()).unwrap();
        insta::assert_snapshot!(serde_json::to_string_pretty(&details[0]).unwrap(), @r#"
        {
          "project": "repoB",
          "commit": "b1",
          "author": "Dev Eloper",
          "subject": "other",
          "date": "2024-03-11T09:00:00Z",
          "note": {
            "files": [
              {
                "source_file": "z.rs",
                "time_spent": 60,
                "timeline": {},
                "status": "modified"
              }
            ]
          }
        }
        "#);
    }
}
