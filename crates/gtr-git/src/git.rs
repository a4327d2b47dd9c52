//! Running the git command line.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::GitError;

/// Handle to a git executable.
#[derive(Debug, Clone)]
pub struct Git {
    binary: PathBuf,
}

impl Default for Git {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Git {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Runs `git -C <project> <args>` and returns its raw output.
    ///
    /// Non-zero exit is not an error here; callers interpret it. Messages are
    /// forced to the untranslated C locale, since callers match on stderr.
    pub(crate) fn output(&self, project: &Path, args: &[&str]) -> Result<Output, GitError> {
        tracing::trace!(project = %project.display(), ?args, "running git");
        Command::new(&self.binary)
            .arg("-C")
            .arg(project)
            .args(args)
            .stdin(Stdio::null())
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C")
            .env_remove("LANGUAGE")
            .output()
            .map_err(|source| GitError::Spawn {
                binary: self.binary.clone(),
                source,
            })
    }

    /// Builds the error for a failed invocation.
    pub(crate) fn failure(project: &Path, args: &[&str], output: &Output) -> GitError {
        GitError::Command {
            command: args.join(" "),
            project: project.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}
