use std::path::Path;
use std::process::Output;

use tracing::debug;

use crate::types::CommitRef;

use super::{GitRunner, Step, VcsError};

/// The three capabilities the task needs from version control.
pub trait VcsBackend {
    /// Stage every change matched by `pathspec`.
    ///
    /// # Errors
    /// Returns an error when staging fails, for example outside a repository.
    fn stage_all(&self, pathspec: &str) -> Result<(), VcsError>;

    /// Record the staged changes with `message`, dated `authored_date`.
    ///
    /// # Errors
    /// Returns an error when the commit cannot be created, including when nothing is staged.
    fn commit(&self, message: &str, authored_date: &str) -> Result<CommitRef, VcsError>;

    /// Push the current branch to its configured remote.
    ///
    /// # Errors
    /// Returns an error when the remote is missing, unreachable, or rejects the push.
    fn push(&self) -> Result<(), VcsError>;
}

/// Drives the `git` binary inside one working tree.
pub struct GitBackend<'a> {
    repo: &'a Path,
    git: &'a dyn GitRunner,
}

impl<'a> GitBackend<'a> {
    #[must_use]
    pub fn new(repo: &'a Path, git: &'a dyn GitRunner) -> Self {
        Self { repo, git }
    }

    fn run(&self, step: Step, args: &[&str], envs: &[(&str, &str)]) -> Result<Output, VcsError> {
        debug!(%step, ?args, repo = %self.repo.display(), "running git");
        let output = self
            .git
            .run_git(self.repo, args, envs)
            .map_err(|source| VcsError::Io { step, source })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(VcsError::Failed {
                step,
                code: output.status.code(),
                stderr,
            });
        }
        for line in String::from_utf8_lossy(&output.stdout).lines() {
            debug!(%step, "git: {line}");
        }
        Ok(output)
    }
}

impl VcsBackend for GitBackend<'_> {
    fn stage_all(&self, pathspec: &str) -> Result<(), VcsError> {
        self.run(Step::Stage, &["add", "--", pathspec], &[])
            .map(|_| ())
    }

    fn commit(&self, message: &str, authored_date: &str) -> Result<CommitRef, VcsError> {
        // --date only covers the author date; the committer date comes from the environment.
        self.run(
            Step::Commit,
            &["commit", "-m", message, "--date", authored_date],
            &[("GIT_COMMITTER_DATE", authored_date)],
        )?;
        let head = self.run(Step::Commit, &["rev-parse", "HEAD"], &[])?;
        let id = String::from_utf8_lossy(&head.stdout).trim().to_string();
        Ok(CommitRef { id })
    }

    fn push(&self) -> Result<(), VcsError> {
        self.run(Step::Push, &["push"], &[]).map(|_| ())
    }
}
