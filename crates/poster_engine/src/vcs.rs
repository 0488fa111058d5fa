use std::path::{Path, PathBuf};
use std::process::Command;

use poster_logging::{poster_debug, poster_info};

use crate::VcsError;

/// The handful of git operations the marker commit needs.
pub trait Vcs {
    fn configure_identity(&self, email: &str, user: &str) -> Result<(), VcsError>;
    /// Porcelain status lines for `path`; empty when it is unchanged.
    fn status(&self, path: &Path) -> Result<String, VcsError>;
    fn add(&self, path: &Path) -> Result<(), VcsError>;
    fn commit(&self, message: &str) -> Result<(), VcsError>;
    fn push(&self) -> Result<(), VcsError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    NothingToCommit,
    Pushed,
}

/// Stage, commit and push the marker file. No changes is a no-op, not an error.
pub fn commit_marker(
    vcs: &dyn Vcs,
    marker_path: &Path,
    email: &str,
    user: &str,
    message: &str,
) -> Result<CommitOutcome, VcsError> {
    poster_info!("Configuring git credentials");
    vcs.configure_identity(email, user)?;

    poster_debug!("Checking for git changes");
    let status = vcs.status(marker_path)?;
    if status.trim().is_empty() {
        poster_info!("No changes to commit");
        return Ok(CommitOutcome::NothingToCommit);
    }

    poster_info!("Committing changes to {:?}", marker_path);
    vcs.add(marker_path)?;
    vcs.commit(message)?;

    poster_info!("Pushing changes to repository");
    vcs.push()?;

    poster_info!("Successfully pushed changes");
    Ok(CommitOutcome::Pushed)
}

/// Runs the `git` binary inside a working tree.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, VcsError> {
        let joined = args.join(" ");
        poster_debug!("git {}", joined);
        let out = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|err| VcsError::Spawn {
                args: joined.clone(),
                message: err.to_string(),
            })?;

        if !out.status.success() {
            return Err(VcsError::Command {
                args: joined,
                code: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }

    fn path_arg(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }
}

impl Vcs for GitCli {
    fn configure_identity(&self, email: &str, user: &str) -> Result<(), VcsError> {
        self.run(&["config", "user.email", email])?;
        self.run(&["config", "user.name", user])?;
        Ok(())
    }

    fn status(&self, path: &Path) -> Result<String, VcsError> {
        let path = Self::path_arg(path);
        self.run(&["status", "--porcelain", "--", path.as_str()])
    }

    fn add(&self, path: &Path) -> Result<(), VcsError> {
        let path = Self::path_arg(path);
        self.run(&["add", "--", path.as_str()]).map(|_| ())
    }

    fn commit(&self, message: &str) -> Result<(), VcsError> {
        self.run(&["commit", "-m", message]).map(|_| ())
    }

    fn push(&self) -> Result<(), VcsError> {
        self.run(&["push"]).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn git_cli_sees_and_commits_marker_change() {
        if !git_available() {
            return;
        }
        let temp = tempfile::TempDir::new().unwrap();
        let git = GitCli::new(temp.path());
        git.run(&["init", "--quiet"]).unwrap();
        git.run(&["config", "commit.gpgsign", "false"]).unwrap();
        git.configure_identity("bot@example.com", "Bot").unwrap();

        let marker = temp.path().join(".lastPost.txt");
        assert!(git.status(&marker).unwrap().trim().is_empty());

        std::fs::write(&marker, "https://x/posts/a/").unwrap();
        assert!(git.status(&marker).unwrap().contains(".lastPost.txt"));

        git.add(&marker).unwrap();
        git.commit("Update Last Post File").unwrap();
        assert!(git.status(&marker).unwrap().trim().is_empty());
    }

    #[test]
    fn failing_git_command_reports_stderr() {
        if !git_available() {
            return;
        }
        let temp = tempfile::TempDir::new().unwrap();
        let err = GitCli::new(temp.path()).push().unwrap_err();
        assert!(matches!(err, VcsError::Command { .. }));
    }
}
