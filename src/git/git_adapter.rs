//! Adapter layer between the VcsAdapter trait and the git command line.
//!
//! Every operation is a single `git` invocation run through
//! `tokio::process::Command` in the repository's top-level directory.

use crate::error::{GitError, Result};
use crate::git::porcelain::parse_status;
use crate::git::{CommitInfo, RemoteInfo, VcsAdapter, WorkingTreeStatus};
use std::path::{Path, PathBuf};
use std::process::Output;

/// Separates hash from message within one log record
const FIELD_SEP: char = '\u{1f}';
/// Terminates one log record
const RECORD_SEP: char = '\u{1e}';
/// `--format` producing `<hash>\x1f<raw body>\x1e`
const LOG_FORMAT: &str = "--format=%H%x1f%B%x1e";

/// Git operations using the git CLI backend
#[derive(Debug, Clone)]
pub struct GitCliOperations {
    git: PathBuf,
    work_dir: PathBuf,
}

impl GitCliOperations {
    /// Open the working tree containing `path`
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let git = which::which("git").map_err(|_| GitError::GitNotFound)?;

        let output = tokio::process::Command::new(&git)
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(path)
            .output()
            .await
            .map_err(|_| GitError::NotRepository {
                path: path.to_path_buf(),
            })?;

        if !output.status.success() {
            return Err(GitError::NotRepository {
                path: path.to_path_buf(),
            }
            .into());
        }

        let work_dir = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        log::debug!("Opened git repository at {}", work_dir.display());

        Ok(Self { git, work_dir })
    }

    /// Run git and return the raw process output, whatever the exit status
    async fn output(&self, args: &[&str]) -> Result<Output> {
        log::debug!("git {}", args.join(" "));

        tokio::process::Command::new(&self.git)
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .await
            .map_err(|e| {
                GitError::CommandFailed {
                    command: args.join(" "),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// Run git, failing on a non-zero exit, and return stdout
    async fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args).await?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VcsAdapter for GitCliOperations {
    async fn get_remotes(&self) -> Result<Vec<RemoteInfo>> {
        let stdout = self.run(&["remote", "-v"]).await?;
        Ok(parse_remotes(&stdout))
    }

    async fn current_branch(&self) -> Result<Option<String>> {
        // Full ref name; `--short` turns into `heads/<name>` when a tag shares the name
        let args = ["symbolic-ref", "--quiet", "HEAD"];
        let output = self.output(&args).await?;

        match output.status.code() {
            Some(0) => {
                let full = String::from_utf8_lossy(&output.stdout);
                Ok(full
                    .trim()
                    .strip_prefix("refs/heads/")
                    .filter(|name| !name.is_empty())
                    .map(str::to_string))
            }
            // Detached HEAD
            Some(1) => Ok(None),
            _ => Err(GitError::CommandFailed {
                command: args.join(" "),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into()),
        }
    }

    async fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["fetch", remote, branch]).await?;
        Ok(())
    }

    async fn recent_commits(&self, max_count: usize) -> Result<Vec<CommitInfo>> {
        self.ref_commits("HEAD", max_count).await
    }

    async fn ref_commits(&self, reference: &str, max_count: usize) -> Result<Vec<CommitInfo>> {
        // Unborn HEAD or a missing remote ref both mean "no commits"
        let peeled = format!("{}^{{commit}}", reference);
        let verify = self
            .output(&["rev-parse", "--verify", "--quiet", &peeled])
            .await?;
        if !verify.status.success() {
            log::debug!("Reference '{}' does not resolve to a commit", reference);
            return Ok(Vec::new());
        }

        let max_count = format!("--max-count={}", max_count);
        let stdout = self
            .run(&["log", &max_count, LOG_FORMAT, reference, "--"])
            .await?;
        parse_log(&stdout)
    }

    async fn status(&self) -> Result<WorkingTreeStatus> {
        let stdout = self.run(&["status", "--porcelain=v1", "-z"]).await?;
        parse_status(&stdout)
    }

    async fn reset_to_commit(&self, revision: &str) -> Result<()> {
        self.run(&["reset", "--hard", revision]).await?;
        Ok(())
    }

    async fn reset_working_tree(&self) -> Result<()> {
        self.run(&["reset", "--hard"]).await?;
        Ok(())
    }
}

/// Parse `git remote -v`, keeping the order in which remotes first appear
fn parse_remotes(stdout: &str) -> Vec<RemoteInfo> {
    let mut remotes: Vec<RemoteInfo> = Vec::new();

    for line in stdout.lines() {
        let mut parts = line.split_whitespace();
        let (Some(name), Some(url), Some(kind @ ("(fetch)" | "(push)"))) =
            (parts.next(), parts.next(), parts.next())
        else {
            log::debug!("Skipping unrecognized remote line '{}'", line);
            continue;
        };

        let index = match remotes.iter().position(|r| r.name == name) {
            Some(index) => index,
            None => {
                remotes.push(RemoteInfo {
                    name: name.to_string(),
                    fetch_url: String::new(),
                    push_url: String::new(),
                });
                remotes.len() - 1
            }
        };

        if kind == "(push)" {
            remotes[index].push_url = url.to_string();
        } else {
            remotes[index].fetch_url = url.to_string();
        }
    }

    remotes
}

/// Parse log output produced with [`LOG_FORMAT`]
fn parse_log(stdout: &str) -> Result<Vec<CommitInfo>> {
    stdout
        .split(RECORD_SEP)
        .map(str::trim_start)
        .filter(|record| !record.is_empty())
        .map(|record| -> Result<CommitInfo> {
            let (hash, message) =
                record
                    .split_once(FIELD_SEP)
                    .ok_or_else(|| GitError::Parse {
                        reason: format!("log record without separator: '{}'", record),
                    })?;
            Ok(CommitInfo::new(hash.trim(), message.trim_end()))
        })
        .collect()
}
