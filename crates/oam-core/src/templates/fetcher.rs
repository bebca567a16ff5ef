//! Remote template retrieval
//!
//! Remote templates are git repositories. They are cloned into a uniquely
//! named temporary directory that lives exactly as long as the returned
//! [`ClonedTemplate`]; dropping it (on success or on any error path)
//! removes the clone.

use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::Command;
use tokio::time::timeout;

/// Default limit for a single clone (5 minutes)
pub const DEFAULT_CLONE_TIMEOUT: Duration = Duration::from_secs(300);

const TEMP_PREFIX: &str = "oam-template-";

/// A remote git repository used as a project template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    pub url: String,
    pub branch: Option<String>,
}

impl RemoteRepo {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            branch: None,
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

/// Something that can materialize a remote repository on disk
#[async_trait]
pub trait RepoCloner: Send + Sync {
    /// Clone `repo` into `dest`. `dest` does not exist yet; its parent does.
    async fn clone_into(&self, repo: &RemoteRepo, dest: &Path) -> Result<()>;
}

/// [`RepoCloner`] backed by the `git` binary
#[derive(Debug, Clone)]
pub struct GitCloner {
    timeout: Duration,
}

impl GitCloner {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_CLONE_TIMEOUT,
        }
    }

    fn fetch_error(repo: &RemoteRepo, reason: impl Into<String>) -> ScaffoldError {
        ScaffoldError::Fetch {
            url: repo.url.clone(),
            reason: reason.into(),
        }
    }
}

impl Default for GitCloner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepoCloner for GitCloner {
    async fn clone_into(&self, repo: &RemoteRepo, dest: &Path) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.args(["clone", "--depth", "1"]);
        if let Some(branch) = &repo.branch {
            cmd.arg("--branch").arg(branch);
        }
        cmd.arg(&repo.url)
            .arg(dest)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::info!(url = %repo.url, branch = ?repo.branch, "cloning template repository");

        // Dropping the future on timeout kills the child
        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Self::fetch_error(repo, "git is not installed or not on PATH"));
            }
            Ok(Err(e)) => return Err(Self::fetch_error(repo, e.to_string())),
            Err(_) => {
                return Err(Self::fetch_error(
                    repo,
                    format!("git clone timed out after {} seconds", self.timeout.as_secs()),
                ));
            }
        };

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .map(|l| l.trim().to_string())
                .unwrap_or_else(|| {
                    format!("git exited with code {}", output.status.code().unwrap_or(-1))
                });
            Err(Self::fetch_error(repo, reason))
        }
    }
}

/// A cloned repository inside a scoped temporary directory
#[derive(Debug)]
pub struct ClonedTemplate {
    // Held for its Drop: removes the clone
    dir: TempDir,
    root: PathBuf,
}

impl ClonedTemplate {
    /// Root of the cloned tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Temporary directory that owns the clone
    pub fn temp_dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Clone `repo` into a fresh temporary directory
pub async fn fetch_remote<C: RepoCloner + ?Sized>(
    cloner: &C,
    repo: &RemoteRepo,
) -> Result<ClonedTemplate> {
    let dir = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempdir()
        .map_err(|e| ScaffoldError::fs(std::env::temp_dir(), e))?;
    let root = dir.path().join("source");

    tracing::debug!(temp_dir = %dir.path().display(), "created temporary clone directory");

    // On error `dir` is dropped here and the partial clone goes with it
    cloner.clone_into(repo, &root).await?;

    Ok(ClonedTemplate { dir, root })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingCloner {
        fail: bool,
        seen: Mutex<Option<PathBuf>>,
    }

    #[async_trait]
    impl RepoCloner for RecordingCloner {
        async fn clone_into(&self, repo: &RemoteRepo, dest: &Path) -> Result<()> {
            *self.seen.lock().unwrap() = Some(dest.to_path_buf());
            std::fs::create_dir_all(dest).unwrap();
            std::fs::write(dest.join("partial.txt"), "x").unwrap();
            if self.fail {
                Err(ScaffoldError::Fetch {
                    url: repo.url.clone(),
                    reason: "boom".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_clone_removed_on_drop() {
        let cloner = RecordingCloner {
            fail: false,
            seen: Mutex::new(None),
        };
        let cloned = fetch_remote(&cloner, &RemoteRepo::new("https://example.com/t.git"))
            .await
            .unwrap();

        let temp = cloned.temp_dir().to_path_buf();
        assert!(cloned.root().join("partial.txt").is_file());
        assert!(temp
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(TEMP_PREFIX));

        drop(cloned);
        assert!(!temp.exists());
    }

    #[tokio::test]
    async fn test_clone_removed_on_failure() {
        let cloner = RecordingCloner {
            fail: true,
            seen: Mutex::new(None),
        };
        let err = fetch_remote(&cloner, &RemoteRepo::new("https://example.com/t.git"))
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Fetch { .. }));
        let dest = cloner.seen.lock().unwrap().clone().unwrap();
        assert!(!dest.exists());
        assert!(!dest.parent().unwrap().exists());
    }

    #[test]
    fn test_remote_repo_builder() {
        let repo = RemoteRepo::new("git@example.com:team/tpl.git").with_branch("main");
        assert_eq!(repo.branch.as_deref(), Some("main"));
    }
}
