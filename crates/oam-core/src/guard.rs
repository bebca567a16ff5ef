//! Refuse to generate files inside the tool's own install directory

use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct InstallGuard {
    install_root: PathBuf,
}

impl InstallGuard {
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
        }
    }

    /// True when `cwd` is the install root itself. Paths are canonicalized
    /// when they exist so symlinks and `..` segments compare equal.
    pub fn is_install_root(&self, cwd: &Path) -> bool {
        normalize(cwd) == normalize(&self.install_root)
    }

    pub fn check(&self, cwd: &Path) -> Result<()> {
        if self.is_install_root(cwd) {
            tracing::debug!(cwd = %cwd.display(), "refusing to run inside install root");
            return Err(ScaffoldError::GuardViolation(cwd.to_path_buf()));
        }
        Ok(())
    }
}

fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
