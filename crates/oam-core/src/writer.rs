//! Writing rendered files to disk

use crate::component::ensure_contained;
use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// A rendered file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root
    pub path: PathBuf,
    pub contents: String,
}

/// Write `files` under `root`.
///
/// Every destination is checked before anything is written: if one already
/// exists the call fails with [`ScaffoldError::TargetExists`] and the disk is
/// left untouched. Returns the absolute paths written, in order.
pub async fn write_files(root: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    let mut targets = Vec::with_capacity(files.len());
    for file in files {
        ensure_contained(&file.path)?;
        let target = root.join(&file.path);
        let exists = fs::try_exists(&target)
            .await
            .map_err(|e| ScaffoldError::fs(&target, e))?;
        if exists {
            return Err(ScaffoldError::TargetExists(target));
        }
        targets.push(target);
    }

    for (file, target) in files.iter().zip(&targets) {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::fs(parent, e))?;
        }
        fs::write(target, &file.contents)
            .await
            .map_err(|e| ScaffoldError::fs(target, e))?;
        tracing::debug!(path = %target.display(), "wrote file");
    }

    Ok(targets)
}
