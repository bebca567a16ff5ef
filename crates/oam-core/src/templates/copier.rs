//! Recursive template tree copying

use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Copy every file under `source` into `target`, preserving structure.
/// Returns the copied file paths relative to `target`, in walk order.
pub async fn copy_tree(source: &Path, target: &Path) -> Result<Vec<PathBuf>> {
    // Ensure target directory exists
    fs::create_dir_all(target)
        .await
        .map_err(|e| ScaffoldError::fs(target, e))?;

    let mut copied_files = Vec::new();

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            ScaffoldError::fs(path, e.into())
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| {
                ScaffoldError::config(format!(
                    "{} is outside of {}",
                    entry.path().display(),
                    source.display()
                ))
            })?
            .to_path_buf();
        let target_path = target.join(&relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .await
                .map_err(|e| ScaffoldError::fs(&target_path, e))?;
            continue;
        }

        // Ensure parent directories exist
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::fs(parent, e))?;
        }

        fs::copy(entry.path(), &target_path)
            .await
            .map_err(|e| ScaffoldError::fs(entry.path(), e))?;

        copied_files.push(relative);
    }

    tracing::debug!(
        files = copied_files.len(),
        "copied {} into {}",
        source.display(),
        target.display()
    );

    Ok(copied_files)
}
