//! Product configuration trait for the CLI binary
//!
//! The binary implements this trait to describe itself: its identity, where
//! it is installed, where remote templates live and what to tell the user
//! after a project has been created.

use crate::runtime::PackageManager;
use std::path::{Path, PathBuf};

pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the command and env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Environment variable overriding the install root
    fn install_root_env(&self) -> &'static str;

    /// Directory the tool ships from; contains `templates/`
    fn default_install_root(&self) -> PathBuf;

    /// Environment variable naming a remote template repository
    fn template_repo_env(&self) -> &'static str;

    /// Fixed remote template repository. `None` selects the bundled templates.
    fn default_template_repo(&self) -> Option<&'static str> {
        None
    }

    /// Description offered when the user does not type one
    fn default_description(&self) -> &'static str {
        "A new frontend project"
    }

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, project_dir: &Path, package_manager: PackageManager) -> Vec<String>;
}
