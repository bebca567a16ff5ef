//! Runtime settings resolved from the product config and the environment

use crate::guard::InstallGuard;
use crate::materialize::ProjectTemplate;
use crate::product::ProductConfig;
use crate::templates::{RemoteRepo, RootManifest};
use std::path::{Path, PathBuf};

/// Directory under the install root holding the bundled templates
pub const TEMPLATES_DIR: &str = "templates";

/// Install root shipped inside this crate's package
pub const BUNDLED_INSTALL_ROOT: &str = env!("CARGO_MANIFEST_DIR");

/// `templates/` inside [`BUNDLED_INSTALL_ROOT`]
pub const BUNDLED_TEMPLATES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

/// Default install root: a `templates/` directory next to the executable
/// (relocated installs), otherwise the templates packaged with this crate
pub fn default_install_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .and_then(|dir| install_root_at(&dir))
        .unwrap_or_else(|| PathBuf::from(BUNDLED_INSTALL_ROOT))
}

/// `dir` when it holds a templates root manifest
fn install_root_at(dir: &Path) -> Option<PathBuf> {
    dir.join(TEMPLATES_DIR)
        .join(RootManifest::FILE_NAME)
        .is_file()
        .then(|| dir.to_path_buf())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub install_root: PathBuf,
    /// When set, `create` clones this repository instead of offering the
    /// bundled templates
    pub template_repo: Option<RemoteRepo>,
}

impl Settings {
    /// Resolve settings, letting environment variables override the defaults
    pub fn from_config<C: ProductConfig>(config: &C) -> Self {
        Self::resolve(config, |key| std::env::var(key).ok())
    }

    fn resolve<C: ProductConfig>(config: &C, env: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let install_root = non_empty(config.install_root_env())
            .map(PathBuf::from)
            .unwrap_or_else(|| config.default_install_root());

        let template_repo = non_empty(config.template_repo_env())
            .or_else(|| config.default_template_repo().map(String::from))
            .map(RemoteRepo::new);

        Self {
            install_root,
            template_repo,
        }
    }

    /// Command-line repository and branch take precedence over the environment
    pub fn with_repo_override(mut self, url: Option<String>, branch: Option<String>) -> Self {
        if let Some(url) = url {
            self.template_repo = Some(RemoteRepo::new(url));
        }
        if let (Some(repo), Some(branch)) = (self.template_repo.as_mut(), branch) {
            repo.branch = Some(branch);
        }
        self
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.install_root.join(TEMPLATES_DIR)
    }

    pub fn guard(&self) -> InstallGuard {
        InstallGuard::new(&self.install_root)
    }

    /// The remote strategy, when a repository is configured. `None` means
    /// the user picks one of the bundled templates.
    pub fn remote_template(&self) -> Option<ProjectTemplate> {
        self.template_repo.clone().map(ProjectTemplate::RemoteGit)
    }

    pub fn uses_remote(&self) -> bool {
        self.template_repo.is_some()
    }
}
