//! Project materialization
//!
//! Copies a project template into a new directory and personalizes it:
//! `package.json` gets its `name`, `description` and `author` replaced
//! structurally, and `README.md` is rendered with the project placeholders.
//!
//! A target that already exists is rejected before anything is written.
//! Once the target has been created, later failures leave it in place for
//! inspection; nothing is rolled back. The temporary clone of a remote
//! template is always removed.

use crate::component::ensure_contained;
use crate::error::{Result, ScaffoldError};
use crate::render::{self, RenderContext};
use crate::templates::{copier, fetcher, GitCloner, RemoteRepo, RepoCloner, RootManifest};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const PACKAGE_DESCRIPTOR: &str = "package.json";
pub const README: &str = "README.md";
pub const VCS_DIR: &str = ".git";

/// Where the project tree comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectTemplate {
    /// A directory under the bundled templates root
    LocalBundled(String),
    /// A git repository cloned for the duration of one materialization
    RemoteGit(RemoteRepo),
}

impl ProjectTemplate {
    pub fn label(&self) -> &str {
        match self {
            ProjectTemplate::LocalBundled(id) => id,
            ProjectTemplate::RemoteGit(repo) => &repo.url,
        }
    }
}

/// Answers that personalize a new project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAnswers {
    pub project_name: String,
    pub description: String,
    pub author: Option<String>,
}

impl ProjectAnswers {
    pub fn new(project_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            description: description.into(),
            author: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        self.author = if author.trim().is_empty() {
            None
        } else {
            Some(author)
        };
        self
    }

    fn render_context(&self) -> RenderContext {
        let context = RenderContext::new()
            .with("projectName", self.project_name.as_str())
            .with("description", self.description.as_str());
        match &self.author {
            Some(author) => context.with("author", author.as_str()),
            None => context,
        }
    }
}

/// Validate a project name used as a directory and package name
pub fn validate_project_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ScaffoldError::config("project name is required"));
    }
    if trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
        return Err(ScaffoldError::config(format!(
            "project name '{}' must be a single directory name",
            name
        )));
    }
    Ok(())
}

/// Outcome of a successful materialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    pub target_dir: PathBuf,
    /// Files in the new project, relative to `target_dir`
    pub files: Vec<PathBuf>,
    pub package_patched: bool,
    pub readme_rendered: bool,
}

/// Creates projects from bundled or remote templates
#[derive(Debug, Clone)]
pub struct Materializer<C = GitCloner> {
    templates_root: PathBuf,
    cloner: C,
}

impl Materializer<GitCloner> {
    pub fn with_git(templates_root: impl Into<PathBuf>) -> Self {
        Self::new(templates_root, GitCloner::new())
    }
}

impl<C: RepoCloner> Materializer<C> {
    pub fn new(templates_root: impl Into<PathBuf>, cloner: C) -> Self {
        Self {
            templates_root: templates_root.into(),
            cloner,
        }
    }

    pub async fn materialize(
        &self,
        template: &ProjectTemplate,
        target_dir: &Path,
        answers: &ProjectAnswers,
    ) -> Result<MaterializeReport> {
        validate_project_name(&answers.project_name)?;

        let exists = fs::try_exists(target_dir)
            .await
            .map_err(|e| ScaffoldError::fs(target_dir, e))?;
        if exists {
            return Err(ScaffoldError::TargetExists(target_dir.to_path_buf()));
        }

        tracing::info!(
            template = template.label(),
            target = %target_dir.display(),
            "materializing project"
        );

        match template {
            ProjectTemplate::LocalBundled(id) => {
                let source = self.bundled_source(id).await?;
                self.populate(&source, target_dir, answers, false).await
            }
            ProjectTemplate::RemoteGit(repo) => {
                // The clone is removed when `cloned` drops, whichever way populate ends
                let cloned = fetcher::fetch_remote(&self.cloner, repo).await?;
                self.populate(cloned.root(), target_dir, answers, true).await
            }
        }
    }

    /// Directory of a template listed in the root manifest
    async fn bundled_source(&self, id: &str) -> Result<PathBuf> {
        let manifest = RootManifest::load(&self.templates_root).await?;
        let Some(entry) = manifest.find(id) else {
            return Err(ScaffoldError::config(format!(
                "unknown template '{}' (available: {})",
                id,
                manifest.ids().join(", ")
            )));
        };

        let id_path = Path::new(&entry.id);
        ensure_contained(id_path)?;
        if id_path.components().count() != 1 {
            return Err(ScaffoldError::config(format!(
                "template id '{}' is not a directory name",
                entry.id
            )));
        }

        let source = self.templates_root.join(id_path);
        match fs::metadata(&source).await {
            Ok(meta) if meta.is_dir() => Ok(source),
            _ => Err(ScaffoldError::config(format!(
                "template '{}' is listed but {} is missing",
                entry.id,
                source.display()
            ))),
        }
    }

    async fn populate(
        &self,
        source: &Path,
        target_dir: &Path,
        answers: &ProjectAnswers,
        strip_vcs: bool,
    ) -> Result<MaterializeReport> {
        let mut files = copier::copy_tree(source, target_dir).await?;

        if strip_vcs {
            remove_vcs_metadata(target_dir).await?;
            files.retain(|f| !f.starts_with(VCS_DIR));
        }

        let package_patched =
            patch_package_descriptor(&target_dir.join(PACKAGE_DESCRIPTOR), answers).await?;
        let readme_rendered = render_readme(&target_dir.join(README), answers).await?;

        Ok(MaterializeReport {
            target_dir: target_dir.to_path_buf(),
            files,
            package_patched,
            readme_rendered,
        })
    }
}

async fn remove_vcs_metadata(target_dir: &Path) -> Result<()> {
    let vcs = target_dir.join(VCS_DIR);
    if fs::try_exists(&vcs)
        .await
        .map_err(|e| ScaffoldError::fs(&vcs, e))?
    {
        fs::remove_dir_all(&vcs)
            .await
            .map_err(|e| ScaffoldError::fs(&vcs, e))?;
        tracing::debug!(path = %vcs.display(), "removed version control metadata");
    }
    Ok(())
}

/// Read, update the known fields of, and rewrite `package.json`.
/// Returns `false` when the file does not exist.
async fn patch_package_descriptor(path: &Path, answers: &ProjectAnswers) -> Result<bool> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(ScaffoldError::fs(path, e)),
    };

    let invalid = |source: serde_json::Error| ScaffoldError::PackageDescriptor {
        path: path.to_path_buf(),
        source,
    };

    let mut descriptor: Value = serde_json::from_str(&content).map_err(invalid)?;
    let fields = descriptor.as_object_mut().ok_or_else(|| {
        invalid(<serde_json::Error as serde::de::Error>::custom(
            "top-level value is not an object",
        ))
    })?;

    fields.insert("name".into(), Value::String(answers.project_name.clone()));
    fields.insert(
        "description".into(),
        Value::String(answers.description.clone()),
    );
    if let Some(author) = &answers.author {
        fields.insert("author".into(), Value::String(author.clone()));
    }

    let mut rendered = serde_json::to_string_pretty(&descriptor).map_err(invalid)?;
    rendered.push('\n');
    fs::write(path, rendered)
        .await
        .map_err(|e| ScaffoldError::fs(path, e))?;

    tracing::debug!(path = %path.display(), "patched package descriptor");
    Ok(true)
}

async fn render_readme(path: &Path, answers: &ProjectAnswers) -> Result<bool> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(ScaffoldError::fs(path, e)),
    };

    let rendered = render::render(&content, &answers.render_context());
    fs::write(path, rendered)
        .await
        .map_err(|e| ScaffoldError::fs(path, e))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Writes a small starter tree instead of running git
    struct FakeCloner {
        fail: bool,
        cloned_into: Mutex<Option<PathBuf>>,
    }

    impl FakeCloner {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                cloned_into: Mutex::new(None),
            }
        }

        fn clone_path(&self) -> PathBuf {
            self.cloned_into.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl RepoCloner for FakeCloner {
        async fn clone_into(&self, repo: &RemoteRepo, dest: &Path) -> Result<()> {
            *self.cloned_into.lock().unwrap() = Some(dest.to_path_buf());
            std::fs::create_dir_all(dest.join(".git/refs")).unwrap();
            std::fs::write(dest.join(".git/HEAD"), "ref: refs/heads/main").unwrap();
            if self.fail {
                return Err(ScaffoldError::Fetch {
                    url: repo.url.clone(),
                    reason: "connection reset".into(),
                });
            }
            std::fs::create_dir_all(dest.join("src")).unwrap();
            std::fs::write(
                dest.join("package.json"),
                r#"{"name":"starter","version":"1.0.0","description":"","private":true}"#,
            )
            .unwrap();
            std::fs::write(dest.join("README.md"), "# {{projectName}}\n\n{{description}}\n").unwrap();
            std::fs::write(dest.join("src/index.ts"), "export {};\n").unwrap();
            Ok(())
        }
    }

    fn bundled_templates_root() -> PathBuf {
        PathBuf::from(crate::config::BUNDLED_TEMPLATES_DIR)
    }

    fn write_manifest(root: &Path, ids: &[&str]) {
        let entries: String = ids
            .iter()
            .map(|id| format!("  - id: {}\n    name: {}\n", id, id))
            .collect();
        std::fs::write(
            root.join(RootManifest::FILE_NAME),
            format!("templates:\n{}", entries),
        )
        .unwrap();
    }

    fn remote() -> ProjectTemplate {
        ProjectTemplate::RemoteGit(RemoteRepo::new("https://example.com/starter.git"))
    }

    fn read_package(dir: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(dir.join("package.json")).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_existing_target_rejected_without_writes() {
        let workspace = tempfile::tempdir().unwrap();
        let target = workspace.path().join("demo");
        std::fs::create_dir(&target).unwrap();

        let materializer = Materializer::new(bundled_templates_root(), FakeCloner::new(false));
        let err = materializer
            .materialize(
                &ProjectTemplate::LocalBundled("react".into()),
                &target,
                &ProjectAnswers::new("demo", "A demo"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::TargetExists(_)));
        assert_eq!(std::fs::read_dir(&target).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_existing_target_rejected_before_cloning() {
        let workspace = tempfile::tempdir().unwrap();
        let target = workspace.path().join("demo");
        std::fs::create_dir(&target).unwrap();

        let cloner = FakeCloner::new(false);
        let materializer = Materializer::new(bundled_templates_root(), cloner);
        let result = materializer
            .materialize(&remote(), &target, &ProjectAnswers::new("demo", ""))
            .await;

        assert!(matches!(result, Err(ScaffoldError::TargetExists(_))));
        assert!(materializer.cloner.cloned_into.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_local_template_is_copied_and_personalized() {
        let workspace = tempfile::tempdir().unwrap();
        let target = workspace.path().join("my-app");

        let materializer = Materializer::new(bundled_templates_root(), FakeCloner::new(false));
        let report = materializer
            .materialize(
                &ProjectTemplate::LocalBundled("vanilla".into()),
                &target,
                &ProjectAnswers::new("my-app", "Tiny site").with_author("Jo"),
            )
            .await
            .unwrap();

        assert!(report.package_patched);
        assert!(report.readme_rendered);
        assert!(report.files.contains(&PathBuf::from("main.js")));
        assert!(target.join("index.html").is_file());

        let package = read_package(&target);
        assert_eq!(package["name"], "my-app");
        assert_eq!(package["description"], "Tiny site");
        assert_eq!(package["author"], "Jo");

        let readme = std::fs::read_to_string(target.join("README.md")).unwrap();
        assert!(readme.starts_with("# my-app\n\nTiny site\n"));
    }

    #[tokio::test]
    async fn test_package_key_order_preserved() {
        let workspace = tempfile::tempdir().unwrap();
        let target = workspace.path().join("ordered");

        let materializer = Materializer::new(bundled_templates_root(), FakeCloner::new(false));
        materializer
            .materialize(
                &ProjectTemplate::LocalBundled("react".into()),
                &target,
                &ProjectAnswers::new("ordered", "x"),
            )
            .await
            .unwrap();

        let raw = std::fs::read_to_string(target.join("package.json")).unwrap();
        assert!(raw.starts_with("{\n  \"name\": \"ordered\",\n  \"private\": true,"));
        assert!(raw.ends_with("}\n"));
        assert!(read_package(&target).get("author").is_none());
    }

    #[tokio::test]
    async fn test_unknown_local_template_writes_nothing() {
        let workspace = tempfile::tempdir().unwrap();
        let target = workspace.path().join("demo");

        let materializer = Materializer::new(bundled_templates_root(), FakeCloner::new(false));
        for id in ["svelte", "../react", "components/..", "components"] {
            let err = materializer
                .materialize(
                    &ProjectTemplate::LocalBundled(id.into()),
                    &target,
                    &ProjectAnswers::new("demo", ""),
                )
                .await
                .unwrap_err();
            assert!(matches!(err, ScaffoldError::Configuration(_)), "{}", id);
        }
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_unlisted_directory_is_not_a_template() {
        let templates = tempfile::tempdir().unwrap();
        write_manifest(templates.path(), &["listed", "ghost"]);
        std::fs::create_dir(templates.path().join("listed")).unwrap();
        std::fs::create_dir(templates.path().join("extras")).unwrap();

        let workspace = tempfile::tempdir().unwrap();
        let target = workspace.path().join("demo");
        let materializer = Materializer::new(templates.path(), FakeCloner::new(false));

        for id in ["extras", "ghost"] {
            let err = materializer
                .materialize(
                    &ProjectTemplate::LocalBundled(id.into()),
                    &target,
                    &ProjectAnswers::new("demo", ""),
                )
                .await
                .unwrap_err();
            assert!(matches!(err, ScaffoldError::Configuration(_)), "{}", id);
        }
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_remote_template_strips_vcs_and_cleans_clone() {
        let workspace = tempfile::tempdir().unwrap();
        let target = workspace.path().join("from-remote");

        let materializer = Materializer::new(bundled_templates_root(), FakeCloner::new(false));
        let report = materializer
            .materialize(&remote(), &target, &ProjectAnswers::new("from-remote", "Remote"))
            .await
            .unwrap();

        assert!(!target.join(".git").exists());
        assert!(report.files.iter().all(|f| !f.starts_with(".git")));
        assert_eq!(read_package(&target)["name"], "from-remote");
        assert_eq!(
            std::fs::read_to_string(target.join("README.md")).unwrap(),
            "# from-remote\n\nRemote\n"
        );
        assert!(!materializer.cloner.clone_path().exists());
    }

    #[tokio::test]
    async fn test_fetch_failure_cleans_clone_and_skips_target() {
        let workspace = tempfile::tempdir().unwrap();
        let target = workspace.path().join("broken");

        let materializer = Materializer::new(bundled_templates_root(), FakeCloner::new(true));
        let err = materializer
            .materialize(&remote(), &target, &ProjectAnswers::new("broken", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Fetch { .. }));
        assert!(!target.exists());
        assert!(!materializer.cloner.clone_path().exists());
    }

    #[tokio::test]
    async fn test_invalid_package_descriptor_leaves_target_for_inspection() {
        let templates = tempfile::tempdir().unwrap();
        write_manifest(templates.path(), &["bad"]);
        std::fs::create_dir(templates.path().join("bad")).unwrap();
        std::fs::write(templates.path().join("bad/package.json"), "[1, 2]").unwrap();

        let workspace = tempfile::tempdir().unwrap();
        let target = workspace.path().join("demo");

        let materializer = Materializer::new(templates.path(), FakeCloner::new(false));
        let err = materializer
            .materialize(
                &ProjectTemplate::LocalBundled("bad".into()),
                &target,
                &ProjectAnswers::new("demo", ""),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::PackageDescriptor { .. }));
        assert!(target.join("package.json").is_file());
    }

    #[tokio::test]
    async fn test_template_without_descriptor_or_readme() {
        let templates = tempfile::tempdir().unwrap();
        write_manifest(templates.path(), &["bare"]);
        std::fs::create_dir(templates.path().join("bare")).unwrap();
        std::fs::write(templates.path().join("bare/index.html"), "<html></html>").unwrap();

        let workspace = tempfile::tempdir().unwrap();
        let target = workspace.path().join("demo");

        let report = Materializer::new(templates.path(), FakeCloner::new(false))
            .materialize(
                &ProjectTemplate::LocalBundled("bare".into()),
                &target,
                &ProjectAnswers::new("demo", ""),
            )
            .await
            .unwrap();

        assert!(!report.package_patched);
        assert!(!report.readme_rendered);
        assert_eq!(report.files, vec![PathBuf::from("index.html")]);
    }

    #[test]
    fn test_project_name_validation() {
        assert!(validate_project_name("my-app").is_ok());
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("a/b").is_err());
        assert!(validate_project_name("..").is_err());
    }

    #[test]
    fn test_blank_author_is_dropped() {
        let answers = ProjectAnswers::new("demo", "").with_author("  ");
        assert_eq!(answers.author, None);
    }
}
