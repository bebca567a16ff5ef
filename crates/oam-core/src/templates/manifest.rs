//! Bundled template manifest types and parsing

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One bundled project template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Directory name under the templates root
    pub id: String,

    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    #[serde(default)]
    pub description: String,

    /// Semver version for CLI compatibility checking
    #[serde(default)]
    pub version: Option<String>,
}

/// Root template manifest (templates/template.yaml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootManifest {
    pub templates: Vec<TemplateEntry>,
}

impl RootManifest {
    pub const FILE_NAME: &'static str = "template.yaml";

    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|source| ScaffoldError::Manifest {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read `template.yaml` from a templates root directory
    pub async fn load(templates_root: &Path) -> Result<Self> {
        let path = templates_root.join(Self::FILE_NAME);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ScaffoldError::fs(&path, e))?;
        Self::parse(&content, &path)
    }

    pub fn find(&self, id: &str) -> Option<&TemplateEntry> {
        self.templates
            .iter()
            .find(|t| t.id.eq_ignore_ascii_case(id))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn bundled_templates_root() -> PathBuf {
        PathBuf::from(crate::config::BUNDLED_TEMPLATES_DIR)
    }

    #[test]
    fn test_parse_manifest() {
        let manifest = RootManifest::parse(
            "templates:\n  - id: react\n    name: React\n    version: 0.2.0\n  - id: plain\n    name: Plain\n",
            Path::new("template.yaml"),
        )
        .unwrap();

        assert_eq!(manifest.ids(), vec!["react", "plain"]);
        assert_eq!(manifest.find("REACT").unwrap().version.as_deref(), Some("0.2.0"));
        assert_eq!(manifest.find("plain").unwrap().description, "");
        assert!(manifest.find("svelte").is_none());
    }

    #[test]
    fn test_invalid_manifest_reports_path() {
        let err = RootManifest::parse("templates: 3", Path::new("bad.yaml")).unwrap_err();
        match err {
            ScaffoldError::Manifest { path, .. } => assert_eq!(path, PathBuf::from("bad.yaml")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bundled_manifest_matches_directories() {
        let root = bundled_templates_root();
        let manifest = RootManifest::load(&root).await.unwrap();

        assert_eq!(manifest.ids(), vec!["react", "vue", "vanilla"]);
        for id in manifest.ids() {
            assert!(root.join(id).join("package.json").is_file(), "{} has no package.json", id);
        }
    }
}
