//! Component file resolution
//!
//! Turns a component variant plus the user's answers into the ordered list of
//! files to generate. Resolution is pure; rendering uses the embedded
//! templates and writing is left to [`crate::writer`].

use crate::error::{Result, ScaffoldError};
use crate::naming;
use crate::prompt::Answers;
use crate::render::{self, RenderContext};
use crate::templates::TemplateId;
use crate::writer::GeneratedFile;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Component flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentVariant {
    React,
    Vue,
    Vanilla,
}

impl ComponentVariant {
    pub const ALL: [ComponentVariant; 3] = [
        ComponentVariant::React,
        ComponentVariant::Vue,
        ComponentVariant::Vanilla,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentVariant::React => "react",
            ComponentVariant::Vue => "vue",
            ComponentVariant::Vanilla => "vanilla",
        }
    }

    /// Read the `type` answer
    pub fn from_answers(answers: &Answers) -> Result<Self> {
        answers
            .text("type")
            .ok_or_else(|| ScaffoldError::config("component type is missing"))?
            .parse()
    }

    fn file_name(&self, kind: FileKind, pascal: &str) -> String {
        match (self, kind) {
            (ComponentVariant::React, FileKind::Source) => format!("{}.tsx", pascal),
            (ComponentVariant::React, FileKind::Styles) => format!("{}.module.css", pascal),
            (ComponentVariant::React, FileKind::Test) => format!("{}.test.tsx", pascal),
            (_, FileKind::Index) => "index.ts".to_string(),
            (ComponentVariant::Vue, FileKind::Source) => format!("{}.vue", pascal),
            (ComponentVariant::Vue, FileKind::Styles) => format!("{}.css", pascal),
            (ComponentVariant::Vue, FileKind::Test) => format!("{}.spec.js", pascal),
            (ComponentVariant::Vanilla, FileKind::Source) => format!("{}.js", pascal),
            (ComponentVariant::Vanilla, FileKind::Styles) => format!("{}.css", pascal),
            (ComponentVariant::Vanilla, FileKind::Test) => format!("{}.test.js", pascal),
        }
    }

    fn template(&self, kind: FileKind) -> TemplateId {
        match (self, kind) {
            (ComponentVariant::React, FileKind::Source) => TemplateId::ReactComponent,
            (ComponentVariant::React, FileKind::Styles) => TemplateId::ReactStyles,
            (ComponentVariant::React, FileKind::Test) => TemplateId::ReactTest,
            (_, FileKind::Index) => TemplateId::ReactIndex,
            (ComponentVariant::Vue, FileKind::Source) => TemplateId::VueComponent,
            (ComponentVariant::Vue, FileKind::Styles) => TemplateId::VueStyles,
            (ComponentVariant::Vue, FileKind::Test) => TemplateId::VueTest,
            (ComponentVariant::Vanilla, FileKind::Source) => TemplateId::VanillaComponent,
            (ComponentVariant::Vanilla, FileKind::Styles) => TemplateId::VanillaStyles,
            (ComponentVariant::Vanilla, FileKind::Test) => TemplateId::VanillaTest,
        }
    }

    /// Only react components get an `index.ts` barrel
    fn has_index(&self) -> bool {
        matches!(self, ComponentVariant::React)
    }
}

impl fmt::Display for ComponentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentVariant {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "react" => Ok(ComponentVariant::React),
            "vue" => Ok(ComponentVariant::Vue),
            "vanilla" => Ok(ComponentVariant::Vanilla),
            other => Err(ScaffoldError::config(format!(
                "unknown component type '{}' (supported: react, vue, vanilla)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Source,
    Styles,
    Test,
    Index,
}

/// Where component directories are rooted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Components,
    Pages,
    Utils,
    Custom(String),
}

impl Destination {
    pub const PRESETS: [&'static str; 3] = ["src/components", "src/pages", "src/utils"];

    /// Build from the `destination` / `customPath` answer pair.
    /// `custom_path` must be present iff `destination` is `custom`.
    pub fn from_answer(destination: &str, custom_path: Option<&str>) -> Result<Self> {
        let preset = match destination {
            "src/components" => Some(Destination::Components),
            "src/pages" => Some(Destination::Pages),
            "src/utils" => Some(Destination::Utils),
            "custom" => None,
            other => {
                return Err(ScaffoldError::config(format!(
                    "unknown destination '{}'",
                    other
                )))
            }
        };

        match (preset, custom_path) {
            (Some(preset), None) => Ok(preset),
            (Some(_), Some(_)) => Err(ScaffoldError::config(
                "a custom path is only allowed with the custom destination",
            )),
            (None, Some(path)) if !path.trim().is_empty() => {
                Ok(Destination::Custom(path.trim().to_string()))
            }
            (None, _) => Err(ScaffoldError::config(
                "a custom path is required when destination is custom",
            )),
        }
    }

    /// Directory the component folders are created in
    pub fn base(&self) -> Result<&Path> {
        let base = match self {
            Destination::Components => Self::PRESETS[0],
            Destination::Pages => Self::PRESETS[1],
            Destination::Utils => Self::PRESETS[2],
            Destination::Custom(path) if path.trim().is_empty() => {
                return Err(ScaffoldError::config(
                    "a custom path is required when destination is custom",
                ))
            }
            Destination::Custom(path) => path.as_str(),
        };
        let base = Path::new(base);
        ensure_contained(base)?;
        Ok(base)
    }
}

/// Typed view of the component answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentAnswers {
    pub name: String,
    pub description: Option<String>,
    pub has_tests: bool,
    pub has_styles: bool,
    pub destination: Destination,
}

impl ComponentAnswers {
    pub fn from_answers(answers: &Answers) -> Result<Self> {
        let name = answers
            .text("name")
            .ok_or_else(|| ScaffoldError::config("component name is missing"))?;
        let destination = answers
            .text("destination")
            .ok_or_else(|| ScaffoldError::config("destination is missing"))?;
        let custom_path = answers.text("customPath");

        Ok(Self {
            name: name.trim().to_string(),
            description: answers
                .text("description")
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
            has_tests: answers.flag("hasTests"),
            has_styles: answers.flag("hasStyles"),
            destination: Destination::from_answer(destination, custom_path)?,
        })
    }
}

/// One file to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Path relative to the directory the command runs in
    pub relative_path: PathBuf,
    pub template: TemplateId,
}

/// Resolve the ordered list of files for a component
pub fn resolve(variant: ComponentVariant, answers: &ComponentAnswers) -> Result<Vec<FileDescriptor>> {
    validate_name(&answers.name)?;
    let base = answers.destination.base()?;
    let pascal = naming::to_pascal(&answers.name);
    let dir = base.join(naming::to_kebab(&answers.name));

    let mut kinds = vec![FileKind::Source];
    if answers.has_styles {
        kinds.push(FileKind::Styles);
    }
    if answers.has_tests {
        kinds.push(FileKind::Test);
    }
    if variant.has_index() {
        kinds.push(FileKind::Index);
    }

    Ok(kinds
        .into_iter()
        .map(|kind| FileDescriptor {
            relative_path: dir.join(variant.file_name(kind, &pascal)),
            template: variant.template(kind),
        })
        .collect())
}

/// Placeholder values for the component templates
pub fn component_context(variant: ComponentVariant, answers: &ComponentAnswers) -> RenderContext {
    let pascal = naming::to_pascal(&answers.name);
    let description = answers.description.as_deref().unwrap_or_default();

    let description_doc = match (&answers.description, variant) {
        (None, _) => String::new(),
        (Some(text), ComponentVariant::Vanilla) => format!(" * {}", text),
        (Some(text), _) => format!("  /**\n   * {}\n   */", text),
    };

    let styles_import = match (answers.has_styles, variant) {
        (false, _) => String::new(),
        (true, ComponentVariant::React) => {
            format!("import styles from './{}.module.css';", pascal)
        }
        (true, _) => format!("import './{}.css';", pascal),
    };

    let container_class = if answers.has_styles && variant == ComponentVariant::React {
        " className={styles.container}"
    } else {
        ""
    };

    RenderContext::new()
        .with_name_variants(&answers.name)
        .with("description", description)
        .with("descriptionDoc", description_doc)
        .with("stylesImport", styles_import)
        .with("containerClass", container_class)
}

/// Resolve and render every file of a component
pub fn render_component(
    variant: ComponentVariant,
    answers: &ComponentAnswers,
) -> Result<Vec<GeneratedFile>> {
    let context = component_context(variant, answers);
    let files = resolve(variant, answers)?
        .into_iter()
        .map(|descriptor| GeneratedFile {
            contents: render::render(descriptor.template.source(), &context),
            path: descriptor.relative_path,
        })
        .collect::<Vec<_>>();

    tracing::debug!(%variant, files = files.len(), "rendered component {}", answers.name);
    Ok(files)
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ScaffoldError::config("component name is required"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ScaffoldError::config(format!(
            "component name '{}' must not contain path separators",
            name
        )));
    }
    if naming::to_pascal(name).is_empty() {
        return Err(ScaffoldError::config(format!(
            "component name '{}' has no usable characters",
            name
        )));
    }
    Ok(())
}

/// Reject paths that would land outside the directory they are joined onto
pub(crate) fn ensure_contained(path: &Path) -> Result<()> {
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => {
                return Err(ScaffoldError::config(format!(
                    "path '{}' must stay inside the project directory",
                    path.display()
                )))
            }
        }
    }
    Ok(())
}
