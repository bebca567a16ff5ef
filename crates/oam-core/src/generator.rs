//! Generator subsystem driven by a YAML definition file
//!
//! A definition file lists named generators. Each generator declares the
//! questions to ask and the actions that turn the answers into files:
//!
//! ```yaml
//! generators:
//!   - name: hook
//!     description: Create a custom hook
//!     questions:
//!       - { name: name, message: Hook name, kind: input, required: true }
//!     actions:
//!       - type: add
//!         path: "src/hooks/{{name}}.ts"
//!         template: react-hook
//!       - type: component      # delegate to the component resolver
//! ```
//!
//! An `add` action may set `escape: json` when its template splices answers
//! into JSON string literals.
//!
//! Planning is pure; the caller writes the result with [`crate::writer`].

use crate::component::{self, ensure_contained, ComponentAnswers, ComponentVariant};
use crate::error::{Result, ScaffoldError};
use crate::prompt::{self, AnswerValue, Answers, Question};
use crate::render::{self, RenderContext};
use crate::templates::{embedded, TemplateId};
use crate::writer::GeneratedFile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// How answer values are inserted into an `add` template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Escape {
    #[default]
    None,
    /// Values land inside JSON string literals
    Json,
}

/// What a generator does with the collected answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Render `template` into the file at `path`
    Add {
        path: String,
        template: TemplateId,
        #[serde(default)]
        when: BTreeMap<String, AnswerValue>,
        #[serde(default)]
        escape: Escape,
    },
    /// Resolve and render a component from the answers
    Component,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generator {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    pub actions: Vec<Action>,
}

impl Generator {
    /// Every visible question must have a valid answer
    pub fn check_answers(&self, answers: &Answers) -> Result<()> {
        for question in self.questions.iter().filter(|q| q.is_visible(answers)) {
            let value = answers.get(&question.name).ok_or_else(|| {
                ScaffoldError::config(format!("missing answer for '{}'", question.name))
            })?;
            question.validate(value).map_err(ScaffoldError::Configuration)?;
        }
        Ok(())
    }

    /// Turn answers into rendered files without touching the disk
    pub fn plan(&self, answers: &Answers) -> Result<Vec<GeneratedFile>> {
        self.check_answers(answers)?;
        let context = RenderContext::from_answers(answers);
        let mut files = Vec::new();

        for action in &self.actions {
            match action {
                Action::Add {
                    path,
                    template,
                    when,
                    escape,
                } => {
                    if !prompt::conditions_met(when, answers) {
                        continue;
                    }
                    let contents = match escape {
                        Escape::None => render::render(template.source(), &context),
                        Escape::Json => {
                            render::render(template.source(), &context.json_escaped())
                        }
                    };
                    files.push(GeneratedFile {
                        path: render_path(path, &context)?,
                        contents,
                    });
                }
                Action::Component => {
                    let variant = ComponentVariant::from_answers(answers)?;
                    let component_answers = ComponentAnswers::from_answers(answers)?;
                    files.extend(component::render_component(variant, &component_answers)?);
                }
            }
        }

        tracing::debug!(generator = %self.name, files = files.len(), "planned generator output");
        Ok(files)
    }
}

fn render_path(path: &str, context: &RenderContext) -> Result<PathBuf> {
    let rendered = render::render(path, context);
    if rendered.contains("{{") {
        return Err(ScaffoldError::config(format!(
            "unresolved placeholder in output path '{}'",
            rendered
        )));
    }
    let rendered = PathBuf::from(rendered);
    ensure_contained(&rendered)?;
    Ok(rendered)
}

/// Parsed generator definition file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorFile {
    pub generators: Vec<Generator>,
}

impl GeneratorFile {
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|source| ScaffoldError::Manifest {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Definitions shipped with the tool
    pub fn bundled() -> Result<Self> {
        Self::parse(embedded::GENERATORS, Path::new("templates/generators.yaml"))
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ScaffoldError::fs(path, e))?;
        Self::parse(&content, path)
    }

    pub fn find(&self, name: &str) -> Option<&Generator> {
        self.generators.iter().find(|g| g.name == name)
    }
}
