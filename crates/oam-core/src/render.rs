//! Placeholder substitution for template text
//!
//! Templates use `{{token}}` markers. Only tokens present in the
//! [`RenderContext`] are replaced; anything else is left verbatim so a
//! template can be rendered in several passes with different contexts.
//! Rendering is a single textual pass: substituted values are never
//! rescanned. Markers must be exact: `{{ name }}` with inner spaces is
//! framework syntax (Vue, Handlebars) and is never touched. Values are
//! inserted as-is unless the context was built with
//! [`RenderContext::json_escaped`].

use crate::naming;
use crate::prompt::{AnswerValue, Answers};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").expect("placeholder pattern is valid")
    })
}

/// Placeholder name -> substitution value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    values: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Add the case variants of `name` (`kebabName`, `pascalName`, `camelName`,
    /// `upperName`, `lowerName`) alongside `name` itself
    pub fn with_name_variants(self, name: &str) -> Self {
        self.with("name", name)
            .with("kebabName", naming::to_kebab(name))
            .with("pascalName", naming::to_pascal(name))
            .with("camelName", naming::to_camel(name))
            .with("upperName", naming::to_upper(name))
            .with("lowerName", naming::to_lower(name))
    }

    /// Build a context from prompt answers. Flags render as `true`/`false`,
    /// lists as a comma separated string.
    pub fn from_answers(answers: &Answers) -> Self {
        let mut context = Self::new();
        for (key, value) in answers.iter() {
            let rendered = match value {
                AnswerValue::Text(text) => text.clone(),
                AnswerValue::Flag(flag) => flag.to_string(),
                AnswerValue::List(items) => items.join(", "),
            };
            context = context.with(key.clone(), rendered);
        }
        match answers.text("name") {
            Some(name) => context.with_name_variants(name),
            None => context,
        }
    }

    /// Copy of this context whose values are escaped for use inside a JSON
    /// string literal
    pub fn json_escaped(&self) -> Self {
        self.values
            .iter()
            .map(|(key, value)| (key.clone(), json_string_body(value)))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn json_string_body(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

/// Replace every recognized `{{token}}` in `template`
pub fn render(template: &str, context: &RenderContext) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures<'_>| match context.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
