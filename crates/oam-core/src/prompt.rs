//! Declarative question specs and the answers they produce
//!
//! Question lists are plain data (usually loaded from the generator
//! definition file). Each question may carry a `when` map; it is only asked
//! when every listed answer already has the expected value. The UI layer
//! drives the loop with [`next_pending`] and never decides visibility itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single answer value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Option name -> value, collected once per invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    values: BTreeMap<String, AnswerValue>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AnswerValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder form of [`Answers::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Text answer, `None` for missing or non-text values
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(AnswerValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Flag answer, `false` when missing
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(AnswerValue::Flag(true)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.values.iter()
    }
}

/// One selectable entry of a select / multiselect question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl Choice {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QuestionKind {
    Input {
        #[serde(default)]
        default: Option<String>,
        #[serde(default)]
        required: bool,
    },
    Confirm {
        #[serde(default)]
        default: bool,
    },
    Select {
        choices: Vec<Choice>,
    },
    Multiselect {
        choices: Vec<Choice>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub name: String,
    pub message: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// Answer name -> expected value; all must match for the question to be asked
    #[serde(default)]
    pub when: BTreeMap<String, AnswerValue>,
}

impl Question {
    pub fn is_visible(&self, answers: &Answers) -> bool {
        conditions_met(&self.when, answers)
    }

    /// Answer used when prompts are skipped (`--yes`). `None` means the
    /// question has no sensible default and must be answered explicitly.
    pub fn default_answer(&self) -> Option<AnswerValue> {
        match &self.kind {
            QuestionKind::Input { default, required } => match default {
                Some(text) if !(*required && text.is_empty()) => Some(text.clone().into()),
                None if !*required => Some(String::new().into()),
                _ => None,
            },
            QuestionKind::Confirm { default } => Some((*default).into()),
            QuestionKind::Select { choices } => {
                choices.first().map(|c| AnswerValue::Text(c.value.clone()))
            }
            QuestionKind::Multiselect { .. } => Some(AnswerValue::List(Vec::new())),
        }
    }

    /// Check a candidate answer against the question's constraints
    pub fn validate(&self, value: &AnswerValue) -> Result<(), String> {
        match (&self.kind, value) {
            (QuestionKind::Input { required, .. }, AnswerValue::Text(text)) => {
                if *required && text.trim().is_empty() {
                    Err(format!("{} is required", self.name))
                } else {
                    Ok(())
                }
            }
            (QuestionKind::Confirm { .. }, AnswerValue::Flag(_)) => Ok(()),
            (QuestionKind::Select { choices }, AnswerValue::Text(text)) => {
                if choices.iter().any(|c| &c.value == text) {
                    Ok(())
                } else {
                    Err(format!("'{}' is not a valid choice for {}", text, self.name))
                }
            }
            (QuestionKind::Multiselect { choices }, AnswerValue::List(items)) => {
                match items.iter().find(|i| !choices.iter().any(|c| &c.value == *i)) {
                    Some(bad) => Err(format!("'{}' is not a valid choice for {}", bad, self.name)),
                    None => Ok(()),
                }
            }
            _ => Err(format!("wrong answer type for {}", self.name)),
        }
    }
}

/// True when every `when` entry equals the corresponding answer
pub fn conditions_met(when: &BTreeMap<String, AnswerValue>, answers: &Answers) -> bool {
    when.iter()
        .all(|(key, expected)| answers.get(key) == Some(expected))
}

/// First question that is visible and not answered yet
pub fn next_pending<'a>(questions: &'a [Question], answers: &Answers) -> Option<&'a Question> {
    questions
        .iter()
        .find(|q| !answers.contains(&q.name) && q.is_visible(answers))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destination_questions() -> Vec<Question> {
        serde_yaml::from_str(
            r#"
- name: destination
  message: Target directory
  kind: select
  choices:
    - value: src/components
    - value: custom
      label: Custom path
- name: customPath
  message: Custom path
  kind: input
  required: true
  when:
    destination: custom
- name: hasStyles
  message: Add a stylesheet?
  kind: confirm
  default: true
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_question_kinds() {
        let questions = destination_questions();
        assert_eq!(questions.len(), 3);
        assert!(matches!(questions[0].kind, QuestionKind::Select { .. }));
        assert_eq!(
            questions[1].kind,
            QuestionKind::Input {
                default: None,
                required: true
            }
        );
        assert_eq!(questions[2].kind, QuestionKind::Confirm { default: true });
    }

    #[test]
    fn test_custom_path_only_visible_for_custom_destination() {
        let questions = destination_questions();
        let preset = Answers::new().with("destination", "src/components");
        let custom = Answers::new().with("destination", "custom");

        assert!(!questions[1].is_visible(&preset));
        assert!(questions[1].is_visible(&custom));
    }

    #[test]
    fn test_next_pending_walks_in_order() {
        let questions = destination_questions();
        let mut answers = Answers::new();

        assert_eq!(next_pending(&questions, &answers).unwrap().name, "destination");
        answers.insert("destination", "src/components");
        assert_eq!(next_pending(&questions, &answers).unwrap().name, "hasStyles");
        answers.insert("hasStyles", true);
        assert!(next_pending(&questions, &answers).is_none());
    }

    #[test]
    fn test_prefilled_answers_are_skipped() {
        let questions = destination_questions();
        let answers = Answers::new()
            .with("destination", "custom")
            .with("customPath", "widgets");
        assert_eq!(next_pending(&questions, &answers).unwrap().name, "hasStyles");
    }

    #[test]
    fn test_default_answers() {
        let questions = destination_questions();
        assert_eq!(
            questions[0].default_answer(),
            Some(AnswerValue::Text("src/components".into()))
        );
        assert_eq!(questions[1].default_answer(), None);
        assert_eq!(questions[2].default_answer(), Some(AnswerValue::Flag(true)));
    }

    #[test]
    fn test_validate() {
        let questions = destination_questions();
        assert!(questions[0].validate(&"custom".into()).is_ok());
        assert!(questions[0].validate(&"src/nowhere".into()).is_err());
        assert!(questions[1].validate(&"".into()).is_err());
        assert!(questions[1].validate(&"widgets".into()).is_ok());
        assert!(questions[2].validate(&"yes".into()).is_err());
    }

    #[test]
    fn test_answer_accessors() {
        let answers = Answers::new().with("name", "Modal").with("hasTests", true);
        assert_eq!(answers.text("name"), Some("Modal"));
        assert_eq!(answers.text("hasTests"), None);
        assert!(answers.flag("hasTests"));
        assert!(!answers.flag("hasStyles"));
    }
}
