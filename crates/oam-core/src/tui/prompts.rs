//! Charm-style prompts driven by declarative question lists

use crate::prompt::{self, AnswerValue, Answers, Question, QuestionKind};
use anyhow::{Context, Result};

/// Ask every visible, unanswered question in order.
///
/// Answers in `prefilled` are kept and their questions skipped. With `yes`
/// each question takes its default; a question without one is an error.
pub fn ask(questions: &[Question], prefilled: Answers, yes: bool) -> Result<Answers> {
    let mut answers = prefilled;

    while let Some(question) = prompt::next_pending(questions, &answers) {
        let value = if yes {
            question.default_answer().with_context(|| {
                format!(
                    "'{}' has no default; run without --yes to answer it",
                    question.name
                )
            })?
        } else {
            ask_one(question)?
        };

        question.validate(&value).map_err(anyhow::Error::msg)?;
        answers.insert(question.name.clone(), value);
    }

    Ok(answers)
}

fn ask_one(question: &Question) -> Result<AnswerValue> {
    let value = match &question.kind {
        QuestionKind::Input { default, required } => {
            let mut input = cliclack::input(&question.message).required(*required);
            if let Some(default) = default.as_deref().filter(|d| !d.is_empty()) {
                input = input.default_input(default);
            }

            let name = question.name.clone();
            let required = *required;
            let text: String = input
                .validate(move |value: &String| {
                    if required && value.trim().is_empty() {
                        Err(format!("{} is required", name))
                    } else {
                        Ok(())
                    }
                })
                .interact()?;
            AnswerValue::Text(text.trim().to_string())
        }
        QuestionKind::Confirm { default } => {
            let confirmed: bool = cliclack::confirm(&question.message)
                .initial_value(*default)
                .interact()?;
            AnswerValue::Flag(confirmed)
        }
        QuestionKind::Select { choices } => {
            let mut select = cliclack::select(&question.message);
            for choice in choices {
                select = select.item(choice.value.clone(), choice.label(), "");
            }
            let selected: String = select.interact()?;
            AnswerValue::Text(selected)
        }
        QuestionKind::Multiselect { choices } => {
            let mut multi = cliclack::multiselect(&question.message);
            for choice in choices {
                multi = multi.item(choice.value.clone(), choice.label(), "");
            }
            let selected: Vec<String> = multi.required(false).interact()?;
            AnswerValue::List(selected)
        }
    };

    Ok(value)
}
