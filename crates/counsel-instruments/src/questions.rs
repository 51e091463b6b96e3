use std::collections::HashSet;

use counsel_core::models::question::{AnswerFormat, Question};

use crate::error::ValidationError;

const MIN_CHOICE_OPTIONS: usize = 2;
const MIN_NAME_LEN: usize = 3;

/// Structural checks over an authored question set. First violation wins.
pub fn validate_questions(questions: &[Question]) -> Result<(), ValidationError> {
    if questions.is_empty() {
        return Err(ValidationError::question(
            "",
            "assessment must contain at least one question",
        ));
    }

    let mut seen_ids = HashSet::new();
    for question in questions {
        validate_question(question)?;
        if !seen_ids.insert(question.id.as_str()) {
            return Err(ValidationError::question(
                &question.text,
                format!("duplicate question id '{}'", question.id),
            ));
        }
    }
    Ok(())
}

pub fn validate_question(question: &Question) -> Result<(), ValidationError> {
    let fail = |reason: String| Err(ValidationError::question(display_text(question), reason));

    if question.id.trim().is_empty() {
        return fail("question id must not be empty".to_string());
    }
    if question.text.trim().is_empty() {
        return fail("question text must not be empty".to_string());
    }
    if question.category.trim().is_empty() {
        return fail("question category must not be empty".to_string());
    }
    if !question.weight.is_finite() || question.weight < 0.0 {
        return fail(format!(
            "weight must be a non-negative number (got {})",
            question.weight
        ));
    }

    match question.answer_format() {
        None if question.question_type.is_choice() => {
            return fail(format!(
                "{} questions need at least {MIN_CHOICE_OPTIONS} options (got 0)",
                question.question_type.as_str()
            ));
        }
        None => return fail("rating_scale questions need a scale".to_string()),
        Some(AnswerFormat::SingleChoice { options } | AnswerFormat::MultiChoice { options }) => {
            if options.len() < MIN_CHOICE_OPTIONS {
                return fail(format!(
                    "{} questions need at least {MIN_CHOICE_OPTIONS} options (got {})",
                    question.question_type.as_str(),
                    options.len()
                ));
            }
            if options.iter().any(|o| o.trim().is_empty()) {
                return fail("options must not be blank".to_string());
            }
        }
        Some(AnswerFormat::Rating { scale }) => {
            if scale.min >= scale.max {
                return fail(format!(
                    "scale min ({}) must be less than max ({})",
                    scale.min, scale.max
                ));
            }
        }
        Some(_) => {}
    }
    Ok(())
}

/// Definition-level field checks that do not depend on the questions.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::InvalidDefinition(format!(
            "name must be at least {MIN_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn display_text(question: &Question) -> &str {
    if question.text.trim().is_empty() {
        &question.id
    } else {
        &question.text
    }
}
