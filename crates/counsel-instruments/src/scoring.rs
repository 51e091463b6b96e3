use std::collections::BTreeSet;

use counsel_core::models::definition::AssessmentType;
use counsel_core::models::question::Question;
use counsel_core::models::scoring::ScoringRules;

use crate::error::ValidationError;
use crate::questions::{validate_name, validate_questions};
use crate::ranges::{OVERALL, validate_ranges};

/// Distinct question categories, sorted by name.
pub fn question_categories(questions: &[Question]) -> BTreeSet<&str> {
    questions.iter().map(|q| q.category.as_str()).collect()
}

/// Check that `rules` score every category used by `questions` and that
/// every range set covers the percentage axis.
///
/// Scoring categories with no questions are allowed, so questions can be
/// added to them later.
pub fn validate_scoring_rules(
    questions: &[Question],
    rules: &ScoringRules,
) -> Result<(), ValidationError> {
    if rules.categories.is_empty() {
        return Err(ValidationError::MissingScoringCategories);
    }
    if rules.categories.iter().any(|c| c.name.trim().is_empty()) {
        return Err(ValidationError::InvalidDefinition(
            "scoring category names must not be empty".to_string(),
        ));
    }

    for category in question_categories(questions) {
        if rules.category(category).is_none() {
            return Err(ValidationError::UnscoredCategory(category.to_string()));
        }
    }

    for category in &rules.categories {
        validate_ranges(&category.interpretations, &category.name)?;
    }

    validate_ranges(&rules.overall_interpretations, OVERALL)
}

/// The pure part of creating or updating a definition.
///
/// Scoring rules are required and checked for scored types; for
/// questionnaires they are ignored.
pub fn validate_definition(
    name: &str,
    assessment_type: AssessmentType,
    questions: &[Question],
    scoring_rules: Option<&ScoringRules>,
) -> Result<(), ValidationError> {
    validate_name(name)?;
    validate_questions(questions)?;

    if assessment_type.is_scored() {
        let rules = scoring_rules.ok_or(ValidationError::MissingScoringRules)?;
        validate_scoring_rules(questions, rules)?;
    }
    Ok(())
}
