use thiserror::Error;
use uuid::Uuid;

use counsel_core::error::CoreError;
use counsel_instruments::error::ValidationError;
use counsel_instruments::ranges::OVERALL;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {key}")]
    NotFound { key: String },

    #[error("record encoding error: {0}")]
    Encoding(#[from] CoreError),

    #[error("score encoding error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Raised by a [`PermissionChecker`](crate::store::PermissionChecker).
#[derive(Debug, Error)]
#[error("caller {caller} may not manage assessments owned by organization {owner_org_id}")]
pub struct Forbidden {
    pub caller: Uuid,
    pub owner_org_id: Uuid,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Forbidden(#[from] Forbidden),

    #[error("assessment definition not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Message safe to show the author, naming the offending question or
    /// category for validation failures.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Forbidden(_) => {
                "You do not have permission to manage this assessment.".to_string()
            }
            ServiceError::NotFound(_) => "Assessment not found.".to_string(),
            ServiceError::Validation(err) => validation_message(err),
            ServiceError::Store(_) => {
                "The assessment could not be saved. Please try again.".to_string()
            }
        }
    }
}

fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::InvalidQuestion { text, reason } if text.is_empty() => {
            format!("Questions: {reason}.")
        }
        ValidationError::InvalidQuestion { text, reason } => {
            format!("Question \"{text}\": {reason}.")
        }
        ValidationError::InvalidDefinition(detail) => format!("Assessment {detail}."),
        ValidationError::MissingScoringRules | ValidationError::MissingScoringCategories => {
            "Scored assessments need scoring rules for each question category.".to_string()
        }
        ValidationError::UnscoredCategory(name) => format!(
            "Category \"{name}\" has questions but no scoring rules. Add interpretation ranges for it."
        ),
        ValidationError::InvalidRangeCoverage { subject, detail } if subject == OVERALL => {
            format!("Overall interpretation ranges: {detail}.")
        }
        ValidationError::InvalidRangeCoverage { subject, detail } => {
            format!("Interpretation ranges for category \"{subject}\": {detail}.")
        }
    }
}
