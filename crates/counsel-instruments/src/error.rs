use serde::Serialize;
use thiserror::Error;

/// Author input errors raised while validating an assessment definition.
///
/// Every variant is a caller mistake; none are transient.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("invalid question '{text}': {reason}")]
    InvalidQuestion { text: String, reason: String },

    #[error("invalid assessment definition: {0}")]
    InvalidDefinition(String),

    #[error("scored assessments require scoring rules")]
    MissingScoringRules,

    #[error("scored assessments require at least one scoring category")]
    MissingScoringCategories,

    #[error("question category '{0}' has no matching scoring category")]
    UnscoredCategory(String),

    #[error("interpretation ranges for '{subject}' are invalid: {detail}")]
    InvalidRangeCoverage { subject: String, detail: String },
}

impl ValidationError {
    pub(crate) fn question(text: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidQuestion {
            text: text.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn coverage(subject: impl Into<String>, detail: impl Into<String>) -> Self {
        ValidationError::InvalidRangeCoverage {
            subject: subject.into(),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{instrument_id}: total score {total} is outside range [{min}, {max}]")]
    TotalOutOfRange {
        instrument_id: String,
        total: f64,
        min: f64,
        max: f64,
    },
}
