use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::question::Question;
use crate::models::scoring::ScoringRules;

/// Whether an assessment carries scoring semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AssessmentType {
    /// Scored questionnaire; results map to interpretation labels.
    CustomAssessment,
    /// Unscored question set.
    CustomQuestionnaire,
}

impl AssessmentType {
    pub fn is_scored(self) -> bool {
        matches!(self, AssessmentType::CustomAssessment)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssessmentType::CustomAssessment => "custom_assessment",
            AssessmentType::CustomQuestionnaire => "custom_questionnaire",
        }
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "custom_assessment" => Ok(AssessmentType::CustomAssessment),
            "custom_questionnaire" => Ok(AssessmentType::CustomQuestionnaire),
            other => Err(CoreError::InvalidAssessmentType(other.to_string())),
        }
    }
}

/// A stored, validated assessment definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomAssessmentDefinition {
    pub id: Uuid,
    pub owner_org_id: Uuid,
    pub created_by: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub assessment_type: AssessmentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_rules: Option<ScoringRules>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl CustomAssessmentDefinition {
    pub fn from_json(bytes: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, CoreError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Input for creating a definition. Identity and timestamps are assigned
/// by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewAssessmentDefinition {
    pub owner_org_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub assessment_type: AssessmentType,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub scoring_rules: Option<ScoringRules>,
}

/// Partial update. `None` means "keep the stored value".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentDefinitionPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub assessment_type: Option<AssessmentType>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
    #[serde(default)]
    pub scoring_rules: Option<ScoringRules>,
}

impl AssessmentDefinitionPatch {
    /// True when the patch changes anything the scoring rules depend on.
    pub fn touches_scoring(&self) -> bool {
        self.questions.is_some() || self.scoring_rules.is_some() || self.assessment_type.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && !self.touches_scoring()
    }
}
