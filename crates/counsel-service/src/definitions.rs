use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use counsel_core::models::definition::{
    AssessmentDefinitionPatch, CustomAssessmentDefinition, NewAssessmentDefinition,
};
use counsel_instruments::error::ValidationError;
use counsel_instruments::questions::{validate_name, validate_questions};
use counsel_instruments::scoring::{validate_definition, validate_scoring_rules};

use crate::audit::{AuditEvent, RESOURCE_DEFINITION};
use crate::error::ServiceError;
use crate::store::{DefinitionStore, PermissionChecker};

/// Creates and updates custom assessment definitions.
///
/// Every mutation runs permission check, then validation, then exactly one
/// store write. Nothing is written when any step fails.
pub struct AssessmentDefinitionService<S, P> {
    store: Arc<S>,
    permissions: Arc<P>,
}

impl<S, P> AssessmentDefinitionService<S, P>
where
    S: DefinitionStore,
    P: PermissionChecker,
{
    pub fn new(store: Arc<S>, permissions: Arc<P>) -> Self {
        Self { store, permissions }
    }

    pub async fn create(
        &self,
        caller: Uuid,
        input: NewAssessmentDefinition,
    ) -> Result<CustomAssessmentDefinition, ServiceError> {
        self.permissions
            .assert_caller_may_manage(input.owner_org_id, caller)
            .await?;

        validate_definition(
            &input.name,
            input.assessment_type,
            &input.questions,
            input.scoring_rules.as_ref(),
        )
        .inspect_err(|err| warn!(caller = %caller, error = %err, "assessment definition rejected"))?;

        let now = jiff::Timestamp::now();
        let scoring_rules = input
            .scoring_rules
            .filter(|_| input.assessment_type.is_scored());
        let definition = CustomAssessmentDefinition {
            id: Uuid::new_v4(),
            owner_org_id: input.owner_org_id,
            created_by: caller,
            name: input.name,
            assessment_type: input.assessment_type,
            category: input.category,
            description: input.description,
            questions: input.questions,
            scoring_rules,
            created_at: now,
            updated_at: now,
        };

        self.store.save_definition(&definition).await?;

        AuditEvent::new("create", RESOURCE_DEFINITION, definition.id.to_string(), caller)
            .with_details(json!({
                "type": definition.assessment_type.as_str(),
                "questions": definition.questions.len(),
            }))
            .emit();
        info!(definition_id = %definition.id, "assessment definition created");

        Ok(definition)
    }

    /// Apply a partial update. Omitted fields keep their stored values.
    ///
    /// When the scoring rules change without new questions, category
    /// coverage is checked against the stored question set, and that same
    /// set is what gets written back.
    pub async fn update(
        &self,
        caller: Uuid,
        id: Uuid,
        patch: AssessmentDefinitionPatch,
    ) -> Result<CustomAssessmentDefinition, ServiceError> {
        let mut existing = self
            .store
            .fetch_definition(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        self.permissions
            .assert_caller_may_manage(existing.owner_org_id, caller)
            .await?;

        if patch.is_empty() {
            return Ok(existing);
        }

        let assessment_type = patch.assessment_type.unwrap_or(existing.assessment_type);
        if assessment_type.is_scored() && patch.touches_scoring() && patch.questions.is_none() {
            existing.questions = self.store.fetch_questions_for_assessment(id).await?;
        }

        validate_patch(&existing, &patch).inspect_err(|err| {
            warn!(definition_id = %id, caller = %caller, error = %err, "assessment update rejected")
        })?;

        let updated = apply_patch(existing, patch);
        self.store.save_definition(&updated).await?;

        AuditEvent::new("update", RESOURCE_DEFINITION, id.to_string(), caller)
            .with_details(json!({
                "type": updated.assessment_type.as_str(),
                "questions": updated.questions.len(),
            }))
            .emit();
        info!(definition_id = %id, "assessment definition updated");

        Ok(updated)
    }
}

/// Checks `patch` as it would apply on top of `existing`.
fn validate_patch(
    existing: &CustomAssessmentDefinition,
    patch: &AssessmentDefinitionPatch,
) -> Result<(), ValidationError> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(questions) = &patch.questions {
        validate_questions(questions)?;
    }

    let assessment_type = patch.assessment_type.unwrap_or(existing.assessment_type);
    if !assessment_type.is_scored() || !patch.touches_scoring() {
        return Ok(());
    }

    let rules = patch
        .scoring_rules
        .as_ref()
        .or(existing.scoring_rules.as_ref())
        .ok_or(ValidationError::MissingScoringRules)?;
    let questions = patch.questions.as_ref().unwrap_or(&existing.questions);

    validate_scoring_rules(questions, rules)
}

fn apply_patch(
    mut definition: CustomAssessmentDefinition,
    patch: AssessmentDefinitionPatch,
) -> CustomAssessmentDefinition {
    if let Some(name) = patch.name {
        definition.name = name;
    }
    if let Some(assessment_type) = patch.assessment_type {
        definition.assessment_type = assessment_type;
    }
    if let Some(category) = patch.category {
        definition.category = Some(category);
    }
    if let Some(description) = patch.description {
        definition.description = Some(description);
    }
    if let Some(questions) = patch.questions {
        definition.questions = questions;
    }
    if let Some(rules) = patch.scoring_rules {
        definition.scoring_rules = Some(rules);
    }
    if !definition.assessment_type.is_scored() {
        definition.scoring_rules = None;
    }
    definition.updated_at = jiff::Timestamp::now();
    definition
}
