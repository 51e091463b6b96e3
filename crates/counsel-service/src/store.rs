//! Collaborator seams. Implementations own persistence, querying, and
//! permission resolution; the services only call through these traits.

use std::future::Future;

use uuid::Uuid;

use counsel_core::models::definition::CustomAssessmentDefinition;
use counsel_core::models::question::Question;
use counsel_core::models::score::{DateRange, TimedScore};

use crate::error::{Forbidden, StoreError};

pub trait DefinitionStore: Send + Sync {
    fn fetch_definition(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<CustomAssessmentDefinition>, StoreError>> + Send;

    /// The question set currently stored for a definition.
    fn fetch_questions_for_assessment(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Vec<Question>, StoreError>> + Send;

    /// Persist a validated definition, replacing any previous version.
    fn save_definition(
        &self,
        definition: &CustomAssessmentDefinition,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

pub trait ScoreSource: Send + Sync {
    /// Completed-assessment totals for a subject inside `range`. `category`
    /// is an instrument id or custom category; `None` means every category.
    fn fetch_dated_scores(
        &self,
        subject_id: Uuid,
        category: Option<&str>,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<TimedScore>, StoreError>> + Send;
}

pub trait ActivitySource: Send + Sync {
    /// One event per counseling session held.
    fn fetch_sessions(
        &self,
        subject_id: Uuid,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<TimedScore>, StoreError>> + Send;

    /// One event per homework task completed.
    fn fetch_completed_tasks(
        &self,
        subject_id: Uuid,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<TimedScore>, StoreError>> + Send;
}

pub trait PermissionChecker: Send + Sync {
    fn assert_caller_may_manage(
        &self,
        owner_org_id: Uuid,
        caller: Uuid,
    ) -> impl Future<Output = Result<(), Forbidden>> + Send;
}
