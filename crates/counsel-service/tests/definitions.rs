use std::sync::Arc;

use counsel_core::models::definition::{
    AssessmentDefinitionPatch, AssessmentType, CustomAssessmentDefinition, NewAssessmentDefinition,
};
use counsel_core::models::question::{Question, QuestionType, RatingScale};
use counsel_core::models::scoring::{CategoryScoring, InterpretationRange, ScoringRules};
use counsel_instruments::error::ValidationError;
use counsel_instruments::scoring::validate_scoring_rules;
use counsel_service::definitions::AssessmentDefinitionService;
use counsel_service::error::{ServiceError, StoreError};
use counsel_service::memory::{MemoryStore, StaticPermissions};
use counsel_service::store::DefinitionStore;
use uuid::Uuid;

struct Fixture {
    store: Arc<MemoryStore>,
    service: AssessmentDefinitionService<MemoryStore, StaticPermissions>,
    counselor: Uuid,
    org: Uuid,
}

fn fixture() -> Fixture {
    let counselor = Uuid::new_v4();
    let org = Uuid::new_v4();
    let store = Arc::new(MemoryStore::new());
    let permissions = Arc::new(StaticPermissions::new().grant(counselor, org));
    Fixture {
        service: AssessmentDefinitionService::new(store.clone(), permissions),
        store,
        counselor,
        org,
    }
}

fn range(max_percent: f64, label: &str) -> InterpretationRange {
    InterpretationRange::new(max_percent, label, format!("{label} symptoms"))
}

fn questions() -> Vec<Question> {
    vec![
        Question::new("q1", "I felt nervous or on edge", QuestionType::RatingScale, "anxiety")
            .with_scale(RatingScale::new(0, 3).with_label(0, "Not at all"))
            .required(),
        Question::new("q2", "I felt down or hopeless", QuestionType::RatingScale, "mood")
            .with_scale(RatingScale::new(0, 3)),
    ]
}

fn rules() -> ScoringRules {
    ScoringRules {
        categories: vec![
            CategoryScoring::new("anxiety", vec![range(50.0, "Low"), range(100.0, "High")]),
            CategoryScoring::new("mood", vec![range(100.0, "Any")]),
        ],
        overall_interpretations: vec![range(100.0, "Any")],
    }
}

fn new_assessment(org: Uuid) -> NewAssessmentDefinition {
    NewAssessmentDefinition {
        owner_org_id: org,
        name: "Weekly check-in".to_string(),
        assessment_type: AssessmentType::CustomAssessment,
        category: Some("wellbeing".to_string()),
        description: None,
        questions: questions(),
        scoring_rules: Some(rules()),
    }
}

#[tokio::test]
async fn valid_assessment_is_stored_unchanged() {
    let f = fixture();
    let input = new_assessment(f.org);

    let created = f.service.create(f.counselor, input.clone()).await.unwrap();
    assert_eq!(created.name, input.name);
    assert_eq!(created.questions, input.questions);
    assert_eq!(created.scoring_rules, input.scoring_rules);
    assert_eq!(created.created_by, f.counselor);

    let stored = f.store.fetch_definition(created.id).await.unwrap().unwrap();
    assert_eq!(stored, created);
    assert_eq!(f.store.definition_writes(), 1);
}

#[tokio::test]
async fn overall_gap_is_rejected_before_write() {
    let f = fixture();
    let mut input = new_assessment(f.org);
    input.scoring_rules.as_mut().unwrap().overall_interpretations = vec![range(90.0, "Any")];

    let err = f.service.create(f.counselor, input).await.unwrap_err();
    match &err {
        ServiceError::Validation(ValidationError::InvalidRangeCoverage { subject, .. }) => {
            assert_eq!(subject, "overall")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.user_message().starts_with("Overall interpretation ranges"));
    assert_eq!(f.store.definition_writes(), 0);
}

#[tokio::test]
async fn unscored_category_names_the_category() {
    let f = fixture();
    let mut input = new_assessment(f.org);
    input.scoring_rules.as_mut().unwrap().categories.pop();

    let err = f.service.create(f.counselor, input).await.unwrap_err();
    assert!(matches!(
        &err,
        ServiceError::Validation(ValidationError::UnscoredCategory(name)) if name == "mood"
    ));
    assert!(err.user_message().contains("\"mood\""));
    assert_eq!(f.store.definition_writes(), 0);
}

#[tokio::test]
async fn scored_assessment_without_rules_is_rejected() {
    let f = fixture();
    let mut input = new_assessment(f.org);
    input.scoring_rules = None;

    let err = f.service.create(f.counselor, input).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MissingScoringRules)
    ));
}

#[tokio::test]
async fn questionnaire_drops_scoring_rules() {
    let f = fixture();
    let mut input = new_assessment(f.org);
    input.assessment_type = AssessmentType::CustomQuestionnaire;

    let created = f.service.create(f.counselor, input).await.unwrap();
    assert_eq!(created.scoring_rules, None);
}

#[tokio::test]
async fn unauthorized_caller_gets_forbidden_before_validation() {
    let f = fixture();
    let mut input = new_assessment(f.org);
    input.questions.clear();

    let err = f.service.create(Uuid::new_v4(), input).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
    assert_eq!(
        err.user_message(),
        "You do not have permission to manage this assessment."
    );
    assert_eq!(f.store.definition_writes(), 0);
}

#[tokio::test]
async fn invalid_question_is_reported_by_text() {
    let f = fixture();
    let mut input = new_assessment(f.org);
    input.questions[1].scale = Some(RatingScale::new(3, 1));

    let err = f.service.create(f.counselor, input).await.unwrap_err();
    assert!(
        err.user_message()
            .starts_with("Question \"I felt down or hopeless\""),
        "{}",
        err.user_message()
    );
}

#[tokio::test]
async fn update_keeps_omitted_fields() {
    let f = fixture();
    let created = f
        .service
        .create(f.counselor, new_assessment(f.org))
        .await
        .unwrap();

    let patch = AssessmentDefinitionPatch {
        name: Some("Renamed check-in".to_string()),
        ..Default::default()
    };
    let updated = f.service.update(f.counselor, created.id, patch).await.unwrap();

    assert_eq!(updated.name, "Renamed check-in");
    assert_eq!(updated.questions, created.questions);
    assert_eq!(updated.scoring_rules, created.scoring_rules);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(f.store.definition_writes(), 2);
}

#[tokio::test]
async fn rules_only_update_is_checked_against_stored_questions() {
    let f = fixture();
    let created = f
        .service
        .create(f.counselor, new_assessment(f.org))
        .await
        .unwrap();

    let mut narrowed = rules();
    narrowed.categories.retain(|c| c.name == "anxiety");
    let patch = AssessmentDefinitionPatch {
        scoring_rules: Some(narrowed),
        ..Default::default()
    };

    let err = f
        .service
        .update(f.counselor, created.id, patch)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::UnscoredCategory(ref name)) if name == "mood"
    ));
    assert_eq!(f.store.definition_writes(), 1);

    let stored = f.store.fetch_definition(created.id).await.unwrap().unwrap();
    assert_eq!(stored.scoring_rules, Some(rules()));
}

#[tokio::test]
async fn new_questions_are_checked_against_stored_rules() {
    let f = fixture();
    let created = f
        .service
        .create(f.counselor, new_assessment(f.org))
        .await
        .unwrap();

    let mut questions = questions();
    questions.push(
        Question::new("q3", "I slept poorly", QuestionType::YesNo, "sleep"),
    );
    let patch = AssessmentDefinitionPatch {
        questions: Some(questions),
        ..Default::default()
    };

    let err = f
        .service
        .update(f.counselor, created.id, patch)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::UnscoredCategory(ref name)) if name == "sleep"
    ));
}

#[tokio::test]
async fn switching_to_questionnaire_clears_rules() {
    let f = fixture();
    let created = f
        .service
        .create(f.counselor, new_assessment(f.org))
        .await
        .unwrap();

    let patch = AssessmentDefinitionPatch {
        assessment_type: Some(AssessmentType::CustomQuestionnaire),
        ..Default::default()
    };
    let updated = f.service.update(f.counselor, created.id, patch).await.unwrap();
    assert_eq!(updated.scoring_rules, None);

    let back = AssessmentDefinitionPatch {
        assessment_type: Some(AssessmentType::CustomAssessment),
        ..Default::default()
    };
    let err = f
        .service
        .update(f.counselor, created.id, back)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MissingScoringRules)
    ));
}

#[tokio::test]
async fn update_by_other_org_is_forbidden() {
    let f = fixture();
    let created = f
        .service
        .create(f.counselor, new_assessment(f.org))
        .await
        .unwrap();

    let outsider = Uuid::new_v4();
    let patch = AssessmentDefinitionPatch {
        name: Some("x".to_string()),
        ..Default::default()
    };
    let err = f.service.update(outsider, created.id, patch).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn update_of_missing_definition_is_not_found() {
    let f = fixture();
    let id = Uuid::new_v4();
    let err = f
        .service
        .update(f.counselor, id, AssessmentDefinitionPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(missing) if missing == id));
}

#[tokio::test]
async fn empty_patch_does_not_write() {
    let f = fixture();
    let created = f
        .service
        .create(f.counselor, new_assessment(f.org))
        .await
        .unwrap();

    let same = f
        .service
        .update(f.counselor, created.id, AssessmentDefinitionPatch::default())
        .await
        .unwrap();
    assert_eq!(same, created);
    assert_eq!(f.store.definition_writes(), 1);
}

/// Drops the "mood" questions from the stored record just before handing
/// the question set back, as a concurrent editor would.
struct ConcurrentEdit {
    inner: Arc<MemoryStore>,
}

impl DefinitionStore for ConcurrentEdit {
    async fn fetch_definition(
        &self,
        id: Uuid,
    ) -> Result<Option<CustomAssessmentDefinition>, StoreError> {
        self.inner.fetch_definition(id).await
    }

    async fn fetch_questions_for_assessment(&self, id: Uuid) -> Result<Vec<Question>, StoreError> {
        if let Some(mut definition) = self.inner.fetch_definition(id).await? {
            definition.questions.retain(|q| q.category == "anxiety");
            self.inner.save_definition(&definition).await?;
        }
        self.inner.fetch_questions_for_assessment(id).await
    }

    async fn save_definition(&self, definition: &CustomAssessmentDefinition) -> Result<(), StoreError> {
        self.inner.save_definition(definition).await
    }
}

#[tokio::test]
async fn rules_only_update_writes_the_questions_it_checked() {
    let f = fixture();
    let created = f
        .service
        .create(f.counselor, new_assessment(f.org))
        .await
        .unwrap();

    let permissions = Arc::new(StaticPermissions::new().grant(f.counselor, f.org));
    let store = Arc::new(ConcurrentEdit {
        inner: f.store.clone(),
    });
    let service = AssessmentDefinitionService::new(store, permissions);

    let mut narrowed = rules();
    narrowed.categories.retain(|c| c.name == "anxiety");
    let patch = AssessmentDefinitionPatch {
        scoring_rules: Some(narrowed.clone()),
        ..Default::default()
    };
    service.update(f.counselor, created.id, patch).await.unwrap();

    let stored = f.store.fetch_definition(created.id).await.unwrap().unwrap();
    assert_eq!(stored.scoring_rules, Some(narrowed.clone()));
    assert!(stored.questions.iter().all(|q| q.category == "anxiety"));
    assert_eq!(validate_scoring_rules(&stored.questions, &narrowed), Ok(()));
}
