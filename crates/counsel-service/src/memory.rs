//! In-process implementations of the collaborator traits.
//!
//! Records are kept as JSON documents under the same keys a blob store
//! would use (see [`counsel_core::store_keys`]).

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use counsel_core::models::definition::CustomAssessmentDefinition;
use counsel_core::models::question::Question;
use counsel_core::models::score::{DateRange, TimedScore};
use counsel_core::store_keys;

use crate::error::{Forbidden, StoreError};
use crate::store::{ActivitySource, DefinitionStore, PermissionChecker, ScoreSource};

#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
    definition_writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of definition records written since the store was created.
    /// Rejected creates and updates leave it unchanged.
    pub fn definition_writes(&self) -> usize {
        self.definition_writes.load(Ordering::Relaxed)
    }

    pub async fn record_score(
        &self,
        subject_id: Uuid,
        category: &str,
        score: TimedScore,
    ) -> Result<(), StoreError> {
        self.append(store_keys::scores(subject_id, category), score)
            .await
    }

    pub async fn record_session(&self, subject_id: Uuid, at: jiff::Timestamp) -> Result<(), StoreError> {
        self.append(store_keys::sessions(subject_id), TimedScore::event(at))
            .await
    }

    pub async fn record_completed_task(
        &self,
        subject_id: Uuid,
        at: jiff::Timestamp,
    ) -> Result<(), StoreError> {
        self.append(store_keys::completed_tasks(subject_id), TimedScore::event(at))
            .await
    }

    async fn append(&self, key: String, point: TimedScore) -> Result<(), StoreError> {
        let mut objects = self.objects.write().await;
        let mut series: Vec<TimedScore> = match objects.get(&key) {
            Some(body) => serde_json::from_slice(body)?,
            None => Vec::new(),
        };
        series.push(point);
        objects.insert(key, serde_json::to_vec(&series)?);
        Ok(())
    }

    async fn read_series(&self, key: &str, range: DateRange) -> Result<Vec<TimedScore>, StoreError> {
        let objects = self.objects.read().await;
        let Some(body) = objects.get(key) else {
            return Ok(Vec::new());
        };
        let series: Vec<TimedScore> = serde_json::from_slice(body)?;
        Ok(series
            .into_iter()
            .filter(|p| range.contains(p.timestamp))
            .collect())
    }
}

impl DefinitionStore for MemoryStore {
    async fn fetch_definition(
        &self,
        id: Uuid,
    ) -> Result<Option<CustomAssessmentDefinition>, StoreError> {
        let objects = self.objects.read().await;
        objects
            .get(&store_keys::definition(id))
            .map(|body| CustomAssessmentDefinition::from_json(body))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn fetch_questions_for_assessment(&self, id: Uuid) -> Result<Vec<Question>, StoreError> {
        self.fetch_definition(id)
            .await?
            .map(|definition| definition.questions)
            .ok_or_else(|| StoreError::NotFound {
                key: store_keys::definition(id),
            })
    }

    async fn save_definition(&self, definition: &CustomAssessmentDefinition) -> Result<(), StoreError> {
        let body = definition.to_json()?;
        self.objects
            .write()
            .await
            .insert(store_keys::definition(definition.id), body);
        self.definition_writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl ScoreSource for MemoryStore {
    async fn fetch_dated_scores(
        &self,
        subject_id: Uuid,
        category: Option<&str>,
        range: DateRange,
    ) -> Result<Vec<TimedScore>, StoreError> {
        if let Some(category) = category {
            return self
                .read_series(&store_keys::scores(subject_id, category), range)
                .await;
        }

        let prefix = store_keys::scores_prefix(subject_id);
        let keys: Vec<String> = {
            let objects = self.objects.read().await;
            objects
                .keys()
                .filter(|k| k.starts_with(&prefix))
                .cloned()
                .collect()
        };

        let mut all = Vec::new();
        for key in &keys {
            all.extend(self.read_series(key, range).await?);
        }
        all.sort_by_key(|p| p.timestamp);
        Ok(all)
    }
}

impl ActivitySource for MemoryStore {
    async fn fetch_sessions(
        &self,
        subject_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<TimedScore>, StoreError> {
        self.read_series(&store_keys::sessions(subject_id), range)
            .await
    }

    async fn fetch_completed_tasks(
        &self,
        subject_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<TimedScore>, StoreError> {
        self.read_series(&store_keys::completed_tasks(subject_id), range)
            .await
    }
}

/// Fixed caller → organization grants.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    grants: HashMap<Uuid, HashSet<Uuid>>,
}

impl StaticPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, caller: Uuid, owner_org_id: Uuid) -> Self {
        self.grants.entry(caller).or_default().insert(owner_org_id);
        self
    }
}

impl PermissionChecker for StaticPermissions {
    async fn assert_caller_may_manage(&self, owner_org_id: Uuid, caller: Uuid) -> Result<(), Forbidden> {
        let allowed = self
            .grants
            .get(&caller)
            .is_some_and(|orgs| orgs.contains(&owner_org_id));
        if allowed {
            Ok(())
        } else {
            Err(Forbidden {
                caller,
                owner_org_id,
            })
        }
    }
}
