use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::framework::domain::{Milestone, MilestoneMap, SpecialtySelection, TrackId};
use crate::framework::router::framework_router;
use crate::framework::scoring::{ScoringConfig, ScoringEngine};
use crate::framework::service::AssessmentService;
use crate::framework::store::{FragmentStore, StoreError};
use crate::framework::titles::{reference_rules, TitleResolver};

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::reference())
}

pub(super) fn resolver() -> TitleResolver {
    TitleResolver::reference()
}

pub(super) fn no_specialties() -> SpecialtySelection {
    SpecialtySelection::new()
}

pub(super) fn map_with(entries: &[(TrackId, u8)]) -> MilestoneMap {
    let mut map = MilestoneMap::new();
    for (track, milestone) in entries {
        map.set(*track, Milestone::clamped(*milestone as i64));
    }
    map
}

/// Store that remembers the last saved fragment, like the address bar did.
#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    fragment: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub(super) fn seeded(fragment: &str) -> Self {
        Self {
            fragment: Arc::new(Mutex::new(Some(fragment.to_string()))),
        }
    }

    pub(super) fn fragment(&self) -> Option<String> {
        self.fragment.lock().expect("lock").clone()
    }
}

impl FragmentStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.fragment.lock().expect("lock").clone())
    }

    fn save(&self, fragment: &str) -> Result<(), StoreError> {
        *self.fragment.lock().expect("lock") = Some(fragment.to_string());
        Ok(())
    }
}

/// Store that always fails, for the mutations-survive-persistence-outage path.
pub(super) struct FailingStore;

impl FragmentStore for FailingStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn save(&self, _fragment: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

pub(super) fn build_service() -> (AssessmentService<MemoryStore>, Arc<MemoryStore>) {
    build_service_with(MemoryStore::default(), no_specialties())
}

pub(super) fn build_service_with(
    store: MemoryStore,
    specialties: SpecialtySelection,
) -> (AssessmentService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(store);
    let service = AssessmentService::new(
        store.clone(),
        ScoringConfig::reference(),
        reference_rules(),
        specialties,
    );
    (service, store)
}

pub(super) fn session_router() -> axum::Router {
    let (service, _) = build_service();
    framework_router(Arc::new(Mutex::new(service)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
