use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use ladder::framework::{
    reference_rules, AssessmentService, FragmentStore, ScoringConfig, SpecialtySelection,
    StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the address-bar fragment: one slot, last writer
/// wins.
#[derive(Default, Clone)]
pub(crate) struct InMemoryFragmentStore {
    fragment: Arc<Mutex<Option<String>>>,
}

impl FragmentStore for InMemoryFragmentStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.fragment.lock().expect("fragment mutex poisoned").clone())
    }

    fn save(&self, fragment: &str) -> Result<(), StoreError> {
        *self.fragment.lock().expect("fragment mutex poisoned") = Some(fragment.to_string());
        Ok(())
    }
}

impl InMemoryFragmentStore {
    pub(crate) fn fragment(&self) -> Option<String> {
        self.fragment.lock().expect("fragment mutex poisoned").clone()
    }
}

pub(crate) fn reference_service(
    store: Arc<InMemoryFragmentStore>,
) -> AssessmentService<InMemoryFragmentStore> {
    AssessmentService::new(
        store,
        ScoringConfig::reference(),
        reference_rules(),
        SpecialtySelection::new(),
    )
}
