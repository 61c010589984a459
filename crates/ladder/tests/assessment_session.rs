//! End-to-end specifications for the assessment session: mutations through the
//! public service facade, persistence through the injected store, and the HTTP
//! router, without reaching into private modules.

mod common {
    use std::sync::{Arc, Mutex};

    use ladder::framework::{
        reference_rules, AssessmentService, FragmentStore, ScoringConfig, SpecialtySelection,
        StoreError,
    };

    #[derive(Default, Clone)]
    pub(super) struct MemoryStore {
        fragment: Arc<Mutex<Option<String>>>,
    }

    impl MemoryStore {
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

    pub(super) fn build_service(
        store: Arc<MemoryStore>,
    ) -> AssessmentService<MemoryStore> {
        AssessmentService::new(
            store,
            ScoringConfig::reference(),
            reference_rules(),
            SpecialtySelection::new(),
        )
    }
}

mod session {
    use std::sync::Arc;

    use ladder::framework::{decode, Milestone, TrackId};

    use super::common::*;

    #[test]
    fn a_full_walkthrough_persists_and_restores() {
        let store = Arc::new(MemoryStore::default());
        let mut service = build_service(store.clone());

        service.set_name("Robin of Locksley");
        service.set_milestone(TrackId::Foundations, Milestone::clamped(4));
        service.set_milestone(TrackId::ProjectManagement, Milestone::clamped(3));
        service.set_milestone(TrackId::Communication, Milestone::clamped(2));
        service.shift_focus(2);
        service.shift_focused_milestone(1);

        let fragment = store.fragment().expect("fragment persisted");
        assert_eq!(fragment, service.fragment());

        // A second session against the same store resumes where the first
        // left off, except for focus, which is not part of the fragment.
        let resumed = build_service(store.clone());
        assert_eq!(resumed.assessment().name, service.assessment().name);
        assert_eq!(resumed.assessment().title, service.assessment().title);
        assert_eq!(
            resumed.assessment().milestones,
            service.assessment().milestones
        );
        assert_eq!(resumed.assessment().focused_track, TrackId::Mobile);
    }

    #[test]
    fn titles_follow_the_score_across_mutations() {
        let store = Arc::new(MemoryStore::default());
        let mut service = build_service(store);

        assert_eq!(service.assessment().title, "Engineer I");

        for track in [
            TrackId::Foundations,
            TrackId::ProjectManagement,
            TrackId::Communication,
            TrackId::Craft,
            TrackId::BusinessAcumen,
            TrackId::AnalyticalThinking,
        ] {
            service.set_milestone(track, Milestone::clamped(4));
        }

        // 6 ordinary tracks at milestone 4 = 72 points.
        assert_eq!(service.total_points(), 72.0);
        assert_eq!(service.assessment().title, "Staff Engineer");

        let decoded = decode(service.fragment()).expect("fragment decodes");
        assert_eq!(decoded.title, "Staff Engineer");
    }
}

mod routing {
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use ladder::framework::framework_router;

    use super::common::*;

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn the_router_exposes_the_session_over_http() {
        let store = Arc::new(MemoryStore::default());
        let service = build_service(store.clone());
        let router = framework_router(Arc::new(Mutex::new(service)));

        let response = router
            .clone()
            .oneshot(
                axum::http::Request::post("/api/v1/session/name")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        json!({ "name": "Alice" }).to_string(),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(
            payload.pointer("/assessment/name").and_then(Value::as_str),
            Some("Alice")
        );

        // The mutation reached the injected store, not just the response.
        assert!(store.fragment().expect("fragment persisted").contains("Alice"));

        let session = router
            .oneshot(
                axum::http::Request::get("/api/v1/session")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        let payload = read_json_body(session).await;
        assert_eq!(
            payload.get("eligible_titles").and_then(Value::as_array).map(Vec::len),
            Some(1)
        );
    }
}
