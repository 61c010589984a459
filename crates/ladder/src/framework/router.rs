use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::codec;
use super::domain::{Assessment, Milestone, MilestoneMap, SpecialtySelection, TrackId};
use super::report::{self, AssessmentReport};
use super::scoring::ScoreBreakdown;
use super::service::AssessmentService;
use super::store::FragmentStore;
use super::tracks::{Track, TRACKS};

type SharedService<S> = Arc<Mutex<AssessmentService<S>>>;

/// Router builder exposing scoring, share-link, and session endpoints.
///
/// The session endpoints drive the five mutation entry points against the one
/// shared session; the rest are stateless computations over request payloads.
pub fn framework_router<S>(service: SharedService<S>) -> Router
where
    S: FragmentStore + 'static,
{
    Router::new()
        .route("/api/v1/tracks", get(tracks_handler))
        .route("/api/v1/assessments/score", post(score_handler::<S>))
        .route("/api/v1/assessments/report", post(report_handler::<S>))
        .route("/api/v1/share/links", post(encode_handler::<S>))
        .route("/api/v1/share/links/:fragment", get(decode_handler::<S>))
        .route("/api/v1/session", get(session_handler::<S>))
        .route("/api/v1/session/name", post(set_name_handler::<S>))
        .route("/api/v1/session/milestone", post(set_milestone_handler::<S>))
        .route("/api/v1/session/title", post(set_title_handler::<S>))
        .route("/api/v1/session/focus", post(shift_focus_handler::<S>))
        .route(
            "/api/v1/session/focused-milestone",
            post(shift_milestone_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) milestones: MilestoneMap,
    #[serde(default)]
    pub(crate) specialties: SpecialtySelection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportRequest {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) title: String,
    pub(crate) milestones: MilestoneMap,
    #[serde(default)]
    pub(crate) specialties: SpecialtySelection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EncodeRequest {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) title: String,
    pub(crate) milestones: MilestoneMap,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NameRequest {
    pub(crate) name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MilestoneRequest {
    pub(crate) track: TrackId,
    pub(crate) milestone: Milestone,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TitleRequest {
    pub(crate) title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeltaRequest {
    pub(crate) delta: i32,
}

/// Read-only session snapshot returned by every session endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct SessionView {
    pub(crate) assessment: Assessment,
    pub(crate) eligible_titles: Vec<String>,
    pub(crate) total_points: f64,
    pub(crate) fragment: String,
}

fn session_view<S>(service: &AssessmentService<S>) -> SessionView
where
    S: FragmentStore,
{
    SessionView {
        assessment: service.assessment().clone(),
        eligible_titles: service.eligible_titles().to_vec(),
        total_points: service.total_points(),
        fragment: service.fragment().to_string(),
    }
}

pub(crate) async fn tracks_handler() -> Json<&'static [Track]> {
    Json(TRACKS.as_slice())
}

pub(crate) async fn score_handler<S>(
    State(service): State<SharedService<S>>,
    Json(request): Json<ScoreRequest>,
) -> Json<ScoreBreakdown>
where
    S: FragmentStore + 'static,
{
    let guard = service.lock().expect("session mutex poisoned");
    Json(
        guard
            .scoring()
            .score_breakdown(&request.milestones, &request.specialties),
    )
}

pub(crate) async fn report_handler<S>(
    State(service): State<SharedService<S>>,
    Json(request): Json<ReportRequest>,
) -> Json<AssessmentReport>
where
    S: FragmentStore + 'static,
{
    let guard = service.lock().expect("session mutex poisoned");
    let mut assessment = Assessment {
        name: request.name,
        milestones: request.milestones,
        title: request.title,
        ..Assessment::empty()
    };
    let (_, title) = guard.titles().reconcile(
        guard.scoring(),
        &assessment.milestones,
        &request.specialties,
        &assessment.title,
    );
    assessment.title = title;
    Json(report::build_report(
        guard.scoring(),
        guard.titles(),
        &assessment,
        &request.specialties,
    ))
}

pub(crate) async fn encode_handler<S>(
    State(_service): State<SharedService<S>>,
    Json(request): Json<EncodeRequest>,
) -> Json<serde_json::Value>
where
    S: FragmentStore + 'static,
{
    let assessment = Assessment {
        name: request.name,
        milestones: request.milestones,
        title: request.title,
        ..Assessment::empty()
    };
    Json(json!({ "fragment": codec::encode(&assessment) }))
}

pub(crate) async fn decode_handler<S>(
    State(service): State<SharedService<S>>,
    Path(fragment): Path<String>,
) -> Response
where
    S: FragmentStore + 'static,
{
    match codec::decode(&fragment) {
        Some(mut assessment) => {
            let guard = service.lock().expect("session mutex poisoned");
            let none = SpecialtySelection::new();
            let (_, title) = guard.titles().reconcile(
                guard.scoring(),
                &assessment.milestones,
                &none,
                &assessment.title,
            );
            assessment.title = title;
            let report = report::build_report(guard.scoring(), guard.titles(), &assessment, &none);
            (
                StatusCode::OK,
                Json(json!({ "assessment": assessment, "report": report })),
            )
                .into_response()
        }
        None => {
            let payload = json!({ "error": "empty share fragment" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn session_handler<S>(State(service): State<SharedService<S>>) -> Json<SessionView>
where
    S: FragmentStore + 'static,
{
    let guard = service.lock().expect("session mutex poisoned");
    Json(session_view(&guard))
}

pub(crate) async fn set_name_handler<S>(
    State(service): State<SharedService<S>>,
    Json(request): Json<NameRequest>,
) -> Json<SessionView>
where
    S: FragmentStore + 'static,
{
    let mut guard = service.lock().expect("session mutex poisoned");
    guard.set_name(request.name);
    Json(session_view(&guard))
}

pub(crate) async fn set_milestone_handler<S>(
    State(service): State<SharedService<S>>,
    Json(request): Json<MilestoneRequest>,
) -> Json<SessionView>
where
    S: FragmentStore + 'static,
{
    let mut guard = service.lock().expect("session mutex poisoned");
    guard.set_milestone(request.track, request.milestone);
    Json(session_view(&guard))
}

pub(crate) async fn set_title_handler<S>(
    State(service): State<SharedService<S>>,
    Json(request): Json<TitleRequest>,
) -> Json<SessionView>
where
    S: FragmentStore + 'static,
{
    let mut guard = service.lock().expect("session mutex poisoned");
    guard.set_title(request.title);
    Json(session_view(&guard))
}

pub(crate) async fn shift_focus_handler<S>(
    State(service): State<SharedService<S>>,
    Json(request): Json<DeltaRequest>,
) -> Json<SessionView>
where
    S: FragmentStore + 'static,
{
    let mut guard = service.lock().expect("session mutex poisoned");
    guard.shift_focus(request.delta);
    Json(session_view(&guard))
}

pub(crate) async fn shift_milestone_handler<S>(
    State(service): State<SharedService<S>>,
    Json(request): Json<DeltaRequest>,
) -> Json<SessionView>
where
    S: FragmentStore + 'static,
{
    let mut guard = service.lock().expect("session mutex poisoned");
    guard.shift_focused_milestone(request.delta);
    Json(session_view(&guard))
}
