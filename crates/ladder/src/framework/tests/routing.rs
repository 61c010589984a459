use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;

fn post_json(uri: &str, payload: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(payload.to_string()))
        .expect("request builds")
}

fn get(uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::get(uri)
        .body(axum::body::Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn tracks_endpoint_lists_the_content_table() {
    let router = session_router();

    let response = router
        .oneshot(get("/api/v1/tracks"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let tracks = payload.as_array().expect("array payload");
    assert_eq!(tracks.len(), 10);
    assert_eq!(
        tracks[0].get("id").and_then(serde_json::Value::as_str),
        Some("MOBILE")
    );
    assert_eq!(
        tracks[0]
            .get("category")
            .and_then(serde_json::Value::as_str),
        Some("technical")
    );
}

#[tokio::test]
async fn score_endpoint_totals_a_posted_map() {
    let router = session_router();

    let response = router
        .oneshot(post_json(
            "/api/v1/assessments/score",
            json!({ "milestones": { "CRAFT": 5, "COMMUNICATION": 1 } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("total").and_then(serde_json::Value::as_f64), Some(21.0));
}

#[tokio::test]
async fn report_endpoint_reconciles_the_posted_title() {
    let router = session_router();

    let response = router
        .oneshot(post_json(
            "/api/v1/assessments/report",
            json!({
                "name": "Alice",
                "title": "Principal Engineer",
                "milestones": { "FOUNDATIONS": 4 }
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("title").and_then(serde_json::Value::as_str),
        Some("Engineer I")
    );
    assert_eq!(
        payload.get("total_points").and_then(serde_json::Value::as_f64),
        Some(12.0)
    );
    assert!(payload
        .get("next_title")
        .and_then(|next| next.get("points_needed"))
        .and_then(serde_json::Value::as_f64)
        .is_some());
}

#[tokio::test]
async fn session_milestone_endpoint_drives_the_controller() {
    let router = session_router();

    let response = router
        .oneshot(post_json(
            "/api/v1/session/milestone",
            json!({ "track": "FOUNDATIONS", "milestone": 4 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload
            .pointer("/assessment/milestones/FOUNDATIONS")
            .and_then(serde_json::Value::as_i64),
        Some(4)
    );
    assert_eq!(
        payload
            .pointer("/assessment/focused_track")
            .and_then(serde_json::Value::as_str),
        Some("FOUNDATIONS")
    );
    assert_eq!(
        payload.get("fragment").and_then(serde_json::Value::as_str),
        Some("0,0,4,0,0,0,0,0,0,0,,Engineer%20I")
    );
}

#[tokio::test]
async fn session_milestone_clamps_out_of_range_input() {
    let router = session_router();

    let response = router
        .oneshot(post_json(
            "/api/v1/session/milestone",
            json!({ "track": "CRAFT", "milestone": 11 }),
        ))
        .await
        .expect("route executes");

    let payload = read_json_body(response).await;
    assert_eq!(
        payload
            .pointer("/assessment/milestones/CRAFT")
            .and_then(serde_json::Value::as_i64),
        Some(5)
    );
}

#[tokio::test]
async fn share_link_decode_round_trips() {
    let router = session_router();

    let response = router
        .oneshot(get("/api/v1/share/links/1,2"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload
            .pointer("/assessment/milestones/MOBILE")
            .and_then(serde_json::Value::as_i64),
        Some(1)
    );
    assert_eq!(
        payload
            .pointer("/assessment/milestones/WEB_CLIENT")
            .and_then(serde_json::Value::as_i64),
        Some(2)
    );
    assert_eq!(
        payload
            .pointer("/report/eligible_titles/0")
            .and_then(serde_json::Value::as_str),
        Some("Engineer I")
    );
}

#[tokio::test]
async fn share_link_decode_rejects_the_empty_fragment() {
    let router = session_router();

    // %23 decodes to a bare '#', which carries no state.
    let response = router
        .oneshot(get("/api/v1/share/links/%23"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload.get("error").is_some());
}

#[tokio::test]
async fn encode_endpoint_returns_the_fragment() {
    let router = session_router();

    let response = router
        .oneshot(post_json(
            "/api/v1/share/links",
            json!({ "name": "Grace Hopper", "title": "Engineer I", "milestones": { "SERVERS": 2 } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("fragment").and_then(serde_json::Value::as_str),
        Some("0,0,0,2,0,0,0,0,0,0,Grace%20Hopper,Engineer%20I")
    );
}
