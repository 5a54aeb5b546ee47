//! REST handler integration tests.

use atelier_core::{DesignStore, GenerationService};
use atelier_protocol::ModelProvider;
use atelier_server::rest::{self, ExportRequest};
use atelier_server::state::AppState;
use atelier_test_utils::FixedModel;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

const DASHBOARD_RESPONSE: &str = r#"{
    "type": "dashboard",
    "title": "Analytics",
    "components": [
        { "id": "stats-1", "type": "stats-cards", "properties": { "count": 4 } }
    ]
}"#;

fn state() -> AppState {
    let provider: Arc<dyn ModelProvider> = Arc::new(FixedModel::new(DASHBOARD_RESPONSE));
    AppState::new(
        Arc::new(DesignStore::new()),
        Arc::new(GenerationService::new(provider)),
    )
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_reports_ok_with_a_timestamp() {
    let response = rest::health().await.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn list_designs_caps_at_the_last_twenty() {
    let state = state();
    let conn_id = Uuid::new_v4();
    state.store.create_session(conn_id);
    for i in 0..25 {
        let spec = state
            .generator
            .generate(&format!("design {i}"), None)
            .await
            .expect("generate");
        state.store.record_design(conn_id, &spec);
    }

    let response = rest::list_designs(State(state)).await.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let designs = body["designs"].as_array().expect("designs");
    assert_eq!(designs.len(), 20);
    assert_eq!(designs[0]["prompt"], "design 5");
    assert_eq!(designs[19]["prompt"], "design 24");
}

#[tokio::test]
async fn get_design_returns_the_design_or_404() {
    let state = state();
    let conn_id = Uuid::new_v4();
    state.store.create_session(conn_id);
    let spec = state
        .generator
        .generate("a dashboard", Some("dashboard"))
        .await
        .expect("generate");
    state.store.record_design(conn_id, &spec);

    let response = rest::get_design(State(state.clone()), Path(spec.id))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["design"]["id"], spec.id.to_string());

    let response = rest::get_design(State(state), Path(Uuid::new_v4()))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn export_acknowledges_known_designs_only() {
    let state = state();
    let conn_id = Uuid::new_v4();
    state.store.create_session(conn_id);
    let spec = state
        .generator
        .generate("a dashboard", Some("dashboard"))
        .await
        .expect("generate");
    state.store.record_design(conn_id, &spec);

    let response = rest::export_design(
        State(state.clone()),
        Json(ExportRequest {
            design_id: spec.id,
            figma_file_key: "abc123".to_string(),
            access_token: None,
        }),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["figmaUrl"], "https://figma.com/file/abc123");

    let response = rest::export_design(
        State(state),
        Json(ExportRequest {
            design_id: Uuid::new_v4(),
            figma_file_key: "abc123".to_string(),
            access_token: None,
        }),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
