//! REST surface over the design history.

use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

/// How many designs `GET /designs` returns.
const RECENT_LIMIT: usize = 20;

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "OK", "timestamp": chrono::Utc::now() }))
}

/// Most recent designs in insertion order.
pub async fn list_designs(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "designs": state.store.list_recent(RECENT_LIMIT) }))
}

/// One design by id, or 404.
pub async fn get_design(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.store.get_design(id) {
        Some(design) => Json(json!({ "design": design })).into_response(),
        None => not_found(),
    }
}

/// Export request body; the access token is accepted but the third-party
/// export integration stays stubbed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub design_id: Uuid,
    pub figma_file_key: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Acknowledge an export of a known design.
pub async fn export_design(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Response {
    if state.store.get_design(request.design_id).is_none() {
        return not_found();
    }
    Json(json!({
        "success": true,
        "message": "Design exported successfully",
        "figmaUrl": format!("https://figma.com/file/{}", request.figma_file_key),
        "exportedAt": chrono::Utc::now(),
    }))
    .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Design not found" })),
    )
        .into_response()
}
