//! Shared application state and route assembly.

use crate::registry::ConnectionRegistry;
use crate::{rest, ws};
use atelier_core::{DesignStore, GenerationService};
use axum::Router;
use axum::routing::{any, get, post};
use std::sync::Arc;

/// State injected into the router and REST handlers.
///
/// The store and generator are constructed once at process start; nothing in
/// the server reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DesignStore>,
    pub generator: Arc<GenerationService>,
    pub registry: Arc<ConnectionRegistry>,
}

impl AppState {
    /// Assemble state from the process-scoped store and generation service.
    pub fn new(store: Arc<DesignStore>, generator: Arc<GenerationService>) -> Self {
        Self {
            store,
            generator,
            registry: Arc::new(ConnectionRegistry::new()),
        }
    }
}

/// Build the full HTTP + WebSocket router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ws", any(ws::ws_handler))
        .route("/health", get(rest::health))
        .route("/designs", get(rest::list_designs))
        .route("/designs/{id}", get(rest::get_design))
        .route("/export", post(rest::export_design))
        .with_state(state)
}
