//! Request dispatch for the real-time design protocol.

use crate::state::AppState;
use atelier_protocol::{
    ClientRequest, ConnectionId, DesignId, DesignSpecification, PluginUpdateKind, ServerEvent,
};
use log::{error, info, warn};

const GENERATE_RETRY_MESSAGE: &str =
    "Sorry, I encountered an error while generating your design. Please try again.";
const MODIFY_RETRY_MESSAGE: &str =
    "Sorry, I encountered an error while modifying your design. Please try again.";
const NOT_FOUND_MESSAGE: &str = "Original design not found.";
const LOOKUP_MESSAGE: &str = "Design not found.";
const MALFORMED_MESSAGE: &str = "Your request was malformed. Please check it and try again.";

/// Decode one inbound frame and dispatch it.
///
/// Malformed frames are a validation failure: answered with a user-safe
/// error event before the generation service or store is touched.
pub async fn handle_frame(state: &AppState, conn_id: ConnectionId, text: &str) {
    match serde_json::from_str::<ClientRequest>(text) {
        Ok(request) => handle_request(state, conn_id, request).await,
        Err(err) => {
            warn!("malformed request (conn_id={conn_id}): {err}");
            state
                .registry
                .send_to(conn_id, &ServerEvent::error(MALFORMED_MESSAGE))
                .await;
        }
    }
}

/// Dispatch a decoded request.
pub async fn handle_request(state: &AppState, conn_id: ConnectionId, request: ClientRequest) {
    match request {
        ClientRequest::GenerateDesign {
            prompt,
            design_type,
            ..
        } => generate(state, conn_id, &prompt, design_type.as_deref()).await,
        ClientRequest::ModifyDesign {
            design_id,
            prompt,
            modification,
        } => modify(state, conn_id, design_id, &prompt, &modification).await,
        ClientRequest::PluginConnect { plugin_name, .. } => {
            plugin_connect(state, conn_id, plugin_name.as_deref()).await
        }
        ClientRequest::RequestDesign { design_id } => {
            request_design(state, conn_id, design_id).await
        }
    }
}

async fn generate(
    state: &AppState,
    conn_id: ConnectionId,
    prompt: &str,
    design_type: Option<&str>,
) {
    state
        .registry
        .send_to(conn_id, &ServerEvent::typing(true))
        .await;
    let result = state.generator.generate(prompt, design_type).await;
    state
        .registry
        .send_to(conn_id, &ServerEvent::typing(false))
        .await;

    match result {
        Ok(design) => {
            state.store.record_design(conn_id, &design);
            let message = format!(
                "I've created a {} based on your description. The design includes {} components and is ready for export.",
                design.design_type,
                design.components.len()
            );
            state
                .registry
                .send_to(
                    conn_id,
                    &ServerEvent::DesignGenerated {
                        success: true,
                        design: design.clone(),
                        message,
                    },
                )
                .await;
            publish_update(state, conn_id, PluginUpdateKind::NewDesign, design).await;
        }
        Err(err) => {
            // Detail stays in the server log; the client sees the retry text.
            error!("design generation failed (conn_id={conn_id}): {err}");
            state
                .registry
                .send_to(conn_id, &ServerEvent::error(GENERATE_RETRY_MESSAGE))
                .await;
        }
    }
}

async fn modify(
    state: &AppState,
    conn_id: ConnectionId,
    design_id: DesignId,
    prompt: &str,
    modification: &str,
) {
    // An unknown id is an expected condition, distinct from generation
    // failure, and must never reach the model.
    let Some(prior) = state.store.get_design(design_id) else {
        info!("modify target missing (conn_id={conn_id}, design_id={design_id})");
        state
            .registry
            .send_to(conn_id, &ServerEvent::error(NOT_FOUND_MESSAGE))
            .await;
        return;
    };

    state
        .registry
        .send_to(conn_id, &ServerEvent::typing(true))
        .await;
    let result = state.generator.modify(&prior, prompt, modification).await;
    state
        .registry
        .send_to(conn_id, &ServerEvent::typing(false))
        .await;

    match result {
        Ok(design) => {
            state.store.record_design(conn_id, &design);
            let message = format!("I've updated your design based on your request: \"{prompt}\"");
            state
                .registry
                .send_to(
                    conn_id,
                    &ServerEvent::DesignModified {
                        success: true,
                        design: design.clone(),
                        message,
                    },
                )
                .await;
            publish_update(state, conn_id, PluginUpdateKind::DesignModified, design).await;
        }
        Err(err) => {
            error!("design modification failed (conn_id={conn_id}): {err}");
            state
                .registry
                .send_to(conn_id, &ServerEvent::error(MODIFY_RETRY_MESSAGE))
                .await;
        }
    }
}

async fn plugin_connect(state: &AppState, conn_id: ConnectionId, plugin_name: Option<&str>) {
    if state.registry.mark_plugin(conn_id) {
        info!(
            "plugin connected (conn_id={conn_id}, name={}, plugins={})",
            plugin_name.unwrap_or("unknown"),
            state.registry.plugin_count()
        );
    }
    state
        .registry
        .send_to(conn_id, &ServerEvent::PluginConnected { success: true })
        .await;
}

async fn request_design(state: &AppState, conn_id: ConnectionId, design_id: DesignId) {
    match state.store.get_design(design_id) {
        Some(design) => {
            state
                .registry
                .send_to(conn_id, &ServerEvent::DesignData { design })
                .await;
        }
        None => {
            state
                .registry
                .send_to(conn_id, &ServerEvent::error(LOOKUP_MESSAGE))
                .await;
        }
    }
}

/// Every successful design event fans out to all other connections, so any
/// listening plugin instance can observe it.
async fn publish_update(
    state: &AppState,
    sender_id: ConnectionId,
    update: PluginUpdateKind,
    design: DesignSpecification,
) {
    state
        .registry
        .broadcast_others(sender_id, &ServerEvent::PluginUpdate { update, design })
        .await;
}
