//! WebSocket transport: connection lifecycle and message pumps.

pub mod handlers;

use crate::state::AppState;
use atelier_protocol::ConnectionId;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use log::info;
use tokio::sync::mpsc;
use uuid::Uuid;

const OUTBOUND_BUFFER: usize = 32;

/// Upgrade an HTTP request into a design-protocol socket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id: ConnectionId = Uuid::new_v4();
    info!("connection opened (conn_id={conn_id})");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<String>(OUTBOUND_BUFFER);

    state.registry.add(conn_id, tx);
    state.store.create_session(conn_id);

    let send_task = tokio::spawn(async move {
        while let Some(encoded) = rx.recv().await {
            if sender.send(Message::Text(encoded.into())).await.is_err() {
                break;
            }
        }
    });

    // One connection's requests are handled strictly in arrival order; the
    // loop awaits each handler before reading the next frame. Other
    // connections interleave freely on their own tasks.
    while let Some(Ok(message)) = receiver.next().await {
        match message {
            Message::Text(text) => handlers::handle_frame(&state, conn_id, text.as_str()).await,
            Message::Close(_) => break,
            _ => {}
        }
    }

    state.registry.remove(conn_id);
    state.store.destroy_session(conn_id);
    send_task.abort();
    info!("connection closed (conn_id={conn_id})");
}
