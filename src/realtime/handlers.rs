use axum::{
    Extension,
    extract::{
        Query,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;

use super::protocol::{ConnectParams, InboundFrame, Operation, OutboundFrame};
use crate::auth::gate::AuthGate;
use crate::http::protocol::ErrorResponse;
use crate::storage::service::StorageService;

/// Authenticates the handshake and upgrades the connection.
///
/// A bad or missing `authKey` is answered with 401 and the upgrade never
/// happens, so no session is created.
pub async fn handle_upgrade(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    Extension(gate): Extension<AuthGate>,
    Extension(service): Extension<Arc<StorageService>>,
) -> Response {
    if let Err(e) = gate.verify(params.auth_key.as_deref()) {
        tracing::warn!("Refused WebSocket upgrade: {}", e);
        return (
            StatusCode::UNAUTHORIZED,
            axum::Json(ErrorResponse::new(e.to_string())),
        )
            .into_response();
    }

    ws.on_upgrade(move |socket| run_session(socket, service))
}

/// Serves one authenticated connection until the peer goes away.
async fn run_session(mut socket: WebSocket, service: Arc<StorageService>) {
    tracing::info!("New WebSocket connection established (authenticated)");

    if let Err(e) = send_frame(&mut socket, &OutboundFrame::welcome()).await {
        tracing::warn!("Failed to send welcome frame: {}", e);
        return;
    }

    while let Some(message) = socket.recv().await {
        let raw = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Binary(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
            Ok(Message::Close(_)) => break,
            // Ping/pong are answered by the socket itself.
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!("WebSocket receive error: {}", e);
                break;
            }
        };

        let reply = dispatch(&service, &raw).await;
        if let Err(e) = send_frame(&mut socket, &reply).await {
            tracing::debug!("WebSocket send error: {}", e);
            break;
        }
    }

    tracing::info!("WebSocket connection closed");
}

/// Runs one inbound frame against the storage service and builds the reply.
pub async fn dispatch(service: &StorageService, raw: &str) -> OutboundFrame {
    let frame = match InboundFrame::parse(raw) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::error!("Error processing WebSocket message: {}", e);
            return OutboundFrame::malformed(&e);
        }
    };

    match frame.operation {
        Operation::Store { text } => {
            tracing::info!("(websocket) store command");
            OutboundFrame::store(service.store(text_argument(text)).await, frame.request_id)
        }
        Operation::Retrieve => {
            tracing::info!("(websocket) retrieve command");
            OutboundFrame::retrieve(service.retrieve().await, frame.request_id)
        }
        Operation::Unknown => {
            tracing::debug!("Unknown WebSocket operation");
            OutboundFrame::unknown_operation(frame.request_id)
        }
    }
}

/// Only string values count as text; anything else is treated as absent.
fn text_argument(text: Option<Value>) -> Option<String> {
    match text {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

async fn send_frame(socket: &mut WebSocket, frame: &OutboundFrame) -> Result<(), axum::Error> {
    let payload = serde_json::to_string(frame).map_err(axum::Error::new)?;
    socket.send(Message::Text(payload)).await
}
