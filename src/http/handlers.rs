use axum::{
    Extension, Json,
    extract::{Query, Request, State, rejection::JsonRejection, ws::WebSocketUpgrade},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use super::protocol::{AUTH_HEADER, ErrorResponse, StoreRequest};
use crate::auth::gate::AuthGate;
use crate::realtime::handlers::handle_upgrade;
use crate::realtime::protocol::ConnectParams;
use crate::storage::record::{RetrieveOutcome, StoreOutcome};
use crate::storage::service::StorageService;

const CLIENT_PAGE: &str = include_str!("client.html");

type ErrorReply = (StatusCode, Json<ErrorResponse>);

/// Rejects requests whose `auth-key` header does not match before the body is read.
pub async fn require_auth_key(
    State(gate): State<AuthGate>,
    request: Request,
    next: Next,
) -> Response {
    let key = request
        .headers()
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Err(e) = gate.verify(key) {
        tracing::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
        return (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(e.to_string()))).into_response();
    }

    next.run(request).await
}

pub async fn handle_store(
    Extension(service): Extension<Arc<StorageService>>,
    body: Result<Json<StoreRequest>, JsonRejection>,
) -> Result<Json<StoreOutcome>, ErrorReply> {
    let text = match body {
        Ok(Json(req)) => req.text,
        // No JSON body at all is the same as a body without `text`.
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => {
            tracing::error!("Error in /store: {}", rejection.body_text());
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!(
                    "Failed to store text: Invalid JSON body: {}",
                    rejection.body_text()
                ))),
            ));
        }
    };

    match service.store(text).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => {
            tracing::error!("Error in /store: {}", e);
            Err(internal_error(format!("Failed to store text: {}", e)))
        }
    }
}

pub async fn handle_retrieve(
    Extension(service): Extension<Arc<StorageService>>,
) -> Result<Json<RetrieveOutcome>, ErrorReply> {
    match service.retrieve().await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => {
            tracing::error!("Error in /retrieve: {}", e);
            Err(internal_error(format!("Retrieval failed: {}", e)))
        }
    }
}

/// Serves the client page, or hands WebSocket upgrades to the realtime transport.
///
/// The query string only matters for upgrades; an unparseable one yields no
/// `authKey`, which the handshake then refuses.
pub async fn handle_index(
    upgrade: Option<WebSocketUpgrade>,
    params: Option<Query<ConnectParams>>,
    gate: Extension<AuthGate>,
    service: Extension<Arc<StorageService>>,
) -> Response {
    match upgrade {
        Some(ws) => {
            let params = params.map(|Query(params)| params).unwrap_or_default();
            handle_upgrade(ws, Query(params), gate, service).await
        }
        None => Html(CLIENT_PAGE).into_response(),
    }
}

fn internal_error(message: String) -> ErrorReply {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
}
