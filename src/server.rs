use axum::{
    Extension, Router, middleware,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;

use crate::auth::gate::AuthGate;
use crate::config::ServerConfig;
use crate::http::handlers::{handle_index, handle_retrieve, handle_store, require_auth_key};
use crate::http::protocol::{ENDPOINT_INDEX, ENDPOINT_RETRIEVE, ENDPOINT_STORE};
use crate::realtime::handlers::handle_upgrade;
use crate::realtime::protocol::ENDPOINT_SOCKET;
use crate::storage::service::StorageService;
use crate::storage::slot::SlotFile;

/// Builds the router serving both transports.
///
/// The `auth-key` middleware is attached only to the storage routes; the
/// WebSocket routes authenticate in their own upgrade handler.
pub fn build_router(gate: AuthGate, service: Arc<StorageService>) -> Router {
    let storage_routes = Router::new()
        .route(ENDPOINT_STORE, post(handle_store))
        .route(ENDPOINT_RETRIEVE, post(handle_retrieve))
        .route_layer(middleware::from_fn_with_state(
            gate.clone(),
            require_auth_key,
        ));

    Router::new()
        .route(ENDPOINT_INDEX, get(handle_index))
        .route(ENDPOINT_SOCKET, get(handle_upgrade))
        .merge(storage_routes)
        .layer(Extension(service))
        .layer(Extension(gate))
        .layer(CorsLayer::permissive())
}

/// A running server. Dropping the handle leaves the server running.
pub struct ServerHandle {
    pub local_addr: SocketAddr,
    server: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    /// Waits for the server task to end, propagating its error.
    pub async fn wait(self) -> anyhow::Result<()> {
        self.server.await??;
        Ok(())
    }

    pub fn abort(&self) {
        self.server.abort();
    }
}

/// Binds the listener and starts serving in the background.
///
/// Bind failures are returned to the caller; there is no retry.
pub async fn start(config: ServerConfig) -> anyhow::Result<ServerHandle> {
    let service = Arc::new(StorageService::new(SlotFile::new(config.storage_file.clone())));
    let gate = AuthGate::new(config.auth_key.clone());
    let app = build_router(gate, service);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("Server running on port {}", local_addr.port());
    tracing::info!("Storage file: {}", config.storage_file.display());
    tracing::info!("WebSocket and HTTP endpoints available");

    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    Ok(ServerHandle { local_addr, server })
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
