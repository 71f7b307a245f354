//! Single-Slot Text Storage Server
//!
//! Stores one text record on disk and serves it over two transports that
//! share the same `store`/`retrieve` pair.
//!
//! ## Modules
//! - **`storage`**: The record type, the single-slot file and the storage service.
//! - **`auth`**: Shared-secret gate used by both transports.
//! - **`http`**: `POST /store` and `POST /retrieve`, guarded by the `auth-key` header.
//! - **`realtime`**: JSON frames over WebSocket, authenticated once via the `authKey` query parameter.
//! - **`server`**: Router assembly, listener startup and signal handling.
//! - **`config`**: Environment-driven settings.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod realtime;
pub mod server;
pub mod storage;
