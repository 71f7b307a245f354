//! HTTP Protocol
//!
//! Paths and payloads of the HTTP surface. Success bodies are the storage
//! service outcomes themselves (`StoreOutcome`, `RetrieveOutcome`).

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Client page, also accepts WebSocket upgrades.
pub const ENDPOINT_INDEX: &str = "/";
/// Replaces the stored text.
pub const ENDPOINT_STORE: &str = "/store";
/// Returns the stored text, if any. The request body is ignored.
pub const ENDPOINT_RETRIEVE: &str = "/retrieve";

/// Header carrying the shared secret on HTTP requests.
pub const AUTH_HEADER: &str = "auth-key";

// --- Data Transfer Objects ---

/// Body of `POST /store`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreRequest {
    pub text: Option<String>,
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
