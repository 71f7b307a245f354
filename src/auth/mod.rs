//! Auth Gate
//!
//! A single shared-secret check used at two call sites: the HTTP middleware
//! guarding `/store` and `/retrieve`, and the WebSocket upgrade handshake.

pub mod gate;
