//! HTTP Transport
//!
//! Exposes `store` and `retrieve` as authenticated POST endpoints and serves
//! the browser client page on `/`.
//!
//! ## Submodules
//! - **`protocol`**: Endpoint paths, header names and request/error DTOs.
//! - **`handlers`**: Axum handlers and the `auth-key` middleware.

pub mod handlers;
pub mod protocol;
