//! Storage Module
//!
//! Keeps one text record on disk and exposes it through two operations.
//!
//! ## Core Concepts
//! - **Single slot**: `SlotFile` holds at most one `StorageRecord`; every store replaces it.
//! - **Service**: `StorageService` validates input, stamps records and shapes responses.
//! - **Serialization**: All file access is serialized through one lock inside the service.

pub mod record;
pub mod service;
pub mod slot;

#[cfg(test)]
mod tests;
