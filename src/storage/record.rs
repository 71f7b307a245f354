//! Storage Data Types
//!
//! The persisted record and the response payloads produced by the storage
//! service. The same payloads are serialized verbatim by the HTTP transport
//! and embedded inside realtime frames.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The single persisted text entry.
///
/// `id` is the creation time in milliseconds since the epoch and is not
/// guaranteed unique across rapid writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRecord {
    pub id: u64,
    pub text: String,
    /// ISO-8601 creation time, e.g. `2024-05-01T12:00:00.000Z`.
    pub timestamp: String,
}

impl StorageRecord {
    /// Stamps `text` with the current time.
    pub fn new(text: String) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis() as u64,
            text,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Outcome marker carried by every successful (and realtime failed) response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Result of a successful `store`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOutcome {
    pub status: Status,
    pub id: u64,
    /// Length of the stored text in UTF-16 code units, as browsers count it.
    pub text_length: usize,
}

/// Result of a successful `retrieve`.
///
/// `results` never holds more than one record; the list shape is kept so
/// clients do not need to special-case the empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveOutcome {
    pub status: Status,
    pub results: Vec<StorageRecord>,
}
