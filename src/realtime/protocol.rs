//! Realtime Frame Protocol
//!
//! Inbound and outbound frame shapes. Both are JSON objects discriminated by
//! a `type` field. `requestId` is opaque: whatever JSON value the client sent
//! is echoed back untouched, and it is omitted when the client sent none.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ServiceError;
use crate::storage::record::{RetrieveOutcome, Status, StorageRecord, StoreOutcome};

/// Dedicated upgrade endpoint. Upgrades on `/` are accepted as well.
pub const ENDPOINT_SOCKET: &str = "/ws";

pub const WELCOME_MESSAGE: &str = "Connected to simple storage server.";
pub const UNKNOWN_OPERATION: &str = "Unknown operation type";

/// Query string of the upgrade request.
#[derive(Debug, Default, Deserialize)]
pub struct ConnectParams {
    #[serde(rename = "authKey")]
    pub auth_key: Option<String>,
}

/// The operation requested by an inbound frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    Store {
        /// Kept loose so a non-string `text` is reported as invalid input
        /// rather than as an unknown operation.
        #[serde(default)]
        text: Option<Value>,
    },
    Retrieve,
    #[serde(other)]
    Unknown,
}

/// A decoded inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundFrame {
    pub operation: Operation,
    pub request_id: Option<Value>,
}

impl InboundFrame {
    /// Decodes a text frame.
    ///
    /// Fails only when `raw` is not JSON at all. Valid JSON with a missing
    /// or unrecognised `type` (including non-object values) decodes as
    /// `Operation::Unknown`.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        let request_id = value.get("requestId").cloned();
        let has_string_tag = matches!(value.get("type"), Some(Value::String(_)));
        let operation = if has_string_tag {
            serde_json::from_value(value).unwrap_or(Operation::Unknown)
        } else {
            Operation::Unknown
        };

        Ok(Self {
            operation,
            request_id,
        })
    }
}

/// Frames sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundFrame {
    Info {
        message: String,
    },
    Store {
        status: Status,
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<StoreOutcome>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
        request_id: Option<Value>,
    },
    Retrieve {
        status: Status,
        #[serde(skip_serializing_if = "Option::is_none")]
        results: Option<Vec<StorageRecord>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
        request_id: Option<Value>,
    },
    Error {
        message: String,
        #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
        request_id: Option<Value>,
    },
}

impl OutboundFrame {
    pub fn welcome() -> Self {
        OutboundFrame::Info {
            message: WELCOME_MESSAGE.to_string(),
        }
    }

    pub fn store(outcome: Result<StoreOutcome, ServiceError>, request_id: Option<Value>) -> Self {
        match outcome {
            Ok(result) => OutboundFrame::Store {
                status: Status::Success,
                result: Some(result),
                message: None,
                request_id,
            },
            Err(e) => OutboundFrame::Store {
                status: Status::Error,
                result: None,
                message: Some(e.to_string()),
                request_id,
            },
        }
    }

    pub fn retrieve(
        outcome: Result<RetrieveOutcome, ServiceError>,
        request_id: Option<Value>,
    ) -> Self {
        match outcome {
            Ok(outcome) => OutboundFrame::Retrieve {
                status: Status::Success,
                results: Some(outcome.results),
                message: None,
                request_id,
            },
            Err(e) => OutboundFrame::Retrieve {
                status: Status::Error,
                results: None,
                message: Some(e.to_string()),
                request_id,
            },
        }
    }

    pub fn unknown_operation(request_id: Option<Value>) -> Self {
        OutboundFrame::Error {
            message: UNKNOWN_OPERATION.to_string(),
            request_id,
        }
    }

    /// Reply to a frame that is not JSON. Carries no `requestId`.
    pub fn malformed(err: &serde_json::Error) -> Self {
        OutboundFrame::Error {
            message: format!("Failed to process message: {}", err),
            request_id: None,
        }
    }
}
