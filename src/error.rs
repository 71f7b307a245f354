//! Error kinds shared by the storage layer and both transports.
//!
//! Every variant ends up as a plain message string inside the error envelope
//! of whichever transport carried the request, so the `Display` text is part
//! of the wire contract.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller supplied missing or empty input.
    #[error("{0}")]
    InvalidArgument(String),

    /// The record file exists but does not hold a valid record.
    #[error("Stored record is corrupt: {0}")]
    CorruptStorage(#[source] serde_json::Error),

    /// Missing or mismatched shared secret.
    #[error("Unauthorized access")]
    Unauthorized,

    /// Anything else, typically a filesystem failure.
    #[error("{0}")]
    Unknown(String),
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Unknown(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
