use std::fmt;
use std::sync::Arc;

use crate::error::{Result, ServiceError};

/// Compares caller-supplied keys against the configured secret.
#[derive(Clone)]
pub struct AuthGate {
    secret: Arc<str>,
}

impl AuthGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
        }
    }

    /// Absent keys are always rejected.
    pub fn is_authorized(&self, candidate: Option<&str>) -> bool {
        match candidate {
            Some(key) => constant_time_eq(key.as_bytes(), self.secret.as_bytes()),
            None => false,
        }
    }

    pub fn verify(&self, candidate: Option<&str>) -> Result<()> {
        if self.is_authorized(candidate) {
            Ok(())
        } else {
            Err(ServiceError::Unauthorized)
        }
    }
}

impl fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGate")
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Byte comparison whose running time depends only on the input lengths.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
