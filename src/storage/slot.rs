//! Single-slot record file.
//!
//! The file at `path` holds at most one `StorageRecord`, pretty-printed as
//! JSON. A missing file means the slot is empty. Writes replace the whole
//! file in place; there is no temp-file/rename step, so a crash mid-write
//! leaves a truncated file that later reads report as `CorruptStorage`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::record::StorageRecord;
use crate::error::{Result, ServiceError};

pub struct SlotFile {
    path: PathBuf,
}

impl SlotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the slot with `record`.
    pub async fn write(&self, record: &StorageRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| ServiceError::Unknown(e.to_string()))?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Returns the stored record, or `None` when the file does not exist.
    pub async fn read(&self) -> Result<Option<StorageRecord>> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&data)
            .map(Some)
            .map_err(ServiceError::CorruptStorage)
    }
}
