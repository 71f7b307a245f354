use std::path::Path;

use tokio::sync::Mutex;

use super::record::{RetrieveOutcome, Status, StorageRecord, StoreOutcome};
use super::slot::SlotFile;
use crate::error::{Result, ServiceError};

/// The `store`/`retrieve` pair both transports dispatch to.
///
/// All file access goes through `io_lock`, so stores are applied one at a
/// time and a retrieve never sees a half-written file. The last store to
/// acquire the lock wins.
pub struct StorageService {
    slot: SlotFile,
    io_lock: Mutex<()>,
}

impl StorageService {
    pub fn new(slot: SlotFile) -> Self {
        Self {
            slot,
            io_lock: Mutex::new(()),
        }
    }

    pub fn storage_path(&self) -> &Path {
        self.slot.path()
    }

    /// Replaces the stored record with a fresh one holding `text`.
    ///
    /// # Errors
    /// * `InvalidArgument` if `text` is absent or empty; nothing is written.
    /// * `Unknown` if the file cannot be written.
    pub async fn store(&self, text: Option<String>) -> Result<StoreOutcome> {
        let text = text
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ServiceError::InvalidArgument("Text is required".to_string()))?;

        let text_length = text.encode_utf16().count();
        tracing::info!("Storing text with length: {}", text_length);

        let record = StorageRecord::new(text);
        {
            let _guard = self.io_lock.lock().await;
            self.slot.write(&record).await?;
        }

        tracing::info!("Successfully stored text with ID: {}", record.id);
        Ok(StoreOutcome {
            status: Status::Success,
            id: record.id,
            text_length,
        })
    }

    /// Returns the stored record, if any. Never mutates state.
    pub async fn retrieve(&self) -> Result<RetrieveOutcome> {
        tracing::info!("Retrieving stored text");

        let record = {
            let _guard = self.io_lock.lock().await;
            self.slot.read().await
        };

        let results = match record {
            Ok(Some(record)) => {
                tracing::info!("Retrieved stored text with ID: {}", record.id);
                vec![record]
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("Error retrieving text: {}", e);
                return Err(e);
            }
        };

        Ok(RetrieveOutcome {
            status: Status::Success,
            results,
        })
    }
}
