//! Storage Module Tests
//!
//! Validates the single-slot file and the store/retrieve service.
//!
//! ## Test Scopes
//! - **SlotFile**: Missing file, overwrite, corrupt content and on-disk format.
//! - **StorageService**: Validation, response shaping and last-writer-wins behaviour.

#[cfg(test)]
mod tests {
    use crate::error::ServiceError;
    use crate::storage::record::{Status, StorageRecord};
    use crate::storage::service::StorageService;
    use crate::storage::slot::SlotFile;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn service_in(dir: &TempDir) -> StorageService {
        StorageService::new(SlotFile::new(dir.path().join("temp.txt")))
    }

    // ============================================================
    // SLOT FILE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_read_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let slot = SlotFile::new(dir.path().join("absent.json"));

        assert!(slot.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_returns_record() {
        let dir = TempDir::new().unwrap();
        let slot = SlotFile::new(dir.path().join("slot.json"));
        let record = StorageRecord::new("hello".to_string());

        slot.write(&record).await.unwrap();

        assert_eq!(slot.read().await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_write_is_pretty_printed_single_object() {
        let dir = TempDir::new().unwrap();
        let slot = SlotFile::new(dir.path().join("slot.json"));
        let record = StorageRecord {
            id: 1_700_000_000_000,
            text: "pretty".to_string(),
            timestamp: "2023-11-14T22:13:20.000Z".to_string(),
        };

        slot.write(&record).await.unwrap();

        let contents = std::fs::read_to_string(slot.path()).unwrap();
        assert_eq!(
            contents,
            "{\n  \"id\": 1700000000000,\n  \"text\": \"pretty\",\n  \"timestamp\": \"2023-11-14T22:13:20.000Z\"\n}"
        );
    }

    #[tokio::test]
    async fn test_read_corrupt_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slot.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = SlotFile::new(path).read().await.unwrap_err();
        assert!(matches!(err, ServiceError::CorruptStorage(_)));
    }

    #[tokio::test]
    async fn test_read_wrong_shape_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slot.json");
        std::fs::write(&path, r#"{"id": "nope", "text": 5}"#).unwrap();

        let err = SlotFile::new(path).read().await.unwrap_err();
        assert!(matches!(err, ServiceError::CorruptStorage(_)));
    }

    #[tokio::test]
    async fn test_read_ignores_extra_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slot.json");
        std::fs::write(
            &path,
            r#"{"id": 7, "text": "kept", "timestamp": "2024-01-01T00:00:00.000Z", "owner": "x"}"#,
        )
        .unwrap();

        let record = SlotFile::new(path).read().await.unwrap().unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.text, "kept");
    }

    #[test]
    fn test_record_timestamp_is_iso_millis_utc() {
        let record = StorageRecord::new("t".to_string());

        assert!(record.timestamp.ends_with('Z'));
        assert_eq!(record.timestamp.len(), "2024-01-01T00:00:00.000Z".len());
        assert!(record.id > 0);
    }

    // ============================================================
    // STORAGE SERVICE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_retrieve_on_fresh_system_is_empty() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);

        let outcome = service.retrieve().await.unwrap();
        assert_eq!(outcome.status, Status::Success);
        assert!(outcome.results.is_empty());
    }

    #[tokio::test]
    async fn test_store_then_retrieve_returns_text() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);

        let stored = service.store(Some("hello world".to_string())).await.unwrap();
        assert_eq!(stored.status, Status::Success);
        assert_eq!(stored.text_length, 11);

        let outcome = service.retrieve().await.unwrap();
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].text, "hello world");
        assert_eq!(outcome.results[0].id, stored.id);
    }

    #[tokio::test]
    async fn test_store_counts_utf16_code_units() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);

        // Multi-byte but single unit each
        let stored = service.store(Some("zażółć".to_string())).await.unwrap();
        assert_eq!(stored.text_length, 6);

        // Astral characters take a surrogate pair
        let stored = service.store(Some("a😀".to_string())).await.unwrap();
        assert_eq!(stored.text_length, 3);
    }

    #[tokio::test]
    async fn test_store_empty_text_is_rejected_without_writing() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);

        let err = service.store(Some(String::new())).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
        assert_eq!(err.to_string(), "Text is required");
        assert!(!service.storage_path().exists());
    }

    #[tokio::test]
    async fn test_store_missing_text_is_rejected_without_modifying() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        service.store(Some("original".to_string())).await.unwrap();
        let before = std::fs::read_to_string(service.storage_path()).unwrap();

        let err = service.store(None).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));

        let after = std::fs::read_to_string(service.storage_path()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_second_store_overwrites_first() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);

        service.store(Some("first".to_string())).await.unwrap();
        service.store(Some("second".to_string())).await.unwrap();

        let outcome = service.retrieve().await.unwrap();
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].text, "second");
    }

    #[tokio::test]
    async fn test_retrieve_does_not_mutate_file() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        service.store(Some("stable".to_string())).await.unwrap();
        let before = std::fs::read_to_string(service.storage_path()).unwrap();

        service.retrieve().await.unwrap();
        service.retrieve().await.unwrap();

        let after = std::fs::read_to_string(service.storage_path()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_retrieve_corrupt_file_surfaces_error() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        std::fs::write(service.storage_path(), "garbage").unwrap();

        let err = service.retrieve().await.unwrap_err();
        assert!(matches!(err, ServiceError::CorruptStorage(_)));
    }

    #[tokio::test]
    async fn test_concurrent_stores_leave_one_complete_record() {
        let dir = TempDir::new().unwrap();
        let service = Arc::new(service_in(&dir));

        let mut handles = Vec::new();
        for i in 0..20 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.store(Some(format!("writer-{}", i))).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let outcome = service.retrieve().await.unwrap();
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.results[0].text.starts_with("writer-"));
    }
}
