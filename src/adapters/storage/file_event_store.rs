//! File-based Event Store Adapter
//!
//! Stores each user's event log as a single JSON or YAML file on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::file_codec::{read_list, user_file, write_list, CodecError};
use crate::config::StoreFormat;
use crate::domain::behavior::BehaviorEvent;
use crate::domain::foundation::UserId;
use crate::ports::{EventStore, EventStoreError};

/// File-based storage for event logs
#[derive(Debug, Clone)]
pub struct FileEventStore {
    base_path: PathBuf,
    format: StoreFormat,
}

impl FileEventStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileEventStore::new("./data/events", StoreFormat::Json);
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, format: StoreFormat) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            format,
        }
    }

    /// Path of the log file for a user
    pub fn log_path(&self, user_id: &UserId) -> PathBuf {
        user_file(&self.base_path, user_id, "events", self.format)
    }
}

#[async_trait]
impl EventStore for FileEventStore {
    async fn read_all(&self, user_id: &UserId) -> Result<Vec<BehaviorEvent>, EventStoreError> {
        read_list(&self.log_path(user_id), self.format)
            .await
            .map_err(|e| match e {
                CodecError::Io(msg) => EventStoreError::Read(msg),
                CodecError::Format(msg) => EventStoreError::Serialization(msg),
            })
    }

    async fn write_all(
        &self,
        user_id: &UserId,
        events: &[BehaviorEvent],
    ) -> Result<(), EventStoreError> {
        write_list(&self.log_path(user_id), self.format, events)
            .await
            .map_err(|e| match e {
                CodecError::Io(msg) => EventStoreError::Write(msg),
                CodecError::Format(msg) => EventStoreError::Serialization(msg),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::behavior::BehaviorEventDraft;
    use crate::domain::foundation::{Mood, Timestamp};
    use chrono::FixedOffset;
    use tempfile::TempDir;

    fn user() -> UserId {
        UserId::new("alice").unwrap()
    }

    fn events() -> Vec<BehaviorEvent> {
        let now = Timestamp::from_unix_secs(1_705_314_600);
        let draft = BehaviorEventDraft::new(Mood::Bad, 7, 8, false)
            .at(now)
            .with_location("office")
            .with_triggers(["morning_coffee", "stress"]);
        vec![BehaviorEvent::ingest(draft, now, FixedOffset::east_opt(0).unwrap()).event]
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEventStore::new(temp_dir.path(), StoreFormat::Json);

        assert!(store.read_all(&user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEventStore::new(temp_dir.path(), StoreFormat::Json);

        let written = events();
        store.write_all(&user(), &written).await.unwrap();

        assert!(store.log_path(&user()).exists());
        assert_eq!(store.read_all(&user()).await.unwrap(), written);
    }

    #[tokio::test]
    async fn test_yaml_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEventStore::new(temp_dir.path(), StoreFormat::Yaml);

        let written = events();
        store.write_all(&user(), &written).await.unwrap();

        let path = store.log_path(&user());
        assert_eq!(path.extension().unwrap(), "yaml");
        assert_eq!(store.read_all(&user()).await.unwrap(), written);
    }

    #[tokio::test]
    async fn test_persisted_fields_use_camel_case() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEventStore::new(temp_dir.path(), StoreFormat::Json);
        store.write_all(&user(), &events()).await.unwrap();

        let text = std::fs::read_to_string(store.log_path(&user())).unwrap();
        assert!(text.contains("\"cravingLevel\": 8"));
        assert!(text.contains("\"didSmoke\": false"));
        assert!(text.contains("\"dayOfWeek\": 1"));
    }

    #[tokio::test]
    async fn test_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let store = FileEventStore::new(&nested, StoreFormat::Json);

        store.write_all(&user(), &events()).await.unwrap();
        assert!(nested.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEventStore::new(temp_dir.path(), StoreFormat::Json);
        std::fs::write(store.log_path(&user()), "{not json").unwrap();

        let result = store.read_all(&user()).await;
        assert!(matches!(result, Err(EventStoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_out_of_range_record_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEventStore::new(temp_dir.path(), StoreFormat::Json);

        for (field, value) in [("hour", 30), ("dayOfWeek", 7), ("cravingLevel", 0)] {
            let mut record = serde_json::to_value(&events()).unwrap();
            record[0][field] = serde_json::json!(value);
            std::fs::write(store.log_path(&user()), record.to_string()).unwrap();

            let result = store.read_all(&user()).await;
            assert!(
                matches!(result, Err(EventStoreError::Serialization(_))),
                "{} = {} should be rejected",
                field,
                value
            );
        }
    }

    #[tokio::test]
    async fn test_users_have_separate_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEventStore::new(temp_dir.path(), StoreFormat::Json);
        let bob = UserId::new("bob").unwrap();

        store.write_all(&user(), &events()).await.unwrap();

        assert_ne!(store.log_path(&user()), store.log_path(&bob));
        assert!(store.read_all(&bob).await.unwrap().is_empty());
    }
}
