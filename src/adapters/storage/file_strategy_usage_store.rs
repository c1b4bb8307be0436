//! File-based Strategy Usage Store Adapter
//!
//! Keeps each user's usage records next to their event log.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::file_codec::{read_list, user_file, write_list, CodecError};
use crate::config::StoreFormat;
use crate::domain::foundation::UserId;
use crate::ports::{StrategyUsageError, StrategyUsageRecord, StrategyUsageStore};

/// File-based storage for strategy usage records
#[derive(Debug)]
pub struct FileStrategyUsageStore {
    base_path: PathBuf,
    format: StoreFormat,
    // Serializes read-append-write within this process
    write_lock: Mutex<()>,
}

impl FileStrategyUsageStore {
    pub fn new<P: AsRef<Path>>(base_path: P, format: StoreFormat) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            format,
            write_lock: Mutex::new(()),
        }
    }

    fn usage_path(&self, user_id: &UserId) -> PathBuf {
        user_file(&self.base_path, user_id, "strategies", self.format)
    }
}

fn storage_error(err: CodecError) -> StrategyUsageError {
    match err {
        CodecError::Io(msg) | CodecError::Format(msg) => StrategyUsageError::Storage(msg),
    }
}

#[async_trait]
impl StrategyUsageStore for FileStrategyUsageStore {
    async fn record(
        &self,
        user_id: &UserId,
        record: StrategyUsageRecord,
    ) -> Result<(), StrategyUsageError> {
        let _guard = self.write_lock.lock().await;
        let path = self.usage_path(user_id);

        let mut records: Vec<StrategyUsageRecord> =
            read_list(&path, self.format).await.map_err(storage_error)?;
        records.push(record);
        write_list(&path, self.format, &records)
            .await
            .map_err(storage_error)
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<StrategyUsageRecord>, StrategyUsageError> {
        read_list(&self.usage_path(user_id), self.format)
            .await
            .map_err(storage_error)
    }
}
