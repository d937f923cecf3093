//! In-memory storage for testing.
//!
//! Allows seeding records, counting reads and writes, and injecting
//! failures for verification.

use super::StatusStorage;
use crate::error::{StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use sync_types::{AccountId, SyncStatusRecord};

/// In-memory status storage for testing.
///
/// Clones share the same underlying map, so a test can keep a handle for
/// inspection while the store owns another. Not persistent - all data is
/// lost when the last clone is dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryStorageInner>>,
}

#[derive(Debug, Default)]
struct MemoryStorageInner {
    records: HashMap<AccountId, SyncStatusRecord>,
    reads: usize,
    writes: usize,
    fail_next_read: Option<String>,
    fail_next_write: Option<String>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record as if it had been persisted earlier.
    pub fn insert(&self, account: &AccountId, record: SyncStatusRecord) {
        self.inner
            .lock()
            .unwrap()
            .records
            .insert(account.clone(), record);
    }

    /// The last successfully written record for `account`.
    pub fn stored(&self, account: &AccountId) -> Option<SyncStatusRecord> {
        self.inner.lock().unwrap().records.get(account).cloned()
    }

    /// Number of `read` calls so far, failed ones included.
    pub fn reads(&self) -> usize {
        self.inner.lock().unwrap().reads
    }

    /// Number of `write` calls so far, failed ones included.
    pub fn writes(&self) -> usize {
        self.inner.lock().unwrap().writes
    }

    /// Cause the next `read()` to fail with the given reason.
    pub fn fail_next_read(&self, reason: &str) {
        self.inner.lock().unwrap().fail_next_read = Some(reason.to_string());
    }

    /// Cause the next `write()` to fail with the given reason.
    pub fn fail_next_write(&self, reason: &str) {
        self.inner.lock().unwrap().fail_next_write = Some(reason.to_string());
    }
}

#[async_trait]
impl StatusStorage for MemoryStorage {
    async fn read(&self, account: &AccountId) -> StorageResult<SyncStatusRecord> {
        let mut inner = self.inner.lock().unwrap();
        inner.reads += 1;
        if let Some(reason) = inner.fail_next_read.take() {
            return Err(StorageError::Unavailable(reason));
        }
        Ok(inner.records.get(account).cloned().unwrap_or_default())
    }

    async fn write(&self, record: &SyncStatusRecord, account: &AccountId) -> StorageResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.writes += 1;
        if let Some(reason) = inner.fail_next_write.take() {
            return Err(StorageError::Unavailable(reason));
        }
        inner.records.insert(account.clone(), record.clone());
        Ok(())
    }
}
