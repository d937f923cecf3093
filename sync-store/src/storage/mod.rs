//! Durable storage for sync status records.
//!
//! The store reads and writes whole records, keyed by account.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageResult;
use async_trait::async_trait;
use sync_types::{AccountId, SyncStatusRecord};

/// Trait for status record storage backends.
#[async_trait]
pub trait StatusStorage: Send + Sync {
    /// Read the account's record.
    ///
    /// Returns `SyncStatusRecord::default()` when nothing has been persisted
    /// yet. Errors are reserved for storage that exists but cannot be read.
    async fn read(&self, account: &AccountId) -> StorageResult<SyncStatusRecord>;

    /// Persist the account's whole record, replacing any previous one.
    async fn write(&self, record: &SyncStatusRecord, account: &AccountId) -> StorageResult<()>;
}
