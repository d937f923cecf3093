//! SyncStatusStore - the per-account sync status ledger.
//!
//! # Architecture
//!
//! The store owns one account's [`LedgerState`] behind an async mutex and
//! talks to durable storage through the [`StatusStorage`] trait.
//!
//! ```text
//! caller → SyncStatusStore ──lock──► LedgerState (sync-core, pure rules)
//!                 │
//!                 └── after every mutation ──► StatusStorage::write
//! ```
//!
//! The record is loaded lazily: a store starts UNLOADED and the first
//! access (or [`SyncStatusStore::open`]) reads it from storage. The
//! transition is one-way. Lookup, mutation and the write that follows
//! happen under one lock, so writes for an account are serialized and an
//! older record can never overwrite a newer one.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use syncledger_store::{FileStorage, SyncStatusStore};
//! use sync_types::AccountId;
//!
//! let storage = Arc::new(FileStorage::new("ledger-data"));
//! let store = SyncStatusStore::open(AccountId::new("alice"), storage).await;
//!
//! store.add_entity("exp1").await?;
//! store.set_dirty("exp1", true).await?;
//! assert!(store.dirty("exp1").await?);
//! ```

use std::sync::Arc;
use sync_core::{FieldKind, LedgerState, StatusField};
use sync_types::{
    AccountId, EntityId, EntityStatus, LedgerError, LibraryVersion, SyncStatusRecord,
};
use tokio::sync::Mutex;

use crate::storage::StatusStorage;

/// Result of the write that follows a mutation.
///
/// A failed write does not roll back the in-memory change: the next
/// successful write persists the whole record again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record was written to storage.
    Persisted,
    /// The write failed; the change is held in memory only.
    Failed {
        /// Display form of the storage error.
        reason: String,
    },
}

impl WriteOutcome {
    /// Whether the write reached storage.
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted)
    }
}

/// Sync bookkeeping for one account.
///
/// All reads and writes of the account's record go through this type.
pub struct SyncStatusStore {
    account: AccountId,
    storage: Arc<dyn StatusStorage>,
    /// `None` until the record has been loaded.
    state: Mutex<Option<LedgerState>>,
}

impl std::fmt::Debug for SyncStatusStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncStatusStore")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

impl SyncStatusStore {
    /// Create an unloaded store. Nothing is read until first access.
    pub fn new(account: AccountId, storage: Arc<dyn StatusStorage>) -> Self {
        Self {
            account,
            storage,
            state: Mutex::new(None),
        }
    }

    /// Create a store and load its record before returning.
    pub async fn open(account: AccountId, storage: Arc<dyn StatusStorage>) -> Self {
        let store = Self::new(account, storage);
        store.ensure_loaded().await;
        store
    }

    /// Create a store already holding `record`, without touching storage.
    pub fn with_record(
        account: AccountId,
        storage: Arc<dyn StatusStorage>,
        record: SyncStatusRecord,
    ) -> Self {
        Self {
            account,
            storage,
            state: Mutex::new(Some(LedgerState::from_record(record))),
        }
    }

    /// The account this store is scoped to.
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// Load the record if it has not been loaded yet. No-op afterwards.
    pub async fn ensure_loaded(&self) {
        let mut slot = self.state.lock().await;
        self.loaded(&mut slot).await;
    }

    /// Whether the record has been loaded.
    pub async fn is_loaded(&self) -> bool {
        self.state.lock().await.is_some()
    }

    /// Replace the in-memory record without persisting it.
    ///
    /// Intended for tests and for bootstrapping a known starting state.
    pub async fn replace_record(&self, record: SyncStatusRecord) {
        *self.state.lock().await = Some(LedgerState::from_record(record));
    }

    /// Discard all sync state for this account and persist the empty record.
    pub async fn reset(&self) -> WriteOutcome {
        let mut slot = self.state.lock().await;
        let state = slot.insert(LedgerState::new());
        tracing::info!("Reset sync status for account {}", self.account);
        self.persist(state.record(), "reset").await
    }

    /// Copy of the current record.
    pub async fn snapshot(&self) -> SyncStatusRecord {
        self.read(|state| state.record().clone()).await
    }

    /// Whether `entity_id` has been registered.
    pub async fn has_entity(&self, entity_id: &str) -> bool {
        self.read(|state| state.contains(entity_id)).await
    }

    /// Register a new entity and force a full resync.
    pub async fn add_entity(&self, entity_id: &str) -> Result<WriteOutcome, LedgerError> {
        let id = EntityId::new(entity_id)?;
        let outcome = self
            .mutate("add_entity", |state| state.add_entity(id))
            .await?;
        tracing::info!(
            "Registered entity {} for account {}",
            entity_id,
            self.account
        );
        Ok(outcome)
    }

    /// Whole status entry for a registered entity.
    pub async fn entity_status(&self, entity_id: &str) -> Result<EntityStatus, LedgerError> {
        self.read(|state| state.entity(entity_id).cloned()).await
    }

    /// Registered ids in registration order.
    pub async fn entity_ids(&self) -> Vec<EntityId> {
        self.read(|state| state.entity_ids()).await
    }

    /// Ids with unpushed local changes.
    pub async fn dirty_entities(&self) -> Vec<EntityId> {
        self.read(|state| state.dirty_entities()).await
    }

    /// Read one field of a registered entity.
    pub async fn field(
        &self,
        entity_id: &str,
        kind: FieldKind,
    ) -> Result<StatusField, LedgerError> {
        self.read(|state| state.get(entity_id, kind)).await
    }

    /// Write one field of a registered entity and persist.
    pub async fn set_field(
        &self,
        entity_id: &str,
        field: StatusField,
    ) -> Result<WriteOutcome, LedgerError> {
        self.mutate("set_field", |state| state.apply(entity_id, field))
            .await
    }

    /// Write several fields of a registered entity with a single persist.
    ///
    /// Fields are applied in order. An unknown id changes nothing.
    pub async fn set_fields(
        &self,
        entity_id: &str,
        fields: &[StatusField],
    ) -> Result<WriteOutcome, LedgerError> {
        self.mutate("set_fields", |state| {
            state.entity(entity_id)?;
            for field in fields {
                state.apply(entity_id, *field)?;
            }
            Ok(())
        })
        .await
    }

    /// Whether the entity has local changes not yet pushed.
    pub async fn dirty(&self, entity_id: &str) -> Result<bool, LedgerError> {
        self.read(|state| state.entity(entity_id).map(|s| s.dirty))
            .await
    }

    /// Mark or clear local changes. Marking resets the library watermark to 0.
    pub async fn set_dirty(
        &self,
        entity_id: &str,
        dirty: bool,
    ) -> Result<WriteOutcome, LedgerError> {
        self.set_field(entity_id, StatusField::Dirty(dirty)).await
    }

    /// Last remote version the entity was synchronized to or from.
    pub async fn last_synced_version(&self, entity_id: &str) -> Result<i64, LedgerError> {
        self.read(|state| state.entity(entity_id).map(|s| s.last_synced_version))
            .await
    }

    /// Record the remote version the entity was synchronized to or from.
    pub async fn set_last_synced_version(
        &self,
        entity_id: &str,
        version: i64,
    ) -> Result<WriteOutcome, LedgerError> {
        self.set_field(entity_id, StatusField::LastSyncedVersion(version))
            .await
    }

    /// Last known remote archived flag.
    pub async fn server_archived(&self, entity_id: &str) -> Result<bool, LedgerError> {
        self.read(|state| state.entity(entity_id).map(|s| s.server_archived))
            .await
    }

    /// Mirror the remote archived flag.
    pub async fn set_server_archived(
        &self,
        entity_id: &str,
        archived: bool,
    ) -> Result<WriteOutcome, LedgerError> {
        self.set_field(entity_id, StatusField::ServerArchived(archived))
            .await
    }

    /// Whether a local copy has been downloaded.
    pub async fn downloaded(&self, entity_id: &str) -> Result<bool, LedgerError> {
        self.read(|state| state.entity(entity_id).map(|s| s.downloaded))
            .await
    }

    /// Record whether a local copy exists.
    pub async fn set_downloaded(
        &self,
        entity_id: &str,
        downloaded: bool,
    ) -> Result<WriteOutcome, LedgerError> {
        self.set_field(entity_id, StatusField::Downloaded(downloaded))
            .await
    }

    /// Record-level watermark.
    pub async fn last_synced_library_version(&self) -> LibraryVersion {
        self.read(|state| state.library_version()).await
    }

    /// Overwrite the record-level watermark and persist.
    pub async fn set_last_synced_library_version(&self, version: LibraryVersion) -> WriteOutcome {
        let mut slot = self.state.lock().await;
        let state = self.loaded(&mut slot).await;
        state.set_library_version(version);
        self.persist(state.record(), "set_library_version").await
    }

    /// Whether the next library pass must resync everything.
    pub async fn needs_full_resync(&self) -> bool {
        self.last_synced_library_version().await.is_full_resync()
    }

    /// The loaded state, reading it from storage on first use.
    ///
    /// A read failure leaves the account usable with an empty record.
    async fn loaded<'a>(&self, slot: &'a mut Option<LedgerState>) -> &'a mut LedgerState {
        if let Some(state) = slot.take() {
            return slot.insert(state);
        }

        let record = match self.storage.read(&self.account).await {
            Ok(record) => {
                tracing::debug!(
                    "Loaded sync status for account {} ({} entities)",
                    self.account,
                    record.len()
                );
                record
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load sync status for account {}, starting empty: {}",
                    self.account,
                    e
                );
                SyncStatusRecord::default()
            }
        };
        slot.insert(LedgerState::from_record(record))
    }

    async fn read<T>(&self, f: impl FnOnce(&LedgerState) -> T) -> T {
        let mut slot = self.state.lock().await;
        let state = self.loaded(&mut slot).await;
        f(state)
    }

    /// Apply `f` and, if it succeeded, persist the whole record.
    async fn mutate(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut LedgerState) -> Result<(), LedgerError>,
    ) -> Result<WriteOutcome, LedgerError> {
        let mut slot = self.state.lock().await;
        let state = self.loaded(&mut slot).await;
        f(state)?;
        Ok(self.persist(state.record(), op).await)
    }

    async fn persist(&self, record: &SyncStatusRecord, op: &'static str) -> WriteOutcome {
        match self.storage.write(record, &self.account).await {
            Ok(()) => WriteOutcome::Persisted,
            Err(e) => {
                tracing::error!(
                    "Sync status write failed for account {} after {}: {}",
                    self.account,
                    op,
                    e
                );
                WriteOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
