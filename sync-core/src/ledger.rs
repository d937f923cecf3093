//! Ledger state: the owned record plus the rules for changing it.
//!
//! Entities are looked up by id with a linear scan in registration order.
//! Lookups take `&str` so callers can probe with arbitrary input: the empty
//! string is never a registered id and always reports not found.

use std::collections::HashSet;
use sync_types::{EntityId, EntityStatus, LedgerError, LibraryVersion, SyncStatusRecord};

use crate::field::{FieldKind, StatusField};

/// Owns one account's [`SyncStatusRecord`] and mediates every change to it.
///
/// Nothing outside this type gets a mutable reference to the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    record: SyncStatusRecord,
}

impl LedgerState {
    /// Create state for a fresh account.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an existing record (loaded or injected).
    ///
    /// Ids must be unique within a record. If `record` repeats an id, the
    /// first entry wins and later ones are dropped with a warning.
    pub fn from_record(mut record: SyncStatusRecord) -> Self {
        let mut seen = HashSet::with_capacity(record.entity_statuses.len());
        record.entity_statuses.retain(|status| {
            let first = seen.insert(status.entity_id.as_str().to_owned());
            if !first {
                tracing::warn!(
                    "Dropping duplicate status entry for entity {}",
                    status.entity_id
                );
            }
            first
        });
        Self { record }
    }

    /// Read-only view of the record, e.g. for persisting it.
    pub fn record(&self) -> &SyncStatusRecord {
        &self.record
    }

    /// Give the record back.
    pub fn into_record(self) -> SyncStatusRecord {
        self.record
    }

    /// Whether `entity_id` has been registered.
    pub fn contains(&self, entity_id: &str) -> bool {
        self.find(entity_id).is_some()
    }

    /// Look up a registered entity.
    pub fn find(&self, entity_id: &str) -> Option<&EntityStatus> {
        if entity_id.is_empty() {
            return None;
        }
        self.record
            .entity_statuses
            .iter()
            .find(|s| s.entity_id.as_str() == entity_id)
    }

    fn find_mut(&mut self, entity_id: &str) -> Option<&mut EntityStatus> {
        if entity_id.is_empty() {
            return None;
        }
        self.record
            .entity_statuses
            .iter_mut()
            .find(|s| s.entity_id.as_str() == entity_id)
    }

    /// Look up a registered entity, or fail with `EntityNotFound`.
    pub fn entity(&self, entity_id: &str) -> Result<&EntityStatus, LedgerError> {
        self.find(entity_id)
            .ok_or_else(|| LedgerError::not_found(entity_id))
    }

    /// Register a new entity with default fields.
    ///
    /// Sets the watermark to [`LibraryVersion::FULL_RESYNC`]: the remote
    /// side does not know about this entity yet. A duplicate id is rejected
    /// and the record is left untouched.
    pub fn add_entity(&mut self, entity_id: EntityId) -> Result<(), LedgerError> {
        if self.contains(entity_id.as_str()) {
            return Err(LedgerError::AlreadyExists {
                entity_id: entity_id.into(),
            });
        }
        self.record
            .entity_statuses
            .push(EntityStatus::new(entity_id));
        self.record.last_synced_library_version = LibraryVersion::FULL_RESYNC;
        Ok(())
    }

    /// Read one field of a registered entity.
    pub fn get(&self, entity_id: &str, kind: FieldKind) -> Result<StatusField, LedgerError> {
        self.entity(entity_id)
            .map(|status| StatusField::read(status, kind))
    }

    /// Write one field of a registered entity.
    ///
    /// Marking an entity dirty resets the watermark to
    /// [`LibraryVersion::ZERO`] so the next library pass reconsiders this
    /// account. Clearing dirty leaves the watermark alone.
    pub fn apply(&mut self, entity_id: &str, field: StatusField) -> Result<(), LedgerError> {
        let status = self
            .find_mut(entity_id)
            .ok_or_else(|| LedgerError::not_found(entity_id))?;
        field.write(status);

        if field == StatusField::Dirty(true) {
            self.record.last_synced_library_version = LibraryVersion::ZERO;
        }
        Ok(())
    }

    /// Record-level watermark.
    pub fn library_version(&self) -> LibraryVersion {
        self.record.last_synced_library_version
    }

    /// Overwrite the record-level watermark.
    pub fn set_library_version(&mut self, version: LibraryVersion) {
        self.record.last_synced_library_version = version;
    }

    /// Registered ids in registration order.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.record
            .entity_statuses
            .iter()
            .map(|s| s.entity_id.clone())
            .collect()
    }

    /// Ids with unpushed local changes, in registration order.
    pub fn dirty_entities(&self) -> Vec<EntityId> {
        self.record
            .entity_statuses
            .iter()
            .filter(|s| s.dirty)
            .map(|s| s.entity_id.clone())
            .collect()
    }
}
