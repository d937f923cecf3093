//! The persisted per-account sync status record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{EntityId, LedgerError};

/// Record-level watermark: the last remote library version this account
/// was synchronized to.
///
/// Only meaningful when compared against the remote counterpart. The value
/// `-1` ([`LibraryVersion::FULL_RESYNC`]) forces a full resync of the
/// account's entity list.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct LibraryVersion(i64);

impl LibraryVersion {
    /// Sentinel forcing a full resync.
    pub const FULL_RESYNC: Self = Self(-1);

    /// Default watermark; also what marking an entity dirty resets to.
    pub const ZERO: Self = Self(0);

    /// Create a LibraryVersion with the given value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the numeric value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether this is the full-resync sentinel.
    pub fn is_full_resync(&self) -> bool {
        *self == Self::FULL_RESYNC
    }
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LibraryVersion({})", self.0)
    }
}

/// Sync bookkeeping for one tracked entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStatus {
    /// Entity identifier, unique within its record.
    pub entity_id: EntityId,
    /// Local changes exist that have not been pushed remotely.
    #[serde(default)]
    pub dirty: bool,
    /// Last remote version this entity was synchronized to or from.
    #[serde(default)]
    pub last_synced_version: i64,
    /// Last known remote archived flag.
    #[serde(default)]
    pub server_archived: bool,
    /// A local materialized copy exists.
    #[serde(default)]
    pub downloaded: bool,
}

impl EntityStatus {
    /// A freshly registered entity: every flag false, version 0.
    pub fn new(entity_id: EntityId) -> Self {
        Self {
            entity_id,
            dirty: false,
            last_synced_version: 0,
            server_archived: false,
            downloaded: false,
        }
    }
}

/// One account's complete sync status.
///
/// This is the unit of persistence: it is always read and written whole.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncStatusRecord {
    /// Per-entity statuses in registration order.
    #[serde(default)]
    pub entity_statuses: Vec<EntityStatus>,
    /// Record-level watermark.
    #[serde(default)]
    pub last_synced_library_version: LibraryVersion,
}

impl SyncStatusRecord {
    /// An empty record, as for a fresh install.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.entity_statuses.len()
    }

    /// Whether no entity has been registered.
    pub fn is_empty(&self) -> bool {
        self.entity_statuses.is_empty()
    }

    /// Serialize to MessagePack bytes (named fields).
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        rmp_serde::to_vec_named(self).map_err(LedgerError::Serialization)
    }

    /// Deserialize from MessagePack bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        rmp_serde::from_slice(bytes).map_err(LedgerError::Deserialization)
    }
}
