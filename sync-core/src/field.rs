//! Typed per-entity field access.
//!
//! Every per-entity getter and setter in the ledger reduces to one of these
//! variants, so the lookup-then-touch-one-field pattern is written once.

use sync_types::EntityStatus;

/// Which per-entity field to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// [`EntityStatus::dirty`]
    Dirty,
    /// [`EntityStatus::last_synced_version`]
    LastSyncedVersion,
    /// [`EntityStatus::server_archived`]
    ServerArchived,
    /// [`EntityStatus::downloaded`]
    Downloaded,
}

/// A per-entity field together with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusField {
    /// Local changes not yet pushed.
    Dirty(bool),
    /// Last remote version synced to or from.
    LastSyncedVersion(i64),
    /// Last known remote archived flag.
    ServerArchived(bool),
    /// Local copy exists.
    Downloaded(bool),
}

impl StatusField {
    /// Read `kind` out of a status entry.
    pub fn read(status: &EntityStatus, kind: FieldKind) -> Self {
        match kind {
            FieldKind::Dirty => Self::Dirty(status.dirty),
            FieldKind::LastSyncedVersion => Self::LastSyncedVersion(status.last_synced_version),
            FieldKind::ServerArchived => Self::ServerArchived(status.server_archived),
            FieldKind::Downloaded => Self::Downloaded(status.downloaded),
        }
    }

    /// Which field this is.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Dirty(_) => FieldKind::Dirty,
            Self::LastSyncedVersion(_) => FieldKind::LastSyncedVersion,
            Self::ServerArchived(_) => FieldKind::ServerArchived,
            Self::Downloaded(_) => FieldKind::Downloaded,
        }
    }

    /// Write this value into a status entry.
    pub(crate) fn write(self, status: &mut EntityStatus) {
        match self {
            Self::Dirty(v) => status.dirty = v,
            Self::LastSyncedVersion(v) => status.last_synced_version = v,
            Self::ServerArchived(v) => status.server_archived = v,
            Self::Downloaded(v) => status.downloaded = v,
        }
    }

    /// The value if this is a boolean field.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Dirty(v) | Self::ServerArchived(v) | Self::Downloaded(v) => Some(v),
            Self::LastSyncedVersion(_) => None,
        }
    }

    /// The value if this is the version field.
    pub fn as_version(&self) -> Option<i64> {
        match *self {
            Self::LastSyncedVersion(v) => Some(v),
            _ => None,
        }
    }
}
