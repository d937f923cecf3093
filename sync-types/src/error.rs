//! Error types for sync-ledger.

use thiserror::Error;

/// Errors that can occur in ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The entity has never been registered with `add_entity`.
    #[error("entity not found: {entity_id}")]
    EntityNotFound {
        /// The id that was looked up.
        entity_id: String,
    },

    /// The entity is already registered in this record.
    #[error("entity already exists: {entity_id}")]
    AlreadyExists {
        /// The id that was added twice.
        entity_id: String,
    },

    /// Entity ids must be non-empty.
    #[error("invalid entity id: must not be empty")]
    InvalidEntityId,

    /// MessagePack serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[source] rmp_serde::encode::Error),

    /// MessagePack deserialization failed
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] rmp_serde::decode::Error),
}

impl LedgerError {
    /// Build an [`LedgerError::EntityNotFound`] for the given id.
    pub fn not_found(entity_id: impl Into<String>) -> Self {
        Self::EntityNotFound {
            entity_id: entity_id.into(),
        }
    }

    /// Whether this error means the entity is unknown to the record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LedgerError::not_found("exp-42");
        assert_eq!(err.to_string(), "entity not found: exp-42");
        assert!(err.is_not_found());
    }

    #[test]
    fn already_exists_is_not_not_found() {
        let err = LedgerError::AlreadyExists {
            entity_id: "exp".into(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LedgerError>();
    }
}
