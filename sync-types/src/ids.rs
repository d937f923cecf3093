//! Identity types for sync-ledger.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::LedgerError;

/// Opaque key scoping which status record is loaded.
///
/// The ledger never interprets the key. It is hashed to derive a
/// filesystem-safe storage name and a short fingerprint for logs, so raw
/// account names never end up on disk or in log output.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an AccountId from any account key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw account key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 of the key, hex-encoded (64 chars).
    pub fn digest_hex(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(b"sync-ledger-account-v1");
        hasher.update(self.0.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// First 8 hex chars of [`AccountId::digest_hex`], for log fields.
    pub fn fingerprint(&self) -> String {
        self.digest_hex()[..8].to_string()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fingerprint())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.fingerprint())
    }
}

/// Identifier of a tracked entity (an experiment).
///
/// Always non-empty. Immutable once created.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Create an EntityId, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, LedgerError> {
        let id = id.into();
        if id.is_empty() {
            return Err(LedgerError::InvalidEntityId);
        }
        Ok(Self(id))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntityId {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EntityId {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_digest_is_deterministic() {
        let a = AccountId::new("alice@example.com");
        let b = AccountId::new("alice@example.com");
        assert_eq!(a.digest_hex(), b.digest_hex());
        assert_eq!(a.digest_hex().len(), 64);
    }

    #[test]
    fn different_accounts_differ() {
        let a = AccountId::new("alice");
        let b = AccountId::new("bob");
        assert_ne!(a.digest_hex(), b.digest_hex());
    }

    #[test]
    fn account_display_hides_raw_key() {
        let a = AccountId::new("alice@example.com");
        let shown = a.to_string();
        assert_eq!(shown.len(), 8);
        assert!(!shown.contains("alice"));
        assert!(!format!("{:?}", a).contains("alice"));
    }

    #[test]
    fn empty_entity_id_rejected() {
        assert!(matches!(
            EntityId::new(""),
            Err(LedgerError::InvalidEntityId)
        ));
    }

    #[test]
    fn entity_id_display_is_raw() {
        let id = EntityId::new("exp1").unwrap();
        assert_eq!(id.to_string(), "exp1");
        assert_eq!(id.as_str(), "exp1");
    }

    #[test]
    fn entity_id_json_rejects_empty() {
        let ok: EntityId = serde_json::from_str("\"exp1\"").unwrap();
        assert_eq!(ok.as_str(), "exp1");
        assert!(serde_json::from_str::<EntityId>("\"\"").is_err());
    }
}
