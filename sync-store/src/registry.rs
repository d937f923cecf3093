//! One store per account.
//!
//! Handing out a shared [`SyncStatusStore`] per account means every caller
//! for that account goes through the same mutex, which is what keeps its
//! writes ordered.

use dashmap::DashMap;
use std::sync::Arc;
use sync_types::AccountId;

use crate::config::Config;
use crate::storage::{FileStorage, StatusStorage};
use crate::store::SyncStatusStore;

/// Registry of per-account stores sharing one storage backend.
///
/// Stores are never evicted: the registry holds every account it has been
/// asked for until it is dropped. Suited to a process that touches a
/// bounded set of accounts.
pub struct LedgerRegistry {
    storage: Arc<dyn StatusStorage>,
    stores: DashMap<AccountId, Arc<SyncStatusStore>>,
}

impl LedgerRegistry {
    /// Create a registry over `storage`.
    pub fn new(storage: Arc<dyn StatusStorage>) -> Self {
        Self {
            storage,
            stores: DashMap::new(),
        }
    }

    /// Create a registry backed by files under `config.storage.data_dir`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(FileStorage::new(&config.storage.data_dir)))
    }

    /// The store for `account`, created unloaded on first request.
    pub fn store_for(&self, account: &AccountId) -> Arc<SyncStatusStore> {
        self.stores
            .entry(account.clone())
            .or_insert_with(|| {
                tracing::debug!("Creating sync status store for account {}", account);
                Arc::new(SyncStatusStore::new(
                    account.clone(),
                    Arc::clone(&self.storage),
                ))
            })
            .value()
            .clone()
    }

    /// The store for `account`, with its record loaded.
    pub async fn open(&self, account: &AccountId) -> Arc<SyncStatusStore> {
        let store = self.store_for(account);
        store.ensure_loaded().await;
        store
    }

    /// Number of accounts with a store.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether no store has been created yet.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn same_account_shares_one_store() {
        let registry = LedgerRegistry::new(Arc::new(MemoryStorage::new()));
        let account = AccountId::new("alice");

        let a = registry.store_for(&account);
        let b = registry.store_for(&account);

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn accounts_are_isolated() {
        let storage = MemoryStorage::new();
        let registry = LedgerRegistry::new(Arc::new(storage.clone()));
        let alice = registry.open(&AccountId::new("alice")).await;
        let bob = registry.open(&AccountId::new("bob")).await;

        alice.add_entity("exp1").await.unwrap();

        assert!(alice.has_entity("exp1").await);
        assert!(!bob.has_entity("exp1").await);
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn store_for_does_not_load() {
        let storage = MemoryStorage::new();
        let registry = LedgerRegistry::new(Arc::new(storage.clone()));

        let store = registry.store_for(&AccountId::new("alice"));

        assert!(!store.is_loaded().await);
        assert_eq!(storage.reads(), 0);

        registry.open(&AccountId::new("alice")).await;
        assert_eq!(storage.reads(), 1);
    }

    #[tokio::test]
    async fn from_config_uses_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.storage.data_dir = dir.path().join("ledger");
        let registry = LedgerRegistry::from_config(&config);

        let store = registry.open(&AccountId::new("alice")).await;
        store.add_entity("exp1").await.unwrap();

        assert!(dir.path().join("ledger").is_dir());
    }
}
