//! Register an entity.

use anyhow::Result;
use sync_store::SyncStatusStore;

use super::require_persisted;

/// Run the add command.
pub async fn run(store: &SyncStatusStore, id: &str) -> Result<()> {
    let outcome = store.add_entity(id).await?;
    require_persisted(outcome)?;

    println!("Added {}", id);
    println!("Library version reset to -1 (full resync on next pass)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use sync_store::MemoryStorage;
    use sync_types::{AccountId, LibraryVersion};

    #[tokio::test]
    async fn add_registers_entity() {
        let storage = MemoryStorage::new();
        let store = SyncStatusStore::new(AccountId::new("t"), Arc::new(storage.clone()));

        run(&store, "exp1").await.unwrap();

        assert!(store.has_entity("exp1").await);
        assert_eq!(
            store.last_synced_library_version().await,
            LibraryVersion::FULL_RESYNC
        );
        assert_eq!(storage.writes(), 1);
    }

    #[tokio::test]
    async fn add_twice_fails() {
        let store = SyncStatusStore::new(AccountId::new("t"), Arc::new(MemoryStorage::new()));
        run(&store, "exp1").await.unwrap();

        let err = run(&store, "exp1").await.unwrap_err();

        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn unsaved_add_is_an_error() {
        let storage = MemoryStorage::new();
        storage.fail_next_write("read-only");
        let store = SyncStatusStore::new(AccountId::new("t"), Arc::new(storage));

        let err = run(&store, "exp1").await.unwrap_err();

        assert!(err.to_string().contains("not saved"));
    }
}
