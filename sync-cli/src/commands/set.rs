//! Change fields of a registered entity.

use anyhow::Result;
use clap::Args;
use sync_core::StatusField;
use sync_store::SyncStatusStore;

use super::require_persisted;

/// Field flags for the set command. At least one is required.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Local changes not yet pushed (setting true resets the library version to 0)
    #[arg(long)]
    pub dirty: Option<bool>,

    /// Last remote version synced to or from
    #[arg(long, allow_negative_numbers = true)]
    pub version: Option<i64>,

    /// Last known remote archived flag
    #[arg(long)]
    pub archived: Option<bool>,

    /// Whether a local copy exists
    #[arg(long)]
    pub downloaded: Option<bool>,
}

impl FieldArgs {
    /// The requested updates, in a fixed order.
    pub fn updates(&self) -> Vec<StatusField> {
        let mut updates = Vec::new();
        if let Some(v) = self.dirty {
            updates.push(StatusField::Dirty(v));
        }
        if let Some(v) = self.version {
            updates.push(StatusField::LastSyncedVersion(v));
        }
        if let Some(v) = self.archived {
            updates.push(StatusField::ServerArchived(v));
        }
        if let Some(v) = self.downloaded {
            updates.push(StatusField::Downloaded(v));
        }
        updates
    }
}

/// Run the set command.
pub async fn run(store: &SyncStatusStore, id: &str, fields: &FieldArgs) -> Result<()> {
    let updates = fields.updates();
    if updates.is_empty() {
        anyhow::bail!("Nothing to set. Pass --dirty, --version, --archived or --downloaded");
    }

    let outcome = store.set_fields(id, &updates).await?;
    require_persisted(outcome)?;
    for update in updates {
        println!("{}: {:?}", id, update);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use sync_store::MemoryStorage;
    use sync_types::{AccountId, LibraryVersion};

    fn store(storage: &MemoryStorage) -> SyncStatusStore {
        SyncStatusStore::new(AccountId::new("t"), Arc::new(storage.clone()))
    }

    #[tokio::test]
    async fn set_applies_every_given_field() {
        let storage = MemoryStorage::new();
        let store = store(&storage);
        store.add_entity("exp1").await.unwrap();
        let fields = FieldArgs {
            dirty: Some(true),
            version: Some(5),
            downloaded: Some(true),
            ..Default::default()
        };

        run(&store, "exp1", &fields).await.unwrap();

        let status = store.entity_status("exp1").await.unwrap();
        assert!(status.dirty);
        assert_eq!(status.last_synced_version, 5);
        assert!(status.downloaded);
        assert!(!status.server_archived);
        assert_eq!(
            store.last_synced_library_version().await,
            LibraryVersion::ZERO
        );
        assert_eq!(storage.writes(), 2);
    }

    #[tokio::test]
    async fn failed_write_saves_none_of_the_fields() {
        let storage = MemoryStorage::new();
        let store = store(&storage);
        store.add_entity("exp1").await.unwrap();
        let saved = storage.stored(store.account());
        storage.fail_next_write("disk full");
        let fields = FieldArgs {
            version: Some(9),
            archived: Some(true),
            ..Default::default()
        };

        let err = run(&store, "exp1", &fields).await.unwrap_err();

        assert!(err.to_string().contains("disk full"));
        assert_eq!(storage.stored(store.account()), saved);
    }

    #[tokio::test]
    async fn set_without_fields_fails() {
        let storage = MemoryStorage::new();
        let store = store(&storage);
        store.add_entity("exp1").await.unwrap();

        assert!(run(&store, "exp1", &FieldArgs::default()).await.is_err());
        assert_eq!(storage.writes(), 1);
    }

    #[tokio::test]
    async fn set_unknown_entity_fails() {
        let storage = MemoryStorage::new();
        let store = store(&storage);
        let fields = FieldArgs {
            archived: Some(true),
            ..Default::default()
        };

        let err = run(&store, "ghost", &fields).await.unwrap_err();

        assert!(err.to_string().contains("entity not found: ghost"));
        assert_eq!(storage.writes(), 0);
    }
}
