//! Show or set the last synced library version.

use anyhow::Result;
use sync_store::SyncStatusStore;
use sync_types::LibraryVersion;

use super::require_persisted;

/// Run the library-version command.
pub async fn run(store: &SyncStatusStore, value: Option<i64>) -> Result<()> {
    if let Some(value) = value {
        let outcome = store
            .set_last_synced_library_version(LibraryVersion::new(value))
            .await;
        require_persisted(outcome)?;
    }

    let version = store.last_synced_library_version().await;
    if version.is_full_resync() {
        println!("{} (full resync pending)", version);
    } else {
        println!("{}", version);
    }
    Ok(())
}
