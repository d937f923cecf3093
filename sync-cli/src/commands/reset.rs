//! Discard all sync state for an account.

use anyhow::Result;
use sync_store::SyncStatusStore;

use super::require_persisted;

/// Run the reset command.
pub async fn run(store: &SyncStatusStore) -> Result<()> {
    let count = store.entity_ids().await.len();
    require_persisted(store.reset().await)?;

    println!("Cleared sync state ({} entities forgotten)", count);
    Ok(())
}
