//! Show sync status.

use anyhow::Result;
use sync_store::SyncStatusStore;
use sync_types::{EntityStatus, SyncStatusRecord};

/// Run the status command.
pub async fn run(store: &SyncStatusStore, json: bool) -> Result<()> {
    let record = store.snapshot().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", render(&record));
    }
    Ok(())
}

/// Human-readable table of the record.
fn render(record: &SyncStatusRecord) -> String {
    let mut out = String::new();
    let version = record.last_synced_library_version;
    out.push_str(&format!("Library version: {}", version));
    if version.is_full_resync() {
        out.push_str(" (full resync pending)");
    }
    out.push('\n');

    if record.is_empty() {
        out.push_str("No tracked entities\n");
        return out;
    }

    let width = record
        .entity_statuses
        .iter()
        .map(|s| s.entity_id.as_str().len())
        .max()
        .unwrap_or(0)
        .max("ENTITY".len());

    out.push_str(&format!(
        "{:<width$}  {:<5}  {:>8}  {:<8}  {:<10}\n",
        "ENTITY",
        "DIRTY",
        "VERSION",
        "ARCHIVED",
        "DOWNLOADED",
        width = width
    ));
    for status in &record.entity_statuses {
        out.push_str(&row(status, width));
    }
    out
}

fn row(status: &EntityStatus, width: usize) -> String {
    format!(
        "{:<width$}  {:<5}  {:>8}  {:<8}  {:<10}\n",
        status.entity_id.as_str(),
        yes_no(status.dirty),
        status.last_synced_version,
        yes_no(status.server_archived),
        yes_no(status.downloaded),
        width = width
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
