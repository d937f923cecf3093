//! CLI command implementations.

pub mod add;
pub mod library_version;
pub mod reset;
pub mod set;
pub mod status;

use anyhow::Result;
use sync_store::WriteOutcome;

/// Turn a failed write into a command error.
///
/// The library keeps the change in memory, but a one-shot CLI process
/// exits right after, so an unpersisted change is lost.
pub(crate) fn require_persisted(outcome: WriteOutcome) -> Result<()> {
    match outcome {
        WriteOutcome::Persisted => Ok(()),
        WriteOutcome::Failed { reason } => anyhow::bail!("change was not saved: {}", reason),
    }
}
