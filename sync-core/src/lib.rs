//! # sync-core
//!
//! Pure ledger logic for sync-ledger (no I/O, instant tests).
//!
//! This crate implements the rules for mutating a [`SyncStatusRecord`]
//! without any disk I/O, enabling fast unit tests.
//!
//! ## Design Philosophy
//!
//! [`LedgerState`] owns the record and is the only thing that mutates it.
//! Each mutation returns `Result<(), LedgerError>`: `Ok` means the record
//! changed, an error means it was left untouched. The caller (`sync-store`)
//! persists after every `Ok`. Records taken over with
//! [`LedgerState::from_record`] are repaired so each id appears once. The
//! watermark rules live here and nowhere else:
//! - registering an entity forces a full resync (`-1`)
//! - marking an entity dirty resets the watermark to `0`
//!
//! [`SyncStatusRecord`]: sync_types::SyncStatusRecord

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod field;
pub mod ledger;

pub use field::{FieldKind, StatusField};
pub use ledger::LedgerState;
