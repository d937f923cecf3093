//! # sync-types
//!
//! Record types and wire format for the sync-ledger status store.
//!
//! This crate provides the foundational types used across all sync-ledger crates:
//! - [`AccountId`], [`EntityId`] - Identity types scoping a ledger and its entries
//! - [`SyncStatusRecord`], [`EntityStatus`] - The persisted per-account record
//! - [`LibraryVersion`] - The record-level watermark and its sentinels
//! - [`LedgerError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod ids;
mod record;

pub use error::LedgerError;
pub use ids::{AccountId, EntityId};
pub use record::{EntityStatus, LibraryVersion, SyncStatusRecord};
