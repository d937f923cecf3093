//! # sync-store
//!
//! Per-account sync status ledger with durable persistence.
//!
//! This crate wraps the pure ledger rules from `sync-core` with:
//! - Lazy, one-way loading of each account's record from storage
//! - A write of the whole record after every mutation
//! - A per-account mutex so lookup, mutation and write are one step
//!
//! ## Architecture
//!
//! ```text
//! LedgerRegistry ──► SyncStatusStore (one per account)
//!                        │
//!                        ├── LedgerState (sync-core)
//!                        └── StatusStorage ──► FileStorage | MemoryStorage
//! ```
//!
//! ## Failure policy
//!
//! - Unknown entity ids are reported as `LedgerError::EntityNotFound`.
//! - A failed write is logged and reported as [`WriteOutcome::Failed`];
//!   the in-memory change is kept and the next write persists it.
//! - A failed load is logged and the account starts from an empty record.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod registry;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{ConfigError, StorageError, StorageResult};
pub use registry::LedgerRegistry;
pub use storage::{FileStorage, MemoryStorage, StatusStorage};
pub use store::{SyncStatusStore, WriteOutcome};
