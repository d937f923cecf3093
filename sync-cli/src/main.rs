//! # syncledger
//!
//! CLI tool for inspecting and editing sync-ledger status files.
//!
//! ## Commands
//!
//! - `status`: Show the account's library version and every entity
//! - `add`: Register an entity
//! - `set`: Change one or more fields of an entity
//! - `library-version`: Show or set the library watermark
//! - `reset`: Discard all sync state for the account
//!
//! ## Example
//!
//! ```bash
//! # Register an experiment and mark it dirty
//! syncledger --account alice add exp1
//! syncledger --account alice set exp1 --dirty true
//!
//! # Record a completed library sync
//! syncledger --account alice library-version 42
//!
//! # Inspect
//! syncledger --account alice status --json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use sync_store::{Config, FileStorage, SyncStatusStore};
use sync_types::AccountId;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{add, library_version, reset, set, status};

/// CLI tool for inspecting and editing sync-ledger status files.
#[derive(Parser, Debug)]
#[command(name = "syncledger")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = sync_store::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory holding the status files (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Account whose ledger to operate on
    #[arg(long, short, global = true, default_value = "default")]
    account: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the library version and every tracked entity
    Status {
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register an entity
    Add {
        /// Entity id
        id: String,
    },

    /// Change fields of a registered entity
    Set {
        /// Entity id
        id: String,

        #[command(flatten)]
        fields: set::FieldArgs,
    },

    /// Show or set the last synced library version (-1 forces a full resync)
    LibraryVersion {
        /// New value
        #[arg(allow_negative_numbers = true)]
        value: Option<i64>,
    },

    /// Discard all sync state for the account
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)?;
    init_tracing(&config);

    let data_dir = resolve_data_dir(&cli, &config)?;
    tracing::debug!("Using data directory {}", data_dir.display());

    let store = SyncStatusStore::open(
        AccountId::new(cli.account),
        Arc::new(FileStorage::new(&data_dir)),
    )
    .await;

    match cli.command {
        Commands::Status { json } => status::run(&store, json).await?,
        Commands::Add { id } => add::run(&store, &id).await?,
        Commands::Set { id, fields } => set::run(&store, &id, &fields).await?,
        Commands::LibraryVersion { value } => library_version::run(&store, value).await?,
        Commands::Reset => reset::run(&store).await?,
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the configured filter.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--data-dir`, else the config file's `storage.data_dir`, else the
/// platform data directory.
fn resolve_data_dir(cli: &Cli, config: &Config) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if cli.config.is_file() {
        return Ok(config.storage.data_dir.clone());
    }
    default_data_dir()
}

/// Get the default data directory for syncledger.
fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("io", "ydun", "syncledger")
        .context("Could not determine home directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
