//! File-backed storage: one MessagePack file per account.

use super::StatusStorage;
use crate::error::{StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use sync_types::{AccountId, SyncStatusRecord};
use tokio::io::AsyncWriteExt;

/// Extension of the per-account status file.
pub const FILE_EXTENSION: &str = "syncstatus";

/// File-based status storage.
///
/// Each account's record lives at `<root>/<sha256(account)>.syncstatus`.
/// Writes go to a temporary sibling which is synced and then renamed over
/// the target, so a crash leaves either the old or the new record.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `root`.
    ///
    /// The directory is created on first write and restricted to the owner
    /// at that point. An existing directory keeps its permissions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the status file for `account`.
    pub fn path_for(&self, account: &AccountId) -> PathBuf {
        self.root
            .join(format!("{}.{}", account.digest_hex(), FILE_EXTENSION))
    }

    async fn ensure_root(&self) -> StorageResult<()> {
        let existed = tokio::fs::try_exists(&self.root)
            .await
            .map_err(|e| StorageError::io(&self.root, e))?;
        if existed {
            return Ok(());
        }
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::io(&self.root, e))?;
        set_dir_permissions_0700(&self.root).await
    }

    async fn write_temp(&self, tmp_path: &Path, bytes: &[u8]) -> StorageResult<()> {
        let mut file = tokio::fs::File::create(tmp_path)
            .await
            .map_err(|e| StorageError::io(tmp_path, e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| StorageError::io(tmp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| StorageError::io(tmp_path, e))?;
        drop(file);

        set_file_permissions_0600(tmp_path).await
    }
}

#[async_trait]
impl StatusStorage for FileStorage {
    async fn read(&self, account: &AccountId) -> StorageResult<SyncStatusRecord> {
        let path = self.path_for(account);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(SyncStatusRecord::from_bytes(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No status file for account {}, starting empty", account);
                Ok(SyncStatusRecord::default())
            }
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    async fn write(&self, record: &SyncStatusRecord, account: &AccountId) -> StorageResult<()> {
        self.ensure_root().await?;

        let path = self.path_for(account);
        let tmp_path = path.with_extension(format!("{}.tmp", FILE_EXTENSION));
        let bytes = record.to_bytes()?;

        let written = match self.write_temp(&tmp_path, &bytes).await {
            Ok(()) => tokio::fs::rename(&tmp_path, &path)
                .await
                .map_err(|e| StorageError::io(&path, e)),
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        "Failed to clean up temp file {}: {}",
                        tmp_path.display(),
                        cleanup
                    );
                }
            }
            return Err(e);
        }

        tracing::debug!(
            "Wrote {} bytes of sync status for account {}",
            bytes.len(),
            account
        );
        Ok(())
    }
}

/// Set file permissions to 0600 (owner read/write only) on Unix.
/// No-op on non-Unix platforms.
async fn set_file_permissions_0600(path: &Path) -> StorageResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .await
            .map_err(|e| StorageError::io(path, e))?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

/// Set directory permissions to 0700 (owner only) on Unix.
/// No-op on non-Unix platforms.
async fn set_dir_permissions_0700(path: &Path) -> StorageResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
            .await
            .map_err(|e| StorageError::io(path, e))?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}
