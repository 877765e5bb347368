//! Blob storage for files-manager.
//!
//! Content is kept as flat files named by a fresh UUID under the storage
//! root:
//! ```text
//! {base_path}/
//! ├── 0f8f2c1e-5b7a-4c1d-9a3e-2b6d7e8f9a10
//! └── 3c4d5e6f-7a8b-4c9d-8e0f-1a2b3c4d5e6f
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::{FilesError, Result};

/// Storage root holding uploaded file content.
#[derive(Debug, Clone)]
pub struct BlobStorage {
    base_path: PathBuf,
}

impl BlobStorage {
    /// Create a storage handle rooted at `base_path`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Root directory of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Create the root directory if it doesn't exist.
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Generate a fresh blob name.
    pub fn generate_name() -> String {
        Uuid::new_v4().to_string()
    }

    /// Absolute path for a blob name.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Store `content` under a new unique name and return its path.
    pub async fn save(&self, content: &[u8]) -> Result<PathBuf> {
        self.ensure_dir().await?;
        let path = self.path_for(&Self::generate_name());
        self.write(&path, content).await?;
        debug!(path = %path.display(), size = content.len(), "Blob stored");
        Ok(path)
    }

    /// Write `content` to `path`.
    ///
    /// Goes through a sibling temp file so that `path` is never observed
    /// half-written.
    pub async fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| FilesError::Validation("invalid blob path".to_string()))?;
        let tmp = path.with_file_name(format!(".{file_name}.tmp"));

        if let Err(e) = tokio::fs::write(&tmp, content).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Whether a blob exists at `path`.
    pub async fn exists(&self, path: impl AsRef<Path>) -> bool {
        tokio::fs::try_exists(path.as_ref()).await.unwrap_or(false)
    }

    /// Read the blob at `path`.
    ///
    /// A missing blob is reported as `NotFound`.
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        match tokio::fs::read(path.as_ref()).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FilesError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the blob at `path`. Missing blobs are ignored.
    pub async fn remove(&self, path: impl AsRef<Path>) -> Result<()> {
        match tokio::fs::remove_file(path.as_ref()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.as_ref().display(), "Blob already gone");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
