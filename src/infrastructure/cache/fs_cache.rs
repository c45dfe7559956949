//! Filesystem cache store adapter

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{CacheError, CacheStore};
use crate::domain::{ArtifactKind, Fingerprint};

/// Cache of artifacts stored as `{root}/{fingerprint}.{ext}`.
///
/// Nothing is ever evicted.
#[derive(Debug, Clone)]
pub struct FsCacheStore {
    root: PathBuf,
}

impl FsCacheStore {
    /// Create a store rooted at `root`. The directory is not created here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if it doesn't exist
    pub async fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl CacheStore for FsCacheStore {
    fn artifact_path(&self, fingerprint: &Fingerprint, kind: ArtifactKind) -> PathBuf {
        self.root.join(kind.file_name(fingerprint))
    }

    async fn has_artifact(&self, fingerprint: &Fingerprint, kind: ArtifactKind) -> bool {
        fs::metadata(self.artifact_path(fingerprint, kind))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn read_artifact(
        &self,
        fingerprint: &Fingerprint,
        kind: ArtifactKind,
    ) -> Result<Vec<u8>, CacheError> {
        fs::read(self.artifact_path(fingerprint, kind))
            .await
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    CacheError::NotFound {
                        kind,
                        fingerprint: fingerprint.clone(),
                    }
                } else {
                    CacheError::ReadFailed {
                        kind,
                        message: e.to_string(),
                    }
                }
            })
    }

    async fn write_artifact(
        &self,
        fingerprint: &Fingerprint,
        kind: ArtifactKind,
        payload: &[u8],
    ) -> Result<(), CacheError> {
        let write_failed = |e: io::Error| CacheError::WriteFailed {
            kind,
            message: e.to_string(),
        };

        fs::create_dir_all(&self.root).await.map_err(write_failed)?;

        // Stage then rename so readers never observe a half-written artifact
        let target = self.artifact_path(fingerprint, kind);
        let staging = self
            .root
            .join(format!(".{}.{}.partial", kind.file_name(fingerprint), Uuid::new_v4()));

        if let Err(e) = fs::write(&staging, payload).await {
            let _ = fs::remove_file(&staging).await;
            return Err(write_failed(e));
        }
        if let Err(e) = fs::rename(&staging, &target).await {
            let _ = fs::remove_file(&staging).await;
            return Err(write_failed(e));
        }

        tracing::debug!(path = %target.display(), bytes = payload.len(), "Persisted cache artifact");
        Ok(())
    }
}
