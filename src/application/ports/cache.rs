//! Cache store port interface

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ArtifactKind, Fingerprint};

/// Cache store errors
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("No cached {kind} for {fingerprint}")]
    NotFound {
        kind: ArtifactKind,
        fingerprint: Fingerprint,
    },

    #[error("Failed to read cached {kind}: {message}")]
    ReadFailed { kind: ArtifactKind, message: String },

    #[error("Failed to write cached {kind}: {message}")]
    WriteFailed { kind: ArtifactKind, message: String },
}

/// Port for the content-addressed artifact cache.
///
/// Artifacts live at a deterministic location per (fingerprint, kind); the
/// external tools read and write those locations directly, so the store
/// exposes paths as well as payloads.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Deterministic location of an artifact, whether or not it exists yet
    fn artifact_path(&self, fingerprint: &Fingerprint, kind: ArtifactKind) -> PathBuf;

    /// Check whether an artifact has been persisted
    async fn has_artifact(&self, fingerprint: &Fingerprint, kind: ArtifactKind) -> bool;

    /// Read an artifact's payload.
    ///
    /// # Returns
    /// The payload, or `CacheError::NotFound` if absent
    async fn read_artifact(
        &self,
        fingerprint: &Fingerprint,
        kind: ArtifactKind,
    ) -> Result<Vec<u8>, CacheError>;

    /// Persist an artifact, creating or replacing it.
    async fn write_artifact(
        &self,
        fingerprint: &Fingerprint,
        kind: ArtifactKind,
        payload: &[u8],
    ) -> Result<(), CacheError>;
}
