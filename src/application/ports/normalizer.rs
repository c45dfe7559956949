//! Audio normalizer port interface

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use super::process::ProcessError;

/// Audio conversion errors
#[derive(Debug, Clone, Error)]
pub enum NormalizeError {
    #[error("{0}")]
    ConversionFailed(String),

    #[error("converter exited successfully but produced no output at {}", .0.display())]
    NoOutput(PathBuf),

    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Port for converting arbitrary media into 16 kHz mono 16-bit PCM audio
#[async_trait]
pub trait AudioNormalizer: Send + Sync {
    /// Convert `input` into normalized audio written at `output`.
    ///
    /// An existing file at `output` is overwritten without prompting.
    async fn normalize(&self, input: &Path, output: &Path) -> Result<(), NormalizeError>;
}
