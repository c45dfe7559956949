//! Transcription engine port interface

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use super::process::ProcessError;
use crate::domain::transcription::Caption;

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Whisper executable not found at: {}", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error("Whisper model not found at: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("{0}")]
    EngineFailed(String),

    #[error("Transcription file was not generated: {}", .0.display())]
    OutputMissing(PathBuf),

    #[error("Failed to read transcription output: {0}")]
    ReadFailed(String),

    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Port for speech-to-text over normalized audio
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Verify the engine executable and model are present.
    async fn ensure_ready(&self) -> Result<(), TranscriptionError>;

    /// Path of the side-output file the engine writes for `audio`.
    fn side_output_path(&self, audio: &Path) -> PathBuf;

    /// Transcribe normalized audio.
    ///
    /// # Returns
    /// The trimmed caption; silence yields the no-speech sentinel
    async fn transcribe(&self, audio: &Path) -> Result<Caption, TranscriptionError>;
}
