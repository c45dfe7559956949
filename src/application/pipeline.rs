//! Transcription pipeline use case

use std::path::PathBuf;

use thiserror::Error;
use tokio::fs;
use uuid::Uuid;

use crate::domain::error::InvalidUploadError;
use crate::domain::transcription::{Caption, Upload};
use crate::domain::{ArtifactKind, Fingerprint};

use super::ledger::TempFileLedger;
use super::ports::{
    AudioNormalizer, CacheError, CacheStore, NormalizeError, ProcessError, TranscriptionEngine,
    TranscriptionError,
};

/// Classified pipeline failures
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Input(#[from] InvalidUploadError),

    #[error("{0}")]
    Configuration(String),

    #[error("Audio conversion failed: {0}")]
    Conversion(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Transcription file was not generated: {}", .0.display())]
    OutputMissing(PathBuf),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PipelineError {
    /// Stable classification string
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Input(_) => "input_error",
            Self::Configuration(_) => "configuration_error",
            Self::Conversion(_) => "conversion_error",
            Self::Transcription(_) => "transcription_error",
            Self::OutputMissing(_) => "output_missing_error",
            Self::Unexpected(_) => "unexpected_error",
        }
    }
}

impl From<NormalizeError> for PipelineError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Process(e @ ProcessError::NotFound(_)) => {
                Self::Configuration(e.to_string())
            }
            other => Self::Conversion(other.to_string()),
        }
    }
}

impl From<TranscriptionError> for PipelineError {
    fn from(err: TranscriptionError) -> Self {
        match err {
            TranscriptionError::ExecutableNotFound(_)
            | TranscriptionError::ModelNotFound(_)
            | TranscriptionError::Process(ProcessError::NotFound(_)) => {
                Self::Configuration(err.to_string())
            }
            TranscriptionError::OutputMissing(path) => Self::OutputMissing(path),
            TranscriptionError::ReadFailed(message) => Self::Unexpected(message),
            other => Self::Transcription(other.to_string()),
        }
    }
}

impl From<CacheError> for PipelineError {
    fn from(err: CacheError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Unexpected(err.to_string())
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionOutcome {
    pub caption: Caption,
    /// Whether the caption came straight from the transcription cache
    pub cached: bool,
}

/// Upload-to-caption pipeline with a two-stage content-addressed cache
pub struct TranscriptionPipeline<C, N, E>
where
    C: CacheStore,
    N: AudioNormalizer,
    E: TranscriptionEngine,
{
    cache: C,
    normalizer: N,
    engine: E,
    temp_dir: PathBuf,
}

impl<C, N, E> TranscriptionPipeline<C, N, E>
where
    C: CacheStore,
    N: AudioNormalizer,
    E: TranscriptionEngine,
{
    /// Create a new pipeline. Raw uploads are staged under `temp_dir`.
    pub fn new(cache: C, normalizer: N, engine: E, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache,
            normalizer,
            engine,
            temp_dir: temp_dir.into(),
        }
    }

    /// Transcribe an uploaded file.
    ///
    /// Rejects an unusable filename before touching the filesystem.
    pub async fn submit(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<TranscriptionOutcome, PipelineError> {
        let upload = Upload::new(filename, bytes)?;
        self.execute(&upload).await
    }

    /// Run the pipeline for a validated upload
    pub async fn execute(&self, upload: &Upload) -> Result<TranscriptionOutcome, PipelineError> {
        let fingerprint = upload.fingerprint();

        tracing::info!(
            filename = %upload.filename(),
            size = %upload.human_readable_size(),
            fingerprint = %fingerprint,
            "Received upload"
        );

        if self
            .cache
            .has_artifact(&fingerprint, ArtifactKind::Transcription)
            .await
        {
            let stored = self
                .cache
                .read_artifact(&fingerprint, ArtifactKind::Transcription)
                .await?;
            tracing::info!(fingerprint = %fingerprint.short(), "Found cached transcription");
            return Ok(TranscriptionOutcome {
                caption: Caption::from_cached(&String::from_utf8_lossy(&stored)),
                cached: true,
            });
        }

        self.engine.ensure_ready().await?;

        let mut ledger = TempFileLedger::new();
        let result = self.transcribe_fresh(upload, &fingerprint, &mut ledger).await;
        let report = ledger.release().await;
        if !report.failed.is_empty() {
            tracing::warn!(
                fingerprint = %fingerprint.short(),
                failed = report.failed.len(),
                "Some temp files could not be removed"
            );
        }

        result
    }

    async fn transcribe_fresh(
        &self,
        upload: &Upload,
        fingerprint: &Fingerprint,
        ledger: &mut TempFileLedger,
    ) -> Result<TranscriptionOutcome, PipelineError> {
        let audio_path = self.resolve_audio(upload, fingerprint, ledger).await?;

        ledger.track(self.engine.side_output_path(&audio_path));
        tracing::info!(audio = %audio_path.display(), "Running transcription");
        let caption = self.engine.transcribe(&audio_path).await?;

        if let Err(e) = self
            .cache
            .write_artifact(
                fingerprint,
                ArtifactKind::Transcription,
                caption.as_str().as_bytes(),
            )
            .await
        {
            tracing::warn!(fingerprint = %fingerprint.short(), error = %e, "Failed to save transcription to cache");
        } else {
            tracing::debug!(fingerprint = %fingerprint.short(), "Saved transcription to cache");
        }

        tracing::info!(
            fingerprint = %fingerprint.short(),
            chars = caption.as_str().chars().count(),
            "Transcription completed"
        );

        Ok(TranscriptionOutcome {
            caption,
            cached: false,
        })
    }

    /// Reuse the cached normalized audio or produce it straight into the cache.
    async fn resolve_audio(
        &self,
        upload: &Upload,
        fingerprint: &Fingerprint,
        ledger: &mut TempFileLedger,
    ) -> Result<PathBuf, PipelineError> {
        let audio_path = self
            .cache
            .artifact_path(fingerprint, ArtifactKind::NormalizedAudio);

        if self
            .cache
            .has_artifact(fingerprint, ArtifactKind::NormalizedAudio)
            .await
        {
            tracing::info!(fingerprint = %fingerprint.short(), "Found cached audio file");
            return Ok(audio_path);
        }

        let run_id = Uuid::new_v4();
        let input_path = self
            .temp_dir
            .join(format!("{}_{}", run_id, upload.filename()));

        ledger.track(&input_path);
        tracing::debug!(path = %input_path.display(), "Saving upload to temp file");
        fs::write(&input_path, upload.data()).await?;

        // A failed conversion must not leave a partial file where the cache
        // expects a finished artifact.
        ledger.track(&audio_path);
        tracing::info!(output = %audio_path.display(), "Converting audio to WAV");
        self.normalizer.normalize(&input_path, &audio_path).await?;
        ledger.protect(&audio_path);

        Ok(audio_path)
    }
}
