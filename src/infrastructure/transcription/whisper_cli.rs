//! whisper.cpp CLI transcription engine adapter

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{ProcessRunner, TranscriptionEngine, TranscriptionError};
use crate::domain::transcription::Caption;

/// Runs `whisper-cli` against normalized audio and reads its `.txt` side-output.
pub struct WhisperCliEngine<R: ProcessRunner> {
    runner: Arc<R>,
    executable: PathBuf,
    model: PathBuf,
    work_dir: PathBuf,
}

impl<R: ProcessRunner> WhisperCliEngine<R> {
    /// Create an engine.
    ///
    /// # Arguments
    /// * `executable` - Path to the `whisper-cli` binary
    /// * `model` - Path to the ggml model file
    /// * `work_dir` - Working directory for the process (the temp area)
    pub fn new(
        runner: Arc<R>,
        executable: impl Into<PathBuf>,
        model: impl Into<PathBuf>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            executable: executable.into(),
            model: model.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Build whisper-cli args.
    ///
    /// Paths are absolute because the process runs in `work_dir`.
    fn build_whisper_args(model: &Path, audio: &Path) -> Vec<String> {
        vec![
            "-m".to_string(),
            model.to_string_lossy().to_string(),
            "-f".to_string(),
            audio.to_string_lossy().to_string(),
            "--output-txt".to_string(),
            "--no-prints".to_string(),
        ]
    }

    fn absolute(path: &Path) -> Result<PathBuf, TranscriptionError> {
        std::path::absolute(path).map_err(|e| TranscriptionError::ReadFailed(e.to_string()))
    }
}

#[async_trait]
impl<R: ProcessRunner> TranscriptionEngine for WhisperCliEngine<R> {
    async fn ensure_ready(&self) -> Result<(), TranscriptionError> {
        if !fs::try_exists(&self.executable).await.unwrap_or(false) {
            return Err(TranscriptionError::ExecutableNotFound(
                self.executable.clone(),
            ));
        }
        if !fs::try_exists(&self.model).await.unwrap_or(false) {
            return Err(TranscriptionError::ModelNotFound(self.model.clone()));
        }
        Ok(())
    }

    fn side_output_path(&self, audio: &Path) -> PathBuf {
        let mut name = audio.as_os_str().to_os_string();
        name.push(".txt");
        PathBuf::from(name)
    }

    async fn transcribe(&self, audio: &Path) -> Result<Caption, TranscriptionError> {
        let executable = Self::absolute(&self.executable)?;
        let args = Self::build_whisper_args(&Self::absolute(&self.model)?, &Self::absolute(audio)?);

        let result = self
            .runner
            .run(&executable, &args, Some(&self.work_dir))
            .await?;

        if !result.success() {
            let diagnostic = result.diagnostic();
            tracing::error!(audio = %audio.display(), error = %diagnostic, "Whisper error");
            return Err(TranscriptionError::EngineFailed(diagnostic));
        }

        let transcript_path = self.side_output_path(audio);
        tracing::debug!(path = %transcript_path.display(), "Reading transcription");

        let raw = match fs::read_to_string(&transcript_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TranscriptionError::OutputMissing(transcript_path));
            }
            Err(e) => return Err(TranscriptionError::ReadFailed(e.to_string())),
        };

        Ok(Caption::from_engine_output(&raw))
    }
}
