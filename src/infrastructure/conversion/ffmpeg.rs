//! FFmpeg-based audio normalizer adapter

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{AudioNormalizer, NormalizeError, ProcessRunner};

/// Target sample rate for speech recognition
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Converts any audio or video container FFmpeg understands into
/// 16 kHz mono 16-bit PCM WAV.
pub struct FfmpegNormalizer<R: ProcessRunner> {
    runner: Arc<R>,
    ffmpeg: PathBuf,
}

impl<R: ProcessRunner> FfmpegNormalizer<R> {
    /// Create a normalizer invoking the `ffmpeg` binary at `ffmpeg`
    /// (a bare name is looked up on `PATH`).
    pub fn new(runner: Arc<R>, ffmpeg: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            ffmpeg: ffmpeg.into(),
        }
    }

    /// Build FFmpeg args for conversion
    fn build_ffmpeg_args(input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-ar".to_string(),
            TARGET_SAMPLE_RATE.to_string(),
            "-ac".to_string(),
            "1".to_string(), // Mono
            "-c:a".to_string(),
            "pcm_s16le".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}

#[async_trait]
impl<R: ProcessRunner> AudioNormalizer for FfmpegNormalizer<R> {
    async fn normalize(&self, input: &Path, output: &Path) -> Result<(), NormalizeError> {
        let args = Self::build_ffmpeg_args(input, output);
        let result = self.runner.run(&self.ffmpeg, &args, None).await?;

        if !result.success() {
            let diagnostic = result.diagnostic();
            tracing::error!(input = %input.display(), error = %diagnostic, "FFmpeg error");
            return Err(NormalizeError::ConversionFailed(diagnostic));
        }

        let produced = fs::metadata(output)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !produced {
            return Err(NormalizeError::NoOutput(output.to_path_buf()));
        }

        Ok(())
    }
}
