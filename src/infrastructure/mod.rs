//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like FFmpeg, whisper.cpp and the
//! local filesystem.

pub mod cache;
pub mod config;
pub mod conversion;
pub mod observability;
pub mod process;
pub mod transcription;

use std::sync::Arc;

use crate::application::TranscriptionPipeline;
use crate::domain::config::GatewaySettings;

// Re-export adapters
pub use cache::FsCacheStore;
pub use config::XdgConfigStore;
pub use conversion::FfmpegNormalizer;
pub use observability::init_tracing;
pub use process::TokioProcessRunner;
pub use transcription::WhisperCliEngine;

/// The pipeline wired with the production adapters
pub type GatewayPipeline = TranscriptionPipeline<
    FsCacheStore,
    FfmpegNormalizer<TokioProcessRunner>,
    WhisperCliEngine<TokioProcessRunner>,
>;

/// Create the production pipeline for the given settings
pub fn create_pipeline(settings: &GatewaySettings) -> GatewayPipeline {
    let runner = Arc::new(TokioProcessRunner::with_timeout(settings.tool_timeout));

    TranscriptionPipeline::new(
        FsCacheStore::new(&settings.cache_dir),
        FfmpegNormalizer::new(Arc::clone(&runner), &settings.ffmpeg_path),
        WhisperCliEngine::new(
            runner,
            &settings.whisper_executable,
            &settings.whisper_model,
            &settings.temp_dir,
        ),
        &settings.temp_dir,
    )
}

/// Create the temp and cache directories if they don't exist
pub async fn prepare_directories(settings: &GatewaySettings) -> std::io::Result<()> {
    tokio::fs::create_dir_all(&settings.temp_dir).await?;
    FsCacheStore::new(&settings.cache_dir).ensure_root().await
}
