use std::collections::BTreeMap;
use std::path::Path;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{AudioNormalizer, CacheStore, TranscriptionEngine};
use crate::server::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub checks: BTreeMap<&'static str, bool>,
    pub whisper_executable_path: String,
    pub whisper_model_path: String,
    pub cache_directory: String,
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Reports whether the engine, its model and both working directories are present.
pub async fn health_handler<C, N, E>(State(state): State<AppState<C, N, E>>) -> impl IntoResponse
where
    C: CacheStore + 'static,
    N: AudioNormalizer + 'static,
    E: TranscriptionEngine + 'static,
{
    let settings = &state.settings;
    let checks = BTreeMap::from([
        (
            "whisper_executable",
            exists(&settings.whisper_executable).await,
        ),
        ("whisper_model", exists(&settings.whisper_model).await),
        ("temp_directory", exists(&settings.temp_dir).await),
        ("cache_directory", exists(&settings.cache_dir).await),
    ]);

    let healthy = checks.values().all(|ok| *ok);
    let status = if healthy {
        StatusCode::OK
    } else {
        tracing::warn!(?checks, "Health check failed");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" },
            checks,
            whisper_executable_path: settings.whisper_executable.display().to_string(),
            whisper_model_path: settings.whisper_model.display().to_string(),
            cache_directory: settings.cache_dir.display().to_string(),
        }),
    )
}
