use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{AudioNormalizer, CacheStore, TranscriptionEngine};
use crate::server::state::AppState;

/// Container formats advertised by the descriptor
pub const SUPPORTED_FORMATS: &[&str] = &["mp4", "mp3", "wav", "flac", "ogg"];

#[derive(Debug, Serialize)]
pub struct ServiceDescriptor {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
    pub supported_formats: &'static [&'static str],
    pub whisper_model: String,
}

pub async fn root_handler<C, N, E>(State(state): State<AppState<C, N, E>>) -> Json<ServiceDescriptor>
where
    C: CacheStore + 'static,
    N: AudioNormalizer + 'static,
    E: TranscriptionEngine + 'static,
{
    let endpoints = BTreeMap::from([
        (
            "POST /transcribe",
            "Upload an audio or video file for transcription",
        ),
        ("GET /health", "Health check endpoint"),
    ]);

    Json(ServiceDescriptor {
        service: "whisper-gateway",
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
        supported_formats: SUPPORTED_FORMATS,
        whisper_model: state.settings.model_name(),
    })
}
