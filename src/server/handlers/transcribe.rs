use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::application::ports::{AudioNormalizer, CacheStore, TranscriptionEngine};
use crate::application::PipelineError;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub caption: String,
    pub cached: bool,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<C, N, E>(
    State(state): State<AppState<C, N, E>>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError>
where
    C: CacheStore + 'static,
    N: AudioNormalizer + 'static,
    E: TranscriptionEngine + 'static,
{
    let (filename, data) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => {
                tracing::warn!("Transcribe request with no file");
                return Err(ApiError::bad_request("No file provided"));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(ApiError {
                    status: e.status(),
                    ..ApiError::bad_request(format!("Failed to read multipart: {}", e.body_text()))
                });
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(ApiError::bad_request("No file provided")),
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = match field.bytes().await {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read file bytes");
                return Err(ApiError {
                    status: e.status(),
                    ..ApiError::bad_request(format!("Failed to read file: {}", e.body_text()))
                });
            }
        };

        tracing::info!(
            filename = %filename,
            content_type = %content_type,
            bytes = data.len(),
            "File upload received"
        );
        break (filename, data);
    };

    // Run detached so a dropped connection cannot interrupt a stage midway.
    let pipeline = Arc::clone(&state.pipeline);
    let outcome = tokio::spawn(async move { pipeline.submit(&filename, data.to_vec()).await })
        .await
        .map_err(|e| PipelineError::Unexpected(e.to_string()))??;

    Ok(Json(TranscribeResponse {
        caption: outcome.caption.into_string(),
        cached: outcome.cached,
    }))
}
