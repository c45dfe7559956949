use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{AudioNormalizer, CacheStore, TranscriptionEngine};
use crate::server::handlers::{health_handler, root_handler, transcribe_handler};
use crate::server::state::AppState;

pub fn create_router<C, N, E>(state: AppState<C, N, E>) -> Router
where
    C: CacheStore + 'static,
    N: AudioNormalizer + 'static,
    E: TranscriptionEngine + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.settings.max_upload_bytes);

    Router::new()
        .route("/", get(root_handler::<C, N, E>))
        .route("/health", get(health_handler::<C, N, E>))
        .route("/transcribe", post(transcribe_handler::<C, N, E>))
        .layer(body_limit)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
