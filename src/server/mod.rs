//! HTTP layer - axum router, handlers and shared state

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use std::future::Future;

use tokio::net::TcpListener;

use crate::application::ports::{AudioNormalizer, CacheStore, TranscriptionEngine};

pub use error::{ApiError, ErrorResponse};
pub use router::create_router;
pub use state::AppState;

/// Serve the gateway on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish.
pub async fn serve<C, N, E>(
    listener: TcpListener,
    state: AppState<C, N, E>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()>
where
    C: CacheStore + 'static,
    N: AudioNormalizer + 'static,
    E: TranscriptionEngine + 'static,
{
    let router = create_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}
