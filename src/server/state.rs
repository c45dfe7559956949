use std::sync::Arc;

use crate::application::ports::{AudioNormalizer, CacheStore, TranscriptionEngine};
use crate::application::TranscriptionPipeline;
use crate::domain::config::GatewaySettings;

/// Shared state handed to every handler
pub struct AppState<C, N, E>
where
    C: CacheStore,
    N: AudioNormalizer,
    E: TranscriptionEngine,
{
    pub pipeline: Arc<TranscriptionPipeline<C, N, E>>,
    pub settings: Arc<GatewaySettings>,
}

impl<C, N, E> AppState<C, N, E>
where
    C: CacheStore,
    N: AudioNormalizer,
    E: TranscriptionEngine,
{
    pub fn new(pipeline: TranscriptionPipeline<C, N, E>, settings: GatewaySettings) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            settings: Arc::new(settings),
        }
    }
}

impl<C, N, E> Clone for AppState<C, N, E>
where
    C: CacheStore,
    N: AudioNormalizer,
    E: TranscriptionEngine,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            settings: Arc::clone(&self.settings),
        }
    }
}
