use rag_pipeline::{LivePipeline, PipelineBuildError};

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Query pipeline wired to the live embedding, search and generation
    /// backends. Stateless per request; safe to share via `Arc`.
    pub pipeline: LivePipeline,
}

impl AppState {
    /// Build the pipeline clients from environment variables.
    pub fn from_env() -> Result<Self, PipelineBuildError> {
        Ok(Self {
            pipeline: rag_pipeline::live_from_env()?,
        })
    }
}
