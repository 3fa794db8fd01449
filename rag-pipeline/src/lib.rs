//! Retrieval-augmented query pipeline for fastener Q&A.
//!
//! Public entry point: [`QueryPipeline::run`]. It validates the query,
//! embeds it, retrieves the top-K chunks from the vector store, assembles
//! a bounded context block, renders the prompt, calls the generation
//! backend and returns the answer with usage metadata.
//!
//! Each stage talks to its backend through a trait seam
//! ([`EmbeddingClient`], [`VectorSearchClient`], [`GenerationClient`]) so
//! tests can substitute deterministic in-memory stubs for live HTTP.

mod api_types;
mod cfg;
mod clients;
mod context;
mod error;
mod pipeline;
mod prompt;

pub use api_types::QueryAnswer;
pub use cfg::PipelineConfig;
pub use clients::{EmbeddingClient, GenerationClient, VectorSearchClient};
pub use context::assemble_context;
pub use error::{PipelineBuildError, PipelineError};
pub use pipeline::QueryPipeline;
pub use prompt::build_prompt;

use rag_clients::{
    EmbeddingConfig, GenerationConfig, OpenAiEmbeddingsService, QdrantSearchService,
    ReplicateService, SearchConfig,
};

/// Pipeline wired to the live backend clients.
pub type LivePipeline = QueryPipeline<OpenAiEmbeddingsService, QdrantSearchService, ReplicateService>;

/// Build a [`LivePipeline`] from environment variables.
///
/// # Errors
/// Propagates [`PipelineBuildError`] when a required credential is missing
/// or an HTTP client cannot be constructed.
pub fn live_from_env() -> Result<LivePipeline, PipelineBuildError> {
    let embedder = OpenAiEmbeddingsService::new(EmbeddingConfig::from_env()?)?;
    let search = QdrantSearchService::new(SearchConfig::from_env()?)?;
    let generator = ReplicateService::new(GenerationConfig::from_env()?)?;

    Ok(QueryPipeline::new(
        embedder,
        search,
        generator,
        PipelineConfig::from_env(),
    ))
}
