//! Client seams between the pipeline and the external backends.
//!
//! No async-trait, no `Box<dyn ...>`: plain traits with `Send` futures and
//! generic dispatch. The live implementations come from `rag-clients`;
//! tests plug in deterministic stubs.

use std::future::Future;

use rag_clients::{
    EmbeddingError, GenerationError, OpenAiEmbeddingsService, QdrantSearchService,
    ReplicateService, ScoredChunk, SearchError,
};

/// Turns a query text into a fixed-length vector.
pub trait EmbeddingClient: Send + Sync {
    /// Embed a single non-empty text.
    fn embed(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;
}

/// Retrieves the chunks closest to a query vector.
pub trait VectorSearchClient: Send + Sync {
    /// Top-`limit` chunks scoring at least `score_threshold`, in backend
    /// order. An empty result is success.
    fn search(
        &self,
        vector: &[f32],
        limit: u64,
        score_threshold: f32,
    ) -> impl Future<Output = Result<Vec<ScoredChunk>, SearchError>> + Send;
}

/// Produces the grounded answer for an assembled prompt.
pub trait GenerationClient: Send + Sync {
    /// Run one generation to completion (submission plus polling).
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

impl EmbeddingClient for OpenAiEmbeddingsService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        OpenAiEmbeddingsService::embed(self, text).await
    }
}

impl VectorSearchClient for QdrantSearchService {
    async fn search(
        &self,
        vector: &[f32],
        limit: u64,
        score_threshold: f32,
    ) -> Result<Vec<ScoredChunk>, SearchError> {
        QdrantSearchService::search(self, vector, limit, score_threshold).await
    }
}

impl GenerationClient for ReplicateService {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        ReplicateService::generate(self, prompt).await
    }
}
