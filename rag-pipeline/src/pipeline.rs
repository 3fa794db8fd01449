//! The pipeline orchestrator: embed → search → assemble → prompt → generate.

use tracing::{debug, info};

use crate::api_types::QueryAnswer;
use crate::cfg::PipelineConfig;
use crate::clients::{EmbeddingClient, GenerationClient, VectorSearchClient};
use crate::context::assemble_context;
use crate::error::PipelineError;
use crate::prompt::build_prompt;

/// One query pipeline over three backend clients.
///
/// Holds no per-request state: every [`run`](QueryPipeline::run) is an
/// independent, strictly sequential chain of outbound calls, so concurrent
/// runs share nothing but the client handles.
pub struct QueryPipeline<E, S, G> {
    embedder: E,
    search: S,
    generator: G,
    cfg: PipelineConfig,
}

impl<E, S, G> QueryPipeline<E, S, G>
where
    E: EmbeddingClient,
    S: VectorSearchClient,
    G: GenerationClient,
{
    /// Assemble a pipeline from its stage clients and retrieval knobs.
    pub fn new(embedder: E, search: S, generator: G, cfg: PipelineConfig) -> Self {
        Self {
            embedder,
            search,
            generator,
            cfg,
        }
    }

    /// Answer one query.
    ///
    /// Stages run strictly in order; the first failing stage aborts the run
    /// and maps into [`PipelineError`] exactly once. A retrieval miss (zero
    /// chunks) is not a failure: generation proceeds with an empty context
    /// section.
    ///
    /// # Errors
    /// - [`PipelineError::InvalidInput`] for an empty/whitespace query,
    ///   raised before any backend call
    /// - the wrapped stage error otherwise
    pub async fn run(&self, query: &str) -> Result<QueryAnswer, PipelineError> {
        if query.trim().is_empty() {
            return Err(PipelineError::InvalidInput);
        }

        info!(target: "rag_pipeline", query, "chat query: start");

        let vector = self.embedder.embed(query).await?;
        debug!(target: "rag_pipeline", dim = vector.len(), "query embedding generated");

        let hits = self
            .search
            .search(&vector, self.cfg.top_k, self.cfg.min_score)
            .await?;
        info!(target: "rag_pipeline", hits = hits.len(), "vector search done");

        let context = assemble_context(&hits);
        let prompt = build_prompt(&context, query);

        let response = self.generator.generate(&prompt).await?;
        info!(target: "rag_pipeline", "chat response generated");

        Ok(QueryAnswer {
            response,
            context_chunks_used: hits.len(),
            query: query.to_string(),
        })
    }
}
