//! Typed errors for the query pipeline.

use rag_clients::{ConfigError, EmbeddingError, GenerationError, SearchError};
use thiserror::Error;

/// Everything that can go wrong during one pipeline run.
///
/// Each stage failure is converted exactly once at this boundary; the HTTP
/// layer maps every variant to a single uniform failure response. Timeouts
/// and backend-reported generation failures stay distinct so operators can
/// tell a slow model from a broken integration.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The query was empty or whitespace-only.
    #[error("query must not be empty")]
    InvalidInput,

    /// The embedding stage failed.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The vector search stage failed.
    #[error("vector search failed: {0}")]
    Search(#[from] SearchError),

    /// Generation never reached a terminal status within the poll budget.
    #[error("generation timed out after {attempts} status polls")]
    GenerationTimeout {
        /// Number of polls issued before giving up.
        attempts: u32,
    },

    /// Generation failed outright (backend failure status, submission or
    /// decode problem).
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// Catch-all for conditions outside the stage taxonomy.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<GenerationError> for PipelineError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::TimedOut { attempts, .. } => {
                PipelineError::GenerationTimeout { attempts }
            }
            other => PipelineError::GenerationFailed(other.to_string()),
        }
    }
}

/// Errors raised while wiring the live pipeline at startup.
#[derive(Debug, Error)]
pub enum PipelineBuildError {
    /// Required environment configuration is missing.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The embeddings HTTP client could not be built.
    #[error("failed to build embedding client: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The vector-search HTTP client could not be built.
    #[error("failed to build search client: {0}")]
    Search(#[from] SearchError),

    /// The generation HTTP client could not be built.
    #[error("failed to build generation client: {0}")]
    Generation(#[from] GenerationError),
}
