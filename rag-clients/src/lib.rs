//! Thin HTTP clients for the external backends used by the query pipeline.
//!
//! One service per file, each with its own typed error:
//! - [`OpenAiEmbeddingsService`] — `POST {base}/embeddings` (OpenAI-compatible)
//! - [`QdrantSearchService`]     — `POST {url}/collections/{name}/points/search`
//! - [`ReplicateService`]        — `POST {base}/predictions` + bounded status polling
//!
//! These clients perform exactly one logical operation each and apply no
//! retry policy of their own; the pipeline decides what a failure means.

pub mod config;
pub mod services;

pub use config::{ConfigError, EmbeddingConfig, GenerationConfig, SearchConfig};
pub use services::openai_embeddings::{EmbeddingError, OpenAiEmbeddingsService};
pub use services::qdrant_search::{QdrantSearchService, ScoredChunk, SearchError};
pub use services::replicate_generate::{
    EMPTY_OUTPUT_FALLBACK, GenerationError, PredictionStatus, ReplicateService,
};
