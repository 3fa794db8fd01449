//! Embeddings client for OpenAI-compatible backends.
//!
//! Implements a single call:
//! - `POST {base}/embeddings` with `{ model, input }` — returns one vector
//!   per input; this client always submits a single input and extracts the
//!   first vector from `data`.
//!
//! No retry policy lives here; a failed call is reported as-is and the
//! pipeline decides whether the request is over.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::EmbeddingConfig;

/// Errors produced by [`OpenAiEmbeddingsService`].
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The input text is empty or whitespace-only.
    #[error("embedding input must not be empty")]
    EmptyInput,

    /// Transport/HTTP client error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from the backend.
    #[error("unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Response body did not contain a usable embedding vector.
    #[error("failed to decode embeddings response: {0}")]
    Decode(String),
}

/// Thin client for an OpenAI-compatible `/embeddings` endpoint.
///
/// Reuses one HTTP client with a configurable timeout. The model identifier
/// is fixed per instance via [`EmbeddingConfig`].
pub struct OpenAiEmbeddingsService {
    client: reqwest::Client,
    cfg: EmbeddingConfig,
    url_embeddings: String,
}

impl OpenAiEmbeddingsService {
    /// Creates a new embeddings client from the given config.
    ///
    /// # Errors
    /// [`EmbeddingError::Transport`] if the HTTP client cannot be built.
    pub fn new(cfg: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let client = reqwest::Client::builder().timeout(cfg.timeout).build()?;

        let base = cfg.api_base.trim_end_matches('/').to_string();
        let url_embeddings = format!("{base}/embeddings");

        Ok(Self {
            client,
            cfg,
            url_embeddings,
        })
    }

    /// Embed a single text into a fixed-length vector.
    ///
    /// # Errors
    /// - [`EmbeddingError::EmptyInput`] for empty/whitespace input
    /// - [`EmbeddingError::HttpStatus`] for non-2xx responses
    /// - [`EmbeddingError::Transport`] for client errors
    /// - [`EmbeddingError::Decode`] if the vector field is missing or empty
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, EmbeddingError> {
        if input.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            input,
        };

        debug!("POST {}", self.url_embeddings);
        let resp = self
            .client
            .post(&self.url_embeddings)
            .bearer_auth(&self.cfg.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embeddings.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(240).collect::<String>();
            return Err(EmbeddingError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: EmbeddingsResponse = resp
            .json()
            .await
            .map_err(|e| EmbeddingError::Decode(format!("serde error: {e}")))?;

        let first = out
            .data
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::Decode("response contained no embedding data".into()))?;

        if first.embedding.is_empty() {
            return Err(EmbeddingError::Decode("embedding vector is empty".into()));
        }

        Ok(first.embedding)
    }
}

/// Request body for `POST /embeddings`.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

/// Response body for `POST /embeddings`.
///
/// Minimal shape: `{ data: [ { embedding: number[] } ] }`.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    #[serde(default)]
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    embedding: Vec<f32>,
}
