//! Vector-search client for the Qdrant REST API.
//!
//! Implements a single call:
//! - `POST {url}/collections/{collection}/points/search` with
//!   `{ vector, limit, with_payload: true, score_threshold }`
//!
//! Zero matches above the threshold is a successful, empty result; only
//! transport problems, error statuses and malformed payloads are errors.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::SearchConfig;

/// Errors produced by [`QdrantSearchService`].
#[derive(Debug, Error)]
pub enum SearchError {
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

    /// Response body did not match the expected shape.
    #[error("failed to decode search response: {0}")]
    Decode(String),
}

/// One retrieved chunk: payload text, similarity score and the remaining
/// payload fields as source metadata.
///
/// Ordering is whatever the backend returned (descending score); callers
/// must not re-sort.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    /// Similarity score in `[0, 1]`.
    pub score: f32,
    /// Chunk text stored by the ingestion pipeline.
    pub text: String,
    /// Payload fields other than `text` (source document, page, ...).
    pub metadata: serde_json::Map<String, Value>,
}

/// Thin client for Qdrant nearest-neighbor search over REST.
pub struct QdrantSearchService {
    client: reqwest::Client,
    cfg: SearchConfig,
    url_search: String,
}

impl QdrantSearchService {
    /// Creates a new search client from the given config.
    ///
    /// # Errors
    /// [`SearchError::Transport`] if the HTTP client cannot be built.
    pub fn new(cfg: SearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder().timeout(cfg.timeout).build()?;

        let base = cfg.url.trim_end_matches('/').to_string();
        let url_search = format!("{base}/collections/{}/points/search", cfg.collection);

        Ok(Self {
            client,
            cfg,
            url_search,
        })
    }

    /// Return the top-`limit` chunks closest to `vector` scoring at least
    /// `score_threshold`, in backend order.
    ///
    /// # Errors
    /// - [`SearchError::HttpStatus`] for non-2xx responses
    /// - [`SearchError::Transport`] for client errors
    /// - [`SearchError::Decode`] if a hit payload has no `text` field
    pub async fn search(
        &self,
        vector: &[f32],
        limit: u64,
        score_threshold: f32,
    ) -> Result<Vec<ScoredChunk>, SearchError> {
        let body = SearchRequest {
            vector,
            limit,
            with_payload: true,
            score_threshold,
        };

        debug!("POST {}", self.url_search);
        let mut req = self.client.post(&self.url_search).json(&body);
        if let Some(key) = &self.cfg.api_key {
            req = req.header("api-key", key);
        }
        let resp = req.send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_search.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(240).collect::<String>();
            return Err(SearchError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: SearchResponse = resp
            .json()
            .await
            .map_err(|e| SearchError::Decode(format!("serde error: {e}")))?;

        let mut chunks = Vec::with_capacity(out.result.len());
        for point in out.result {
            chunks.push(point.into_chunk()?);
        }

        debug!(hits = chunks.len(), "qdrant search done");
        Ok(chunks)
    }
}

/// Request body for `POST /collections/{name}/points/search`.
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: u64,
    with_payload: bool,
    score_threshold: f32,
}

/// Response body: `{ result: [ { score, payload: { text, ... } } ] }`.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchPoint>,
}

#[derive(Debug, Deserialize)]
struct SearchPoint {
    score: f32,
    #[serde(default)]
    payload: serde_json::Map<String, Value>,
}

impl SearchPoint {
    /// Split the payload into chunk text and source metadata.
    ///
    /// Ingestion guarantees every stored point carries `payload.text`;
    /// a point without it is a malformed payload, not an empty result.
    fn into_chunk(mut self) -> Result<ScoredChunk, SearchError> {
        let text = match self.payload.remove("text") {
            Some(Value::String(s)) => s,
            _ => {
                return Err(SearchError::Decode(
                    "search hit payload is missing the `text` field".into(),
                ));
            }
        };

        Ok(ScoredChunk {
            score: self.score,
            text,
            metadata: self.payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cfg(base: &str) -> SearchConfig {
        SearchConfig {
            url: base.to_string(),
            api_key: Some("qdrant-key".into()),
            collection: "screws".into(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn returns_chunks_in_backend_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/screws/points/search"))
            .and(header("api-key", "qdrant-key"))
            .and(body_partial_json(serde_json::json!({
                "limit": 5,
                "with_payload": true,
                "score_threshold": 0.7
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": [
                    { "score": 0.92, "payload": { "text": "Drywall screws", "source": "guide.pdf" } },
                    { "score": 0.81, "payload": { "text": "Wood screws" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let svc = QdrantSearchService::new(cfg(&server.uri())).unwrap();
        let chunks = svc.search(&[0.1, 0.2], 5, 0.7).await.unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "Drywall screws");
        assert_eq!(chunks[0].score, 0.92);
        assert_eq!(
            chunks[0].metadata.get("source"),
            Some(&Value::String("guide.pdf".into()))
        );
        assert_eq!(chunks[1].text, "Wood screws");
    }

    #[tokio::test]
    async fn zero_matches_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/screws/points/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": [] })),
            )
            .mount(&server)
            .await;

        let svc = QdrantSearchService::new(cfg(&server.uri())).unwrap();
        let chunks = svc.search(&[0.1], 5, 0.7).await.unwrap();
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn surfaces_backend_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/screws/points/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("collection unavailable"))
            .mount(&server)
            .await;

        let svc = QdrantSearchService::new(cfg(&server.uri())).unwrap();
        let err = svc.search(&[0.1], 5, 0.7).await.unwrap_err();
        match err {
            SearchError::HttpStatus { status, .. } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            }
            other => panic!("expected HttpStatus, got: {other}"),
        }
    }

    #[tokio::test]
    async fn payload_without_text_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/screws/points/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": [ { "score": 0.9, "payload": { "source": "guide.pdf" } } ]
            })))
            .mount(&server)
            .await;

        let svc = QdrantSearchService::new(cfg(&server.uri())).unwrap();
        let err = svc.search(&[0.1], 5, 0.7).await.unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }
}
