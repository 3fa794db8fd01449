//! Text-generation client for the Replicate predictions API.
//!
//! Replicate runs generations as asynchronous jobs:
//! - `POST {base}/predictions` submits the prompt and returns `{ id, status }`
//! - `GET  {base}/predictions/{id}` re-fetches the job status
//!
//! The backend offers no push notification, so completion is observed with a
//! bounded busy-poll: sleep a fixed interval, re-fetch, up to `max_attempts`
//! times. The two unhappy endings stay distinct: a job the backend marked
//! `failed` and a job that never became terminal before the polls ran out.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::GenerationConfig;

/// Substituted when a succeeded prediction carries no output fragments.
pub const EMPTY_OUTPUT_FALLBACK: &str =
    "I apologize, but I was unable to generate a response.";

/// Errors produced by [`ReplicateService`].
#[derive(Debug, Error)]
pub enum GenerationError {
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
    #[error("failed to decode prediction response: {0}")]
    Decode(String),

    /// The backend reported the prediction as failed.
    #[error("generation job {id} reported failure on the backend")]
    Failed {
        /// Prediction id assigned at submission.
        id: String,
    },

    /// The prediction never reached a terminal status within the poll budget.
    #[error("generation job {id} did not finish within {attempts} status polls")]
    TimedOut {
        /// Prediction id assigned at submission.
        id: String,
        /// Number of polls issued before giving up.
        attempts: u32,
    },
}

/// Lifecycle status of a prediction job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    /// Any status this client does not know; treated as non-terminal.
    #[serde(other)]
    Unknown,
}

impl PredictionStatus {
    /// Only `succeeded` and `failed` stop the polling loop; everything else
    /// keeps consuming attempts until the budget is exhausted.
    fn is_terminal(self) -> bool {
        matches!(self, PredictionStatus::Succeeded | PredictionStatus::Failed)
    }
}

/// Thin client for Replicate predictions with bounded polling.
///
/// One submission call, then up to `max_attempts` status polls. No state is
/// retained between calls beyond the job id and its latest status, and the
/// job is never cancelled on the backend after the poller gives up.
pub struct ReplicateService {
    client: reqwest::Client,
    cfg: GenerationConfig,
    url_predictions: String,
}

impl ReplicateService {
    /// Creates a new predictions client from the given config.
    ///
    /// # Errors
    /// [`GenerationError::Transport`] if the HTTP client cannot be built.
    pub fn new(cfg: GenerationConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder().timeout(cfg.timeout).build()?;

        let base = cfg.api_base.trim_end_matches('/').to_string();
        let url_predictions = format!("{base}/predictions");

        Ok(Self {
            client,
            cfg,
            url_predictions,
        })
    }

    /// Submit `prompt` and poll the resulting job to completion.
    ///
    /// On success the output fragments are concatenated in order; a
    /// succeeded job with no output yields [`EMPTY_OUTPUT_FALLBACK`]
    /// instead of an error.
    ///
    /// # Errors
    /// - [`GenerationError::Failed`] if the backend marked the job failed
    /// - [`GenerationError::TimedOut`] if the poll budget ran out first
    /// - [`GenerationError::HttpStatus`] / [`GenerationError::Transport`] /
    ///   [`GenerationError::Decode`] for submission problems
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut prediction = self.submit(prompt).await?;
        debug!(id = %prediction.id, status = ?prediction.status, "prediction submitted");

        let mut attempts = 0u32;
        while !prediction.status.is_terminal() && attempts < self.cfg.max_attempts {
            tokio::time::sleep(self.cfg.poll_interval).await;

            // A failed poll fetch only consumes an attempt; the job may
            // still finish and a later poll will observe it.
            match self.fetch(&prediction.id).await {
                Ok(latest) => {
                    debug!(id = %latest.id, status = ?latest.status, "prediction status");
                    prediction = latest;
                }
                Err(err) => {
                    warn!(id = %prediction.id, error = %err, "status poll failed");
                }
            }

            attempts += 1;
        }

        match prediction.status {
            PredictionStatus::Succeeded => {
                let text = prediction.output.unwrap_or_default().concat();
                if text.is_empty() {
                    Ok(EMPTY_OUTPUT_FALLBACK.to_string())
                } else {
                    Ok(text)
                }
            }
            PredictionStatus::Failed => Err(GenerationError::Failed { id: prediction.id }),
            _ => Err(GenerationError::TimedOut {
                id: prediction.id,
                attempts,
            }),
        }
    }

    /// `POST /predictions` — start a generation job.
    async fn submit(&self, prompt: &str) -> Result<Prediction, GenerationError> {
        let body = PredictionRequest {
            version: &self.cfg.model_version,
            input: PredictionInput {
                prompt,
                max_length: self.cfg.max_length,
                temperature: self.cfg.temperature,
                top_p: self.cfg.top_p,
                repetition_penalty: self.cfg.repetition_penalty,
            },
        };

        debug!("POST {}", self.url_predictions);
        let resp = self
            .client
            .post(&self.url_predictions)
            .header("Authorization", format!("Token {}", self.cfg.api_token))
            .json(&body)
            .send()
            .await?;

        self.decode(resp, &self.url_predictions).await
    }

    /// `GET /predictions/{id}` — re-fetch job status.
    async fn fetch(&self, id: &str) -> Result<Prediction, GenerationError> {
        let url = format!("{}/{id}", self.url_predictions);
        let resp = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.cfg.api_token))
            .send()
            .await?;

        self.decode(resp, &url).await
    }

    async fn decode(
        &self,
        resp: reqwest::Response,
        url: &str,
    ) -> Result<Prediction, GenerationError> {
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(240).collect::<String>();
            return Err(GenerationError::HttpStatus {
                status,
                url: url.to_string(),
                snippet,
            });
        }

        resp.json::<Prediction>()
            .await
            .map_err(|e| GenerationError::Decode(format!("serde error: {e}")))
    }
}

/// Request body for `POST /predictions`.
#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    version: &'a str,
    input: PredictionInput<'a>,
}

#[derive(Debug, Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
    max_length: u32,
    temperature: f32,
    top_p: f32,
    repetition_penalty: f32,
}

/// Prediction job as returned by both endpoints.
#[derive(Debug, Deserialize)]
struct Prediction {
    id: String,
    status: PredictionStatus,
    #[serde(default)]
    output: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cfg(base: &str, max_attempts: u32) -> GenerationConfig {
        GenerationConfig {
            api_base: base.to_string(),
            api_token: "r8-test".into(),
            model_version: "deadbeef".into(),
            max_length: 500,
            temperature: 0.7,
            top_p: 0.9,
            repetition_penalty: 1.15,
            max_attempts,
            poll_interval: Duration::from_millis(0),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn immediate_success_joins_output_fragments() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .and(header("authorization", "Token r8-test"))
            .and(body_partial_json(serde_json::json!({
                "version": "deadbeef",
                "input": { "max_length": 500, "top_p": 0.9 }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "pred-1",
                "status": "succeeded",
                "output": ["Use fine-thread ", "drywall screws."]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let svc = ReplicateService::new(cfg(&server.uri(), 30)).unwrap();
        let text = svc.generate("What screws for drywall?").await.unwrap();
        assert_eq!(text, "Use fine-thread drywall screws.");
    }

    #[tokio::test]
    async fn polls_until_succeeded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "pred-2",
                "status": "starting"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/predictions/pred-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "pred-2",
                "status": "succeeded",
                "output": ["done"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let svc = ReplicateService::new(cfg(&server.uri(), 30)).unwrap();
        let text = svc.generate("prompt").await.unwrap();
        assert_eq!(text, "done");
    }

    #[tokio::test]
    async fn exhausted_polls_time_out_after_exactly_max_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "pred-3",
                "status": "starting"
            })))
            .expect(1)
            .mount(&server)
            .await;
        // Pinned to `processing`: the loop must stop on the attempt budget,
        // not on the backend.
        Mock::given(method("GET"))
            .and(path("/predictions/pred-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "pred-3",
                "status": "processing"
            })))
            .expect(3)
            .mount(&server)
            .await;

        let svc = ReplicateService::new(cfg(&server.uri(), 3)).unwrap();
        let err = svc.generate("prompt").await.unwrap_err();
        match err {
            GenerationError::TimedOut { id, attempts } => {
                assert_eq!(id, "pred-3");
                assert_eq!(attempts, 3);
            }
            other => panic!("expected TimedOut, got: {other}"),
        }
    }

    #[tokio::test]
    async fn backend_failure_is_reported_distinctly() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "pred-4",
                "status": "starting"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/predictions/pred-4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "pred-4",
                "status": "failed"
            })))
            .mount(&server)
            .await;

        let svc = ReplicateService::new(cfg(&server.uri(), 30)).unwrap();
        let err = svc.generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerationError::Failed { .. }));
    }

    #[tokio::test]
    async fn empty_output_substitutes_safe_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "pred-5",
                "status": "succeeded",
                "output": []
            })))
            .mount(&server)
            .await;

        let svc = ReplicateService::new(cfg(&server.uri(), 30)).unwrap();
        let text = svc.generate("prompt").await.unwrap();
        assert_eq!(text, EMPTY_OUTPUT_FALLBACK);
    }

    #[tokio::test]
    async fn submission_error_status_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let svc = ReplicateService::new(cfg(&server.uri(), 30)).unwrap();
        let err = svc.generate("prompt").await.unwrap_err();
        match err {
            GenerationError::HttpStatus { status, .. } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
            }
            other => panic!("expected HttpStatus, got: {other}"),
        }
    }
}
