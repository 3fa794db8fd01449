use serde::Deserialize;

/// Request body for `POST /chat-query`.
///
/// A missing `query` field deserializes to an empty string and is rejected
/// by the pipeline's input validation, so "missing" and "empty" share one
/// 400 response.
#[derive(Debug, Deserialize)]
pub struct ChatQueryRequest {
    #[serde(default)]
    pub query: String,
}
