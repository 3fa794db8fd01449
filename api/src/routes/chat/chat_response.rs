use serde::Serialize;

/// End-user-safe message returned alongside every stage failure.
pub const FALLBACK_RESPONSE: &str = "I'm having trouble accessing my knowledge base right now. \
Please ensure all API credentials are properly configured and try again.";

/// Success body for `POST /chat-query`.
#[derive(Debug, Serialize)]
pub struct ChatQuerySuccess {
    pub success: bool,
    /// Generated answer text.
    pub response: String,
    /// Exact number of retrieved chunks fed to the model.
    pub context_chunks_used: usize,
    /// The original query, echoed back.
    pub query: String,
}

/// Failure body: developer-oriented error plus the safe fallback message.
#[derive(Debug, Serialize)]
pub struct ChatQueryFailure {
    pub error: String,
    pub fallback_response: &'static str,
}

/// Body for a missing/empty query (HTTP 400).
#[derive(Debug, Serialize)]
pub struct QueryRequired {
    pub error: &'static str,
}
