//! Public answer types re-used by external crates (e.g., the HTTP API layer).

/// Result of a successful pipeline run.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryAnswer {
    /// Generated answer text.
    pub response: String,
    /// Exact number of chunks the search stage returned for this request.
    pub context_chunks_used: usize,
    /// The original query, echoed back.
    pub query: String,
}
