//! Retrieval knobs, loaded from environment variables.

/// Tuning for the retrieval stage. All fields have defaults via `from_env`.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// How many nearest neighbors to request from the vector store.
    pub top_k: u64,
    /// Minimum similarity score a chunk must clear to be retrieved.
    pub min_score: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_score: 0.7,
        }
    }
}

impl PipelineConfig {
    /// Build from environment variables with the defaults above.
    pub fn from_env() -> Self {
        Self {
            top_k: parse("RAG_TOP_K", 5),
            min_score: parse("RAG_MIN_SCORE", 0.7),
        }
    }
}

fn parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
