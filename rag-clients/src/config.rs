//! Environment-driven configuration for the backend clients.
//!
//! Every knob has a default; only the API credentials are required.
//! `.env` loading happens once in the binary via `dotenvy`.

use std::time::Duration;

use thiserror::Error;

/// Replicate version hash for LLaMA 2 7B Chat.
pub const DEFAULT_MODEL_VERSION: &str =
    "f1d50bb24186c52daae319ca8366e53debdaa9e0ae7ff976e918df752732ccc4";

/// Errors raised while reading client configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {key}")]
    MissingEnv { key: &'static str },
}

/// Configuration for the OpenAI-compatible embeddings client.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// API base, e.g. "https://api.openai.com/v1".
    pub api_base: String,
    /// Bearer token for the embeddings API.
    pub api_key: String,
    /// Embedding model identifier.
    pub model: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl EmbeddingConfig {
    /// Load from environment variables with defaults.
    ///
    /// # Errors
    /// [`ConfigError::MissingEnv`] if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: env_or("OPENAI_API_BASE", "https://api.openai.com/v1"),
            api_key: required("OPENAI_API_KEY")?,
            model: env_or("EMBEDDING_MODEL", "text-embedding-ada-002"),
            timeout: http_timeout(),
        })
    }
}

/// Configuration for the Qdrant vector-search client.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Qdrant REST base URL, e.g. "http://127.0.0.1:6333".
    pub url: String,
    /// Optional `api-key` header value for managed clusters.
    pub api_key: Option<String>,
    /// Collection holding the document chunks.
    pub collection: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl SearchConfig {
    /// Load from environment variables with defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_or("QDRANT_URL", "http://127.0.0.1:6333"),
            api_key: std::env::var("QDRANT_API_KEY").ok(),
            collection: env_or("QDRANT_COLLECTION", "screws"),
            timeout: http_timeout(),
        })
    }
}

/// Configuration for the Replicate predictions client.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// API base, e.g. "https://api.replicate.com/v1".
    pub api_base: String,
    /// `Token`-scheme credential for the predictions API.
    pub api_token: String,
    /// Model version hash submitted with every prediction.
    pub model_version: String,
    /// Maximum number of tokens to generate.
    pub max_length: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling cutoff.
    pub top_p: f32,
    /// Penalty applied to repeated tokens.
    pub repetition_penalty: f32,
    /// Hard ceiling on status polls before the job is declared timed out.
    pub max_attempts: u32,
    /// Sleep between status polls.
    pub poll_interval: Duration,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl GenerationConfig {
    /// Load from environment variables with defaults.
    ///
    /// # Errors
    /// [`ConfigError::MissingEnv`] if `REPLICATE_API_TOKEN` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: env_or("REPLICATE_API_BASE", "https://api.replicate.com/v1"),
            api_token: required("REPLICATE_API_TOKEN")?,
            model_version: env_or("REPLICATE_MODEL_VERSION", DEFAULT_MODEL_VERSION),
            max_length: parse_or("GEN_MAX_LENGTH", 500),
            temperature: parse_or("GEN_TEMPERATURE", 0.7),
            top_p: parse_or("GEN_TOP_P", 0.9),
            repetition_penalty: parse_or("GEN_REPETITION_PENALTY", 1.15),
            max_attempts: parse_or("GEN_MAX_ATTEMPTS", 30),
            poll_interval: Duration::from_millis(parse_or("GEN_POLL_INTERVAL_MS", 1_000)),
            timeout: http_timeout(),
        })
    }
}

fn http_timeout() -> Duration {
    Duration::from_secs(parse_or("HTTP_TIMEOUT_SECS", 60))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnv { key })
}
