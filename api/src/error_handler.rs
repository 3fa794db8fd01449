//! Application error type for server startup.
//!
//! Request-level failures never surface here: the chat handler converts
//! every pipeline error into a response body itself, so the caller always
//! receives a well-formed JSON answer.

use rag_pipeline::PipelineBuildError;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Build(#[from] PipelineBuildError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),
}
