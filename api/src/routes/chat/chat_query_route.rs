//! POST /chat-query — retrieval-augmented fastener Q&A.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rag_pipeline::{PipelineError, QueryAnswer};
use tracing::{error, info};

use crate::{
    core::app_state::AppState,
    routes::chat::{
        chat_request::ChatQueryRequest,
        chat_response::{ChatQueryFailure, ChatQuerySuccess, FALLBACK_RESPONSE, QueryRequired},
    },
};

/// Handler: POST /chat-query
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/chat-query \
///   -H 'content-type: application/json' \
///   -d '{"query":"What screws for drywall?"}'
/// ```
pub async fn chat_query(
    State(state): State<Arc<AppState>>,
    Json(p): Json<ChatQueryRequest>,
) -> Response {
    info!(target: "api", query = %p.query, "chat_query: start");

    match state.pipeline.run(&p.query).await {
        Ok(QueryAnswer {
            response,
            context_chunks_used,
            query,
        }) => {
            info!(target: "api", context_chunks_used, "chat_query: success");

            let body = ChatQuerySuccess {
                success: true,
                response,
                context_chunks_used,
                query,
            };

            (StatusCode::OK, Json(body)).into_response()
        }
        Err(PipelineError::InvalidInput) => {
            let body = QueryRequired {
                error: "Query is required",
            };

            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
        Err(err) => {
            error!(target: "api", error = %err, "chat_query: pipeline failed");

            let body = ChatQueryFailure {
                error: err.to_string(),
                fallback_response: FALLBACK_RESPONSE,
            };

            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
