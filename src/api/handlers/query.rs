//! The query endpoint: the service boundary of the answer pipeline.

use crate::types::{AppError, QueryRequest, QueryResponse, Result};
use crate::AppState;
use axum::{extract::State, Json};

/// Answer a natural-language question against the document corpus.
///
/// Empty or whitespace-only queries are rejected with `InvalidInput` before
/// any gateway is invoked. Pipeline failures come back as a single structured
/// error wrapping the underlying cause.
pub async fn query(
    State(state): State<AppState>,
    Json(payload): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    if payload.query.trim().is_empty() {
        tracing::warn!("rejected request with empty query");
        return Err(AppError::InvalidInput("query is required".to_string()));
    }

    tracing::info!("processing query request");
    let answer = state
        .synthesizer
        .answer(&payload.query)
        .await
        .map_err(AppError::into_pipeline)?;

    Ok(Json(QueryResponse { response: answer }))
}
