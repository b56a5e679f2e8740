//! Generation backend health probe.

use crate::types::{AppError, HealthResponse, Result};
use crate::AppState;
use axum::{extract::State, Json};

/// Send a fixed one-shot prompt through the generation gateway to verify the
/// backend is reachable.
pub async fn test_generation(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    state
        .generator
        .complete("Hello!")
        .await
        .map_err(AppError::into_pipeline)?;

    tracing::info!(model = state.generator.model_name(), "generation backend reachable");
    Ok(Json(HealthResponse {
        status: "success".to_string(),
        message: "generation backend communication successful".to_string(),
    }))
}
