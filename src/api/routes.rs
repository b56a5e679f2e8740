use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Build the service router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/query", post(crate::api::handlers::query::query))
        .route(
            "/test-generation",
            get(crate::api::handlers::health::test_generation),
        )
}
