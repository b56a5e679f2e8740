//! Core types (requests, responses, errors).

use serde::{Deserialize, Serialize};

// ============= API Request/Response Types =============

/// Body of `POST /query`.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The natural-language question. Must be non-empty.
    pub query: String,
}

/// Successful answer returned by `POST /query`.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The generated answer text.
    pub response: String,
}

/// Body returned by `GET /test-generation`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"success"` when the generation backend answered.
    pub status: String,
    /// Human-readable detail.
    pub message: String,
}

// ============= Retrieval Types =============

/// A single nearest-neighbor hit: a stored document plus its distance to the
/// query embedding. Lower distance means more similar; the store and the
/// ingestion job use the same metric, so distances are comparable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMatch {
    /// Row id of the matched document.
    pub id: i64,
    /// Full text body of the matched document.
    pub doc_text: String,
    /// Distance between the query embedding and the document embedding.
    pub distance: f64,
}

// ============= Error Types =============

/// Unified error taxonomy for the query pipeline.
///
/// Gateway-level failures (`Embedding`, `StoreUnavailable`, `StoreQuery`,
/// `Generation`) propagate unchanged through the retriever and synthesizer;
/// the service boundary wraps them into [`AppError::Pipeline`] before they
/// become an HTTP response. [`AppError::InvalidInput`] is rejected before the
/// pipeline is entered at all.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The embedding backend is unreachable or rejected the input.
    #[error("embedding service unavailable: {0}")]
    Embedding(String),

    /// The document store could not be reached or a connection could not be
    /// checked out.
    #[error("document store unavailable: {0}")]
    StoreUnavailable(String),

    /// The document store rejected the query (e.g. a vector dimension
    /// mismatch). A configuration problem, not a transient one.
    #[error("document store rejected query: {0}")]
    StoreQuery(String),

    /// The generation backend is unreachable, returned a non-success status,
    /// or failed before any fragment was produced.
    #[error("generation service unavailable: {0}")]
    Generation(String),

    /// Caller-supplied input was rejected before pipeline entry.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A gateway failure crossing the service boundary, carrying the cause.
    #[error("query pipeline failed: {0}")]
    Pipeline(#[source] Box<AppError>),
}

impl AppError {
    /// Wrap a gateway-level error for the service boundary.
    ///
    /// `InvalidInput` is a caller mistake, not a pipeline failure, and an
    /// already-wrapped error is left alone.
    pub fn into_pipeline(self) -> AppError {
        match self {
            AppError::InvalidInput(_) | AppError::Pipeline(_) => self,
            other => AppError::Pipeline(Box::new(other)),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            AppError::InvalidInput(_) => axum::http::StatusCode::BAD_REQUEST,
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Display text only: no stack traces or connection details leak out.
        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;
