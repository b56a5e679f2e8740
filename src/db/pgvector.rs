//! PostgreSQL pgvector document store.
//!
//! Nearest-neighbor lookup against the `doc` table written by the offline
//! ingestion job. The query is a full-scan ORDER-BY-distance with a LIMIT —
//! O(N) per lookup, which is the accepted trade-off for the small corpora
//! this server fronts. The distance operator is pgvector's cosine `<=>`; the
//! ingestion job wrote embeddings for the same metric.

use crate::db::DocumentStore;
use crate::types::{AppError, RankedMatch, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

const NEAREST_SQL: &str = "\
    SELECT id, doc_text, (embedding <=> $1::vector) AS distance \
    FROM doc \
    ORDER BY distance \
    LIMIT $2";

/// Document store backed by PostgreSQL with the pgvector extension.
///
/// The pool is created lazily: no connection is opened until the first query,
/// and each query checks a connection out for exactly its own duration. When
/// the query future completes or is dropped (caller disconnect included), the
/// connection goes back to the pool, so no request ever holds one across
/// another request's lifetime.
pub struct PgVectorStore {
    pool: PgPool,
    dimension: usize,
}

impl PgVectorStore {
    /// Create a store for `database_url` expecting embeddings of `dimension`.
    ///
    /// Fails only on an unparseable URL; actual connectivity problems surface
    /// as `StoreUnavailable` from the first query.
    pub fn connect_lazy(database_url: &str, dimension: usize) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        Ok(Self { pool, dimension })
    }

    /// The embedding dimension this store was configured for.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

#[async_trait]
impl DocumentStore for PgVectorStore {
    async fn find_nearest(&self, embedding: &[f32], k: usize) -> Result<Vec<RankedMatch>> {
        // Dimension mismatch is a configuration error; reject it before
        // touching the wire so it cannot masquerade as a transient failure.
        if embedding.len() != self.dimension {
            return Err(AppError::StoreQuery(format!(
                "embedding dimension {} does not match store dimension {}",
                embedding.len(),
                self.dimension
            )));
        }

        let literal = vector_literal(embedding);
        let rows: Vec<(i64, String, f64)> = sqlx::query_as(NEAREST_SQL)
            .bind(&literal)
            .bind(k as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(map_store_error)?;

        tracing::debug!(matches = rows.len(), k, "nearest-neighbor lookup complete");

        Ok(rows
            .into_iter()
            .map(|(id, doc_text, distance)| RankedMatch {
                id,
                doc_text,
                distance,
            })
            .collect())
    }
}

/// Render an embedding as a pgvector text literal, e.g. `[0.1,0.2,0.3]`.
///
/// Bound as text and cast server-side (`$1::vector`), which keeps sqlx free
/// of a pgvector-specific type mapping.
fn vector_literal(embedding: &[f32]) -> String {
    let mut out = String::with_capacity(embedding.len() * 10 + 2);
    out.push('[');
    for (i, value) in embedding.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&value.to_string());
    }
    out.push(']');
    out
}

/// Split sqlx failures into "could not reach the store" vs "store rejected
/// the query".
fn map_store_error(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => AppError::StoreUnavailable(err.to_string()),
        other => AppError::StoreQuery(other.to_string()),
    }
}
