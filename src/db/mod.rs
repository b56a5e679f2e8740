//! Document store clients.
//!
//! The [`DocumentStore`] trait abstracts the vector-capable document store so
//! the retrieval pipeline can be exercised against fixtures in tests. The
//! production backend is [`PgVectorStore`], PostgreSQL with the pgvector
//! extension.

use crate::types::{RankedMatch, Result};
use async_trait::async_trait;

pub mod pgvector;

pub use pgvector::PgVectorStore;

/// Read-only nearest-neighbor access to the document corpus.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return up to `k` stored documents ordered ascending by distance to
    /// `embedding`.
    ///
    /// An empty store yields an empty vec, not an error. Fails with
    /// [`AppError::StoreUnavailable`](crate::types::AppError::StoreUnavailable)
    /// when no connection can be obtained and
    /// [`AppError::StoreQuery`](crate::types::AppError::StoreQuery) when the
    /// store rejects the query itself.
    async fn find_nearest(&self, embedding: &[f32], k: usize) -> Result<Vec<RankedMatch>>;
}
