//! Retrieval orchestrator: query text in, best-matching document out.

use crate::db::DocumentStore;
use crate::rag::embeddings::EmbeddingClient;
use crate::types::{RankedMatch, Result};
use std::sync::Arc;

/// Composes the embedding gateway and the document store into a top-1
/// retrieval step.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingClient>,
    store: Arc<dyn DocumentStore>,
}

impl Retriever {
    /// Build a retriever over the given gateways.
    pub fn new(embedder: Arc<dyn EmbeddingClient>, store: Arc<dyn DocumentStore>) -> Self {
        Self { embedder, store }
    }

    /// Return the single most relevant stored document for `query`, or `None`
    /// when the store holds nothing to ground on.
    ///
    /// `None` is not a failure: the caller treats it as "insufficient
    /// grounding information". Gateway errors propagate unchanged, and an
    /// embedding failure means the store is never queried.
    pub async fn retrieve_top_match(&self, query: &str) -> Result<Option<RankedMatch>> {
        let embedding = self.embedder.embed(query).await?;
        tracing::debug!(dimension = embedding.len(), "query embedded");

        let mut matches = self.store.find_nearest(&embedding, 1).await?;
        if matches.is_empty() {
            tracing::warn!("no documents matched the query");
            return Ok(None);
        }

        let best = matches.remove(0);
        tracing::debug!(id = best.id, distance = best.distance, "top match retrieved");
        Ok(Some(best))
    }
}
