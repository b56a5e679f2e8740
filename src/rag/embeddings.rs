//! Embedding gateway.
//!
//! Maps text to a fixed-dimension vector via an embedding backend. One text
//! per call; the batched path lives in the offline ingestion job, not here.

use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Client for the embedding backend.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed a single text. Fails with
    /// [`AppError::Embedding`](crate::types::AppError::Embedding) when the
    /// backend is unreachable or returns a malformed vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Output dimension of this embedder. Must match the store's dimension;
    /// a mismatch is a deployment configuration error.
    fn dimension(&self) -> usize;
}

/// Embedding client backed by an Ollama server's `/api/embeddings` endpoint.
pub struct OllamaEmbedder {
    http: reqwest::Client,
    base_url: String,
    model: String,
    dimension: usize,
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

impl OllamaEmbedder {
    /// Create an embedder for the server at `base_url` using `model`, whose
    /// output dimension is `dimension`.
    pub fn new(http: reqwest::Client, base_url: String, model: String, dimension: usize) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            dimension,
        }
    }
}

#[async_trait]
impl EmbeddingClient for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let response = self
            .http
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&EmbeddingsRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await
            .map_err(|e| AppError::Embedding(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Embedding(format!(
                "embedding endpoint returned status {}",
                response.status()
            )));
        }

        let body: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Embedding(format!("malformed embedding response: {e}")))?;

        if body.embedding.len() != self.dimension {
            return Err(AppError::Embedding(format!(
                "embedding model returned dimension {}, configured for {}",
                body.embedding.len(),
                self.dimension
            )));
        }

        Ok(body.embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
