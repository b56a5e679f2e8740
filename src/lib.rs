//! # Grounded - retrieval-augmented-generation query server
//!
//! Given a natural-language question, find the single most semantically
//! relevant stored document and use it, plus the question, to produce a
//! generated answer.
//!
//! ## Pipeline
//!
//! ```text
//! POST /query -> AnswerSynthesizer -> Retriever -> { EmbeddingClient, DocumentStore }
//!                                  -> GenerationClient -> assembled answer
//! ```
//!
//! One pipeline execution per inbound query. Requests share only the HTTP
//! client and the lazy connection pool; embeddings, matches, and generation
//! streams are owned by the request that produced them.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use grounded::db::PgVectorStore;
//! use grounded::llm::{GenerationMode, OllamaGenerator};
//! use grounded::rag::{AnswerSynthesizer, OllamaEmbedder, Retriever};
//! use std::sync::Arc;
//!
//! let http = reqwest::Client::new();
//! let store = Arc::new(PgVectorStore::connect_lazy("postgres://localhost/docs", 384)?);
//! let embedder = Arc::new(OllamaEmbedder::new(
//!     http.clone(),
//!     "http://localhost:11434".into(),
//!     "all-minilm".into(),
//!     384,
//! ));
//! let generator = Arc::new(OllamaGenerator::new(
//!     http,
//!     "http://localhost:11434".into(),
//!     "llama3.2:1b".into(),
//! ));
//!
//! let synthesizer = AnswerSynthesizer::new(
//!     Retriever::new(embedder, store),
//!     generator,
//!     GenerationMode::Streamed,
//! );
//! let answer = synthesizer.answer("What color is the sky?").await?;
//! ```
//!
//! ## Modules
//!
//! - [`api`] - HTTP boundary (`POST /query`, `GET /test-generation`)
//! - [`db`] - document store clients (pgvector)
//! - [`llm`] - generation gateway (Ollama, one-shot and streamed)
//! - [`rag`] - embedding gateway, retriever, answer synthesizer
//! - [`types`] - request/response types and the error taxonomy
//! - [`utils`] - environment configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Document store clients.
pub mod db;
/// Generation gateway clients.
pub mod llm;
/// Embedding, retrieval, and answer synthesis.
pub mod rag;
/// Core types and error handling.
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use db::{DocumentStore, PgVectorStore};
pub use llm::{GenerationClient, GenerationMode, OllamaGenerator};
pub use rag::{AnswerSynthesizer, EmbeddingClient, OllamaEmbedder, Retriever, NO_MATCH_REPLY};
pub use types::{AppError, RankedMatch, Result};
pub use utils::config::Config;

use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<Config>,
    /// The end-to-end answer pipeline.
    pub synthesizer: Arc<AnswerSynthesizer>,
    /// Generation gateway, exposed separately for the health probe.
    pub generator: Arc<dyn GenerationClient>,
}
