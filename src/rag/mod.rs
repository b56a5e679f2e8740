//! Retrieval-augmented generation pipeline.
//!
//! The pipeline for one query:
//!
//! 1. [`embeddings`] - embed the incoming query text
//! 2. [`retriever`] - nearest-neighbor lookup, keep the single best match
//! 3. [`answer`] - build the grounding prompt, invoke generation, assemble
//!    the final answer
//!
//! Each step is a blocking point on its own gateway; a failure at any step
//! fails the whole request (no retries, no partial answers). The one defined
//! non-error shortcut is an empty store, which resolves to a fixed reply
//! without ever calling the generation backend.

pub mod answer;
pub mod embeddings;
pub mod retriever;

pub use answer::{AnswerSynthesizer, NO_MATCH_REPLY};
pub use embeddings::{EmbeddingClient, OllamaEmbedder};
pub use retriever::Retriever;
