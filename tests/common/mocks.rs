//! Mock gateway implementations for testing.
//!
//! These mocks let the pipeline run without a Postgres instance or an Ollama
//! server, and record invocations so tests can assert short-circuit
//! properties (which gateways were never called).

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use grounded::db::DocumentStore;
use grounded::llm::client::{GenerationClient, GenerationMode};
use grounded::rag::EmbeddingClient;
use grounded::types::{AppError, RankedMatch, Result};
use grounded::utils::config::{Config, DatabaseConfig, EmbeddingConfig, LlmConfig, ServerConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock embedding client returning a fixed vector, or failing.
pub struct MockEmbedder {
    vector: Vec<f32>,
    should_fail: bool,
    calls: AtomicUsize,
}

impl MockEmbedder {
    /// Embedder that maps every text to `vector`.
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Embedder that always fails.
    pub fn failing() -> Self {
        Self {
            vector: vec![],
            should_fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `embed` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingClient for MockEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AppError::Embedding("mock embedding failure".to_string()));
        }
        Ok(self.vector.clone())
    }

    fn dimension(&self) -> usize {
        self.vector.len()
    }
}

/// In-memory document store doing a brute-force cosine-distance scan over
/// fixture documents.
pub struct FixtureStore {
    docs: Vec<(i64, String, Vec<f32>)>,
    should_fail: bool,
    calls: AtomicUsize,
}

impl FixtureStore {
    /// Store holding the given `(id, text, embedding)` fixtures.
    pub fn new(docs: Vec<(i64, String, Vec<f32>)>) -> Self {
        Self {
            docs,
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Store holding no documents.
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Store that always reports itself unavailable.
    pub fn failing() -> Self {
        Self {
            docs: vec![],
            should_fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `find_nearest` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for FixtureStore {
    async fn find_nearest(&self, embedding: &[f32], k: usize) -> Result<Vec<RankedMatch>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AppError::StoreUnavailable("mock store failure".to_string()));
        }

        let mut matches: Vec<RankedMatch> = self
            .docs
            .iter()
            .map(|(id, text, doc_embedding)| RankedMatch {
                id: *id,
                doc_text: text.clone(),
                distance: cosine_distance(embedding, doc_embedding),
            })
            .collect();
        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        matches.truncate(k);
        Ok(matches)
    }
}

/// Cosine distance, the same metric the pgvector store queries with.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}

/// Mock generation client with a configurable response.
pub struct MockGenerator {
    response: String,
    should_fail: bool,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    /// Generator that produces `response` in both modes.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(vec![]),
        }
    }

    /// Generator that always fails.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(vec![]),
        }
    }

    /// How many times `complete` or `stream` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every prompt this generator was invoked with.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn record(&self, prompt: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
    }
}

#[async_trait]
impl GenerationClient for MockGenerator {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.record(prompt);
        if self.should_fail {
            return Err(AppError::Generation("mock generation failure".to_string()));
        }
        Ok(self.response.clone())
    }

    async fn stream(
        &self,
        prompt: &str,
    ) -> Result<Box<dyn futures::Stream<Item = Result<String>> + Send + Unpin>> {
        self.record(prompt);
        if self.should_fail {
            return Err(AppError::Generation("mock generation failure".to_string()));
        }

        // Split the response into small fragments to simulate streaming.
        let chunks: Vec<String> = self
            .response
            .chars()
            .collect::<Vec<_>>()
            .chunks(5)
            .map(|c| c.iter().collect())
            .collect();

        let stream = stream::iter(chunks.into_iter().map(Ok));
        Ok(Box::new(stream.boxed()))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Config fixture for handler tests; no external service is contacted.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://localhost/grounded-test".to_string(),
        },
        llm: LlmConfig {
            ollama_url: "http://localhost:11434".to_string(),
            model: "mock-model".to_string(),
            mode: GenerationMode::Streamed,
        },
        embedding: EmbeddingConfig {
            model: "mock-embedder".to_string(),
            dimension: 3,
        },
    }
}
