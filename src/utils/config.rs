//! Environment-driven configuration.

use crate::llm::client::GenerationMode;
use serde::Deserialize;
use std::env;

/// Top-level server configuration, assembled from environment variables
/// (`.env` supported via dotenvy).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Document store settings.
    pub database: DatabaseConfig,
    /// Generation backend settings.
    pub llm: LlmConfig,
    /// Embedding backend settings.
    pub embedding: EmbeddingConfig,
}

/// Bind address for the HTTP listener.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind, `HOST` (default `0.0.0.0`).
    pub host: String,
    /// Port to bind, `PORT` (default `5001`).
    pub port: u16,
}

/// PostgreSQL + pgvector settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL, `DATABASE_URL` (required).
    pub url: String,
}

/// Generation backend settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Ollama server base URL, `OLLAMA_URL`.
    pub ollama_url: String,
    /// Generation model name, `GENERATION_MODEL`.
    pub model: String,
    /// Delivery mode, `GENERATION_MODE` (`oneshot` or `streamed`).
    pub mode: GenerationMode,
}

/// Embedding backend settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding model name, `EMBEDDING_MODEL`.
    pub model: String,
    /// Output dimension of the embedding model, `EMBEDDING_DIM`. Must match
    /// the dimension the store was ingested with.
    pub dimension: usize,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "5001".to_string())
                    .parse()?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")?,
            },
            llm: LlmConfig {
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                model: env::var("GENERATION_MODEL")
                    .unwrap_or_else(|_| "llama3.2:1b".to_string()),
                mode: env::var("GENERATION_MODE")
                    .unwrap_or_else(|_| "streamed".to_string())
                    .parse::<GenerationMode>()?,
            },
            embedding: EmbeddingConfig {
                model: env::var("EMBEDDING_MODEL").unwrap_or_else(|_| "all-minilm".to_string()),
                dimension: env::var("EMBEDDING_DIM")
                    .unwrap_or_else(|_| "384".to_string())
                    .parse()?,
            },
        })
    }
}
