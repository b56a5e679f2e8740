//! Generation gateway: clients for the generative-completion backend.

pub mod client;
pub mod ollama;

pub use client::{GenerationClient, GenerationMode};
pub use ollama::OllamaGenerator;
