//! Ollama generation client.
//!
//! Talks to an Ollama server's `/api/generate` endpoint over HTTP. The
//! streamed mode consumes Ollama's wire format directly: newline-delimited
//! JSON objects, each optionally carrying a `response` text field, with a
//! final `done: true` object. A line that fails to decode is logged and
//! skipped; isolated decode failures mid-stream never abort a request.

use crate::llm::client::GenerationClient;
use crate::types::{AppError, Result};
use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

/// Generation client backed by an Ollama server.
pub struct OllamaGenerator {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// One unit of Ollama's generate response. Both fields are optional on the
/// wire; anything else in the object is ignored.
#[derive(Debug, Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    done: Option<bool>,
}

impl OllamaGenerator {
    /// Create a client for the Ollama server at `base_url` using `model`.
    ///
    /// The `reqwest::Client` is shared with the rest of the process; it holds
    /// no per-request state.
    pub fn new(http: reqwest::Client, base_url: String, model: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    async fn send(&self, prompt: &str, stream: Option<bool>) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream,
            })
            .send()
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Generation(format!(
                "generation endpoint returned status {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl GenerationClient for OllamaGenerator {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self.send(prompt, Some(false)).await?;

        let chunk: GenerateChunk = response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("malformed generation response: {e}")))?;

        Ok(chunk.response.unwrap_or_default())
    }

    async fn stream(
        &self,
        prompt: &str,
    ) -> Result<Box<dyn Stream<Item = Result<String>> + Send + Unpin>> {
        // Transport and status failures surface here, before the caller ever
        // sees a stream.
        let response = self.send(prompt, None).await?;
        let mut body = response.bytes_stream();

        let fragments = stream! {
            let mut buf: Vec<u8> = Vec::new();
            let mut finished = false;

            while let Some(chunk) = body.next().await {
                let bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        yield Err(AppError::Generation(format!("stream interrupted: {e}")));
                        finished = true;
                        break;
                    }
                };
                buf.extend_from_slice(&bytes);

                while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = buf.drain(..=pos).collect();
                    if let Some(text) = decode_fragment(&line[..line.len() - 1]) {
                        yield Ok(text);
                    }
                    if stream_done(&line) {
                        finished = true;
                        break;
                    }
                }
                if finished {
                    break;
                }
            }

            // Trailing object without a final newline.
            if !finished && !buf.is_empty() {
                if let Some(text) = decode_fragment(&buf) {
                    yield Ok(text);
                }
            }
        };

        Ok(Box::new(Box::pin(fragments)))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Decode one wire line into its fragment text, if any.
///
/// Empty lines and empty `response` fields produce nothing; a malformed line
/// is logged at warn and dropped.
fn decode_fragment(line: &[u8]) -> Option<String> {
    let line = trim_line(line);
    if line.is_empty() {
        return None;
    }

    match serde_json::from_slice::<GenerateChunk>(line) {
        Ok(chunk) => chunk.response.filter(|text| !text.is_empty()),
        Err(e) => {
            tracing::warn!(error = %e, "skipping malformed generation fragment");
            None
        }
    }
}

/// Whether a wire line is the terminal `done: true` object.
fn stream_done(line: &[u8]) -> bool {
    serde_json::from_slice::<GenerateChunk>(trim_line(line))
        .map(|chunk| chunk.done == Some(true))
        .unwrap_or(false)
}

fn trim_line(line: &[u8]) -> &[u8] {
    let mut line = line;
    while let [rest @ .., b'\n' | b'\r'] = line {
        line = rest;
    }
    line
}
