//! Generation client abstraction.
//!
//! One interface, two delivery modes: a whole completion in a single call, or
//! an incremental fragment stream. Which mode the answer pipeline uses is a
//! deployment decision ([`GenerationMode`]), not a separate code path per
//! backend.

use crate::types::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Client for the generative-completion backend.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate a whole completion for `prompt` in one call.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Generate a completion as a lazy, finite, non-restartable fragment
    /// stream.
    ///
    /// Fails with [`AppError::Generation`](crate::types::AppError::Generation)
    /// before any fragment is yielded if the transport fails or the initial
    /// response status is non-success. A malformed individual fragment is
    /// skipped by the implementation, never surfaced as a stream error.
    async fn stream(
        &self,
        prompt: &str,
    ) -> Result<Box<dyn futures::Stream<Item = Result<String>> + Send + Unpin>>;

    /// The model identifier this client generates with.
    fn model_name(&self) -> &str;
}

/// How the answer pipeline invokes the generation client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Single `complete` call.
    OneShot,
    /// Fragment stream, concatenated in arrival order.
    #[default]
    Streamed,
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oneshot" | "one-shot" | "complete" => Ok(GenerationMode::OneShot),
            "streamed" | "stream" => Ok(GenerationMode::Streamed),
            other => Err(format!(
                "unknown generation mode '{other}' (expected 'oneshot' or 'streamed')"
            )),
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::OneShot => write!(f, "oneshot"),
            GenerationMode::Streamed => write!(f, "streamed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!(
            "oneshot".parse::<GenerationMode>().unwrap(),
            GenerationMode::OneShot
        );
        assert_eq!(
            "one-shot".parse::<GenerationMode>().unwrap(),
            GenerationMode::OneShot
        );
        assert_eq!(
            "Streamed".parse::<GenerationMode>().unwrap(),
            GenerationMode::Streamed
        );
        assert_eq!(
            " stream ".parse::<GenerationMode>().unwrap(),
            GenerationMode::Streamed
        );
    }

    #[test]
    fn test_mode_from_str_rejects_unknown() {
        let err = "batch".parse::<GenerationMode>().unwrap_err();
        assert!(err.contains("batch"));
    }

    #[test]
    fn test_mode_default_is_streamed() {
        assert_eq!(GenerationMode::default(), GenerationMode::Streamed);
    }

    #[test]
    fn test_mode_display_round_trips() {
        for mode in [GenerationMode::OneShot, GenerationMode::Streamed] {
            assert_eq!(mode.to_string().parse::<GenerationMode>().unwrap(), mode);
        }
    }
}
