//! Answer synthesizer: retrieval, prompt construction, generation, assembly.

use crate::llm::client::{GenerationClient, GenerationMode};
use crate::rag::retriever::Retriever;
use crate::types::Result;
use futures::StreamExt;
use std::sync::Arc;

/// Reply used when the store yields no match. A terminal success state, not
/// an error: generation is never invoked for it.
pub const NO_MATCH_REPLY: &str = "I'm sorry, I couldn't find any relevant information.";

/// End-to-end answer pipeline for a single query.
///
/// All-or-nothing per request: any gateway failure during retrieval or
/// generation fails the whole request, and no partial answer is ever
/// returned. The two generation strategies sit behind one interface and are
/// selected by [`GenerationMode`]; given the same generated text they produce
/// the same answer.
pub struct AnswerSynthesizer {
    retriever: Retriever,
    generator: Arc<dyn GenerationClient>,
    mode: GenerationMode,
}

impl AnswerSynthesizer {
    /// Build a synthesizer over the retriever and generation gateway.
    pub fn new(
        retriever: Retriever,
        generator: Arc<dyn GenerationClient>,
        mode: GenerationMode,
    ) -> Self {
        Self {
            retriever,
            generator,
            mode,
        }
    }

    /// Produce the final answer for `query`.
    pub async fn answer(&self, query: &str) -> Result<String> {
        let Some(best) = self.retriever.retrieve_top_match(query).await? else {
            return Ok(NO_MATCH_REPLY.to_string());
        };

        let prompt = build_prompt(&best.doc_text, query);
        tracing::info!(
            doc_id = best.id,
            distance = best.distance,
            mode = %self.mode,
            model = self.generator.model_name(),
            "generating grounded answer"
        );

        let text = match self.mode {
            GenerationMode::OneShot => self.generator.complete(&prompt).await?,
            GenerationMode::Streamed => {
                let mut fragments = self.generator.stream(&prompt).await?;
                let mut assembled = String::new();
                // Arrival order, no reordering; the stream is owned by this
                // request alone.
                while let Some(fragment) = fragments.next().await {
                    assembled.push_str(&fragment?);
                }
                assembled
            }
        };

        Ok(text.trim().to_string())
    }
}

/// Build the grounding prompt. Document text and query are embedded verbatim,
/// no truncation.
pub fn build_prompt(doc_text: &str, query: &str) -> String {
    format!(
        "This is the relevant information: {doc_text}. \
         This is the user question: {query}. \
         Generate a precise response"
    )
}
