//! # Extraction Client
//!
//! Wraps a [`CompletionBackend`] with a model choice and turns raw
//! completions into [`AiResponse`] values billed from the per-model price
//! table. One outbound call per `extract` invocation; retrying belongs to
//! the pipeline above.

use crate::errors::ExtractionError;
use crate::pricing::{cost_for, Model};
use crate::providers::ai::CompletionBackend;
use crate::types::{AiResponse, ChatMessage};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct ExtractionClient {
    backend: Box<dyn CompletionBackend>,
    model: Model,
}

impl ExtractionClient {
    pub fn new(backend: Box<dyn CompletionBackend>, model: Model) -> Self {
        Self { backend, model }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    /// Submits the conversation once and prices the answer.
    pub async fn extract(&self, messages: &[ChatMessage]) -> Result<AiResponse, ExtractionError> {
        let completion = self.backend.complete(self.model.wire_id(), messages).await?;
        let cost = cost_for(
            self.model,
            completion.prompt_tokens,
            completion.completion_tokens,
        )?;

        debug!(
            model = %self.model,
            prompt_tokens = completion.prompt_tokens,
            completion_tokens = completion.completion_tokens,
            cost,
            "extraction backend answered"
        );

        Ok(AiResponse {
            text: completion.text,
            prompt_tokens: completion.prompt_tokens,
            completion_tokens: completion.completion_tokens,
            cost,
        })
    }
}
