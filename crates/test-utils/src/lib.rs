//! # Shared Test Utilities
//!
//! Provides a scriptable mock extraction backend so pipeline tests can
//! exercise retry and cost-accounting logic without a network.

use async_trait::async_trait;
use pagelift::errors::ExtractionError;
use pagelift::providers::ai::{Completion, CompletionBackend};
use pagelift::types::ChatMessage;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// The scripted outcome of one mock completion call.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    /// Return this completion.
    Answer(Completion),
    /// Fail with an API error carrying this message.
    ApiError(String),
}

/// Builds a [`Completion`] with the given text and token usage.
pub fn completion(text: &str, prompt_tokens: u64, completion_tokens: u64) -> Completion {
    Completion {
        text: text.to_string(),
        prompt_tokens,
        completion_tokens,
    }
}

// --- Mock Extraction Backend ---

/// A [`CompletionBackend`] that replays a fixed script of outcomes and
/// records every call it receives.
#[derive(Clone, Debug)]
pub struct MockCompletionBackend {
    script: Arc<Mutex<VecDeque<ScriptedOutcome>>>,
    calls: Arc<Mutex<Vec<(String, Vec<ChatMessage>)>>>,
}

impl MockCompletionBackend {
    /// Creates a backend that answers calls with `script` in order.
    pub fn new(script: Vec<ScriptedOutcome>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Retrieves the recorded calls for assertion: the model identifier and
    /// the conversation of each invocation.
    pub fn get_calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for MockCompletionBackend {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Completion, ExtractionError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));

        match self.script.lock().unwrap().pop_front() {
            Some(ScriptedOutcome::Answer(completion)) => Ok(completion),
            Some(ScriptedOutcome::ApiError(message)) => Err(ExtractionError::Api(message)),
            None => Err(ExtractionError::Api(
                "MockCompletionBackend: script exhausted".to_string(),
            )),
        }
    }
}
