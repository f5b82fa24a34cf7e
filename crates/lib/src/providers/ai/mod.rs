pub mod openai;

use crate::errors::ExtractionError;
use crate::types::ChatMessage;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// Raw output of one completion call: the generated text plus the token
/// usage the backend reported for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

/// A trait for interacting with a chat-completion backend.
///
/// This defines a common interface for submitting a conversation and reading
/// back generated text with token usage, so pipeline logic stays independent
/// of any one vendor's wire format.
#[async_trait]
pub trait CompletionBackend: Send + Sync + Debug + DynClone {
    /// Submits `messages` to the backend under `model` and returns the
    /// completion. One outbound call per invocation; retry belongs to the
    /// caller.
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Completion, ExtractionError>;
}

dyn_clone::clone_trait_object!(CompletionBackend);
