use crate::constants::{EXTRACTION_TIMEOUT, MAX_COMPLETION_TOKENS};
use crate::errors::ExtractionError;
use crate::providers::ai::{Completion, CompletionBackend};
use crate::types::ChatMessage;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    #[serde(default)]
    message: String,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize, Debug, Default)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

// --- OpenAI backend implementation ---

/// A backend for an OpenAI-compatible chat-completion API.
#[derive(Clone, Debug)]
pub struct OpenAiBackend {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
}

impl OpenAiBackend {
    /// Creates a new `OpenAiBackend`.
    pub fn new(api_url: String, api_key: String) -> Result<Self, ExtractionError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(ExtractionError::ClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Completion, ExtractionError> {
        let request_body = ChatRequest {
            model,
            messages,
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .timeout(EXTRACTION_TIMEOUT)
            .json(&request_body)
            .send()
            .await
            .map_err(ExtractionError::Request)?;

        let status = response.status();
        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(ExtractionError::Deserialization)?;

        // The backend signals failures through an error payload; surface its
        // message verbatim. A non-success status without one is still fatal.
        if let Some(error) = chat_response.error {
            return Err(ExtractionError::Api(error.message));
        }
        if !status.is_success() {
            return Err(ExtractionError::Api(format!(
                "extraction backend returned status {status}"
            )));
        }

        let text = chat_response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default();
        let usage = chat_response.usage.unwrap_or_default();

        Ok(Completion {
            text,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        })
    }
}
