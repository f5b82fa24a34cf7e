use crate::constants::{EXTRACTION_API_URL, SCRAPE_API_URL};
use crate::errors::TransformError;
use crate::extract::ExtractionClient;
use crate::fetch::PageFetcher;
use crate::pricing::Model;
use crate::providers::ai::{openai::OpenAiBackend, CompletionBackend};
use crate::schema::ExtractionResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Role of a single conversation turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of the conversation sent to the extraction backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One answer from the extraction backend, with its token usage and the USD
/// cost derived from the per-model price table.
///
/// When returned from the extraction pipeline, `cost` holds the running
/// total across all attempts of that run, not just the winning one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AiResponse {
    pub text: String,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub cost: f64,
}

/// The final unit of output for one transformed URL.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransformResult {
    pub url: String,
    /// Cumulative cost over every extraction attempt, failed ones included.
    pub cost: f64,
    pub product_schema: Option<ExtractionResult>,
}

/// A client that transforms product URLs into validated product records.
///
/// Construction goes through [`TransformClientBuilder`]. The client is cheap
/// to clone and each transform run owns its own retry and cost state, so
/// clones may run concurrently without coordination.
#[derive(Clone)]
pub struct TransformClient {
    pub(crate) fetcher: PageFetcher,
    pub(crate) extraction: ExtractionClient,
}

impl fmt::Debug for TransformClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformClient")
            .field("model", &self.extraction.model())
            .finish_non_exhaustive()
    }
}

/// A builder for creating `TransformClient` instances.
///
/// Backend URLs default to the real endpoints and are overridable so tests
/// can point the client at a local mock server.
#[derive(Default)]
pub struct TransformClientBuilder {
    scrape_api_key: String,
    ai_api_key: String,
    scrape_api_url: Option<String>,
    ai_api_url: Option<String>,
    model_id: Option<String>,
    scrape_backoff_base: Option<Duration>,
    backend: Option<Box<dyn CompletionBackend>>,
}

impl TransformClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scraping backend credential.
    pub fn scrape_api_key(mut self, key: impl Into<String>) -> Self {
        self.scrape_api_key = key.into();
        self
    }

    /// Sets the extraction backend credential.
    pub fn ai_api_key(mut self, key: impl Into<String>) -> Self {
        self.ai_api_key = key.into();
        self
    }

    /// Overrides the scraping backend's extract endpoint.
    pub fn scrape_api_url(mut self, url: impl Into<String>) -> Self {
        self.scrape_api_url = Some(url.into());
        self
    }

    /// Overrides the extraction backend's chat-completion endpoint.
    pub fn ai_api_url(mut self, url: impl Into<String>) -> Self {
        self.ai_api_url = Some(url.into());
        self
    }

    /// Selects the extraction model by wire identifier, e.g. `gpt-4o`.
    ///
    /// Unknown identifiers fail at `build` time rather than silently
    /// costing nothing.
    pub fn model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    /// Overrides the base delay of the scrape retry backoff.
    pub fn scrape_backoff_base(mut self, base: Duration) -> Self {
        self.scrape_backoff_base = Some(base);
        self
    }

    /// Replaces the HTTP extraction backend with a caller-supplied one.
    ///
    /// When set, no extraction API key is required.
    pub fn completion_backend(mut self, backend: Box<dyn CompletionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Builds the `TransformClient`.
    ///
    /// Fails when a required credential is missing or the model identifier
    /// is unknown to the price table.
    pub fn build(self) -> Result<TransformClient, TransformError> {
        if self.scrape_api_key.is_empty() {
            return Err(TransformError::MissingScrapeKey);
        }

        let model: Model = match &self.model_id {
            Some(id) => id.parse()?,
            None => Model::default(),
        };

        let backend: Box<dyn CompletionBackend> = match self.backend {
            Some(backend) => backend,
            None => {
                if self.ai_api_key.is_empty() {
                    return Err(TransformError::MissingAiKey);
                }
                let api_url = self
                    .ai_api_url
                    .unwrap_or_else(|| EXTRACTION_API_URL.to_string());
                Box::new(OpenAiBackend::new(api_url, self.ai_api_key)?)
            }
        };

        let scrape_api_url = self
            .scrape_api_url
            .unwrap_or_else(|| SCRAPE_API_URL.to_string());
        let mut fetcher = PageFetcher::new(scrape_api_url, self.scrape_api_key)?;
        if let Some(base) = self.scrape_backoff_base {
            fetcher = fetcher.with_backoff_base(base);
        }

        Ok(TransformClient {
            fetcher,
            extraction: ExtractionClient::new(backend, model),
        })
    }
}
