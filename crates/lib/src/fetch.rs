//! # Page Fetcher
//!
//! Fetches fully-rendered HTML for a URL from the scraping backend. The
//! backend renders the page in a browser and returns the resulting HTML in
//! a JSON envelope. Transient failures are retried with bounded exponential
//! backoff; exhausting the attempt budget is the only error surfaced.

use crate::constants::SCRAPE_TIMEOUT;
use crate::errors::FetchError;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

const MAX_ATTEMPTS: u32 = 5;
const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(250);
const MAX_BACKOFF: Duration = Duration::from_secs(8);

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    #[serde(rename = "browserHtml")]
    browser_html: bool,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(rename = "browserHtml")]
    browser_html: Option<String>,
}

/// A client for the scraping backend's extract endpoint.
///
/// Holds no per-call state; every `fetch` owns its own attempt counter.
#[derive(Clone, Debug)]
pub struct PageFetcher {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    backoff_base: Duration,
}

impl PageFetcher {
    /// Creates a new `PageFetcher` authenticating with `api_key`.
    pub fn new(api_url: String, api_key: String) -> Result<Self, FetchError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            backoff_base: DEFAULT_BACKOFF_BASE,
        })
    }

    /// Overrides the base delay used for retry backoff.
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Fetches the rendered HTML for `url`, retrying transient failures.
    ///
    /// Any failure mode counts against the same budget of 5 attempts; the
    /// delay doubles after each failed attempt. Success returns immediately
    /// without further requests.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        for attempt in 0..MAX_ATTEMPTS {
            match self.fetch_once(url).await {
                Ok(html) => return Ok(html),
                Err(e) => {
                    warn!(
                        "Scrape attempt {}/{} for {url} failed: {e}. Retrying...",
                        attempt + 1,
                        MAX_ATTEMPTS
                    );
                    if attempt + 1 < MAX_ATTEMPTS {
                        tokio::time::sleep(self.backoff_delay(attempt)).await;
                    }
                }
            }
        }

        Err(FetchError::Exhausted {
            url: url.to_string(),
            attempts: MAX_ATTEMPTS,
        })
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_base
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(MAX_BACKOFF)
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .post(&self.api_url)
            .basic_auth(&self.api_key, Some(""))
            .timeout(SCRAPE_TIMEOUT)
            .json(&ScrapeRequest {
                url,
                browser_html: true,
            })
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let scrape_response: ScrapeResponse = response
            .json()
            .await
            .map_err(FetchError::Deserialization)?;

        scrape_response.browser_html.ok_or(FetchError::MissingHtml)
    }
}
