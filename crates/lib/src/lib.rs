//! # Product Page to Schema
//!
//! This crate provides a client that transforms a product-listing URL into a
//! validated, structured product record using a scraping backend for page
//! rendering and an AI extraction backend for structuring, while tracking
//! the monetary cost of the AI calls involved.
//!
//! The flow for one URL is strictly sequential: fetch rendered HTML,
//! normalize it to plain text, then run the bounded extraction retry loop.
//! Independent URLs can be transformed concurrently; see
//! [`TransformClient::transform_urls`].

pub mod coerce;
pub mod constants;
pub mod errors;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod pricing;
pub mod prompts;
pub mod providers;
pub mod schema;
pub mod types;

pub use errors::{ExtractionError, FetchError, TransformError};
pub use pricing::Model;
pub use schema::{ExtractionResult, Product};
pub use types::{
    AiResponse, ChatMessage, Role, TransformClient, TransformClientBuilder, TransformResult,
};

use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::info;

impl TransformClient {
    /// Transforms a product URL into a standardized product record.
    ///
    /// Fetches the rendered page, strips it to plain text, and runs the
    /// extraction pipeline. The returned result carries the cumulative AI
    /// cost of the run, failed extraction attempts included. Failures of
    /// either stage surface as [`TransformError`] wrapping the cause; there
    /// is no partial success.
    pub async fn transform_url(&self, url: &str) -> Result<TransformResult, TransformError> {
        let started = Instant::now();

        let raw_html = self.fetcher.fetch(url).await?;
        let page_text = pagelift_html::normalize(&raw_html);
        let (response, result) = pipeline::run_extraction(&self.extraction, &page_text).await?;

        info!(
            "Transformed {url} in {:.2}s at a cost of ${:.6}",
            started.elapsed().as_secs_f64(),
            response.cost,
        );

        Ok(TransformResult {
            url: url.to_string(),
            cost: response.cost,
            product_schema: Some(result),
        })
    }

    /// Blocking variant of [`transform_url`](Self::transform_url) for
    /// non-async callers.
    ///
    /// Runs the same implementation on a dedicated current-thread runtime,
    /// so results are identical to the async variant. Must not be called
    /// from within an async runtime.
    pub fn transform_url_blocking(&self, url: &str) -> Result<TransformResult, TransformError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.transform_url(url))
    }

    /// Transforms many URLs concurrently, at most `max_concurrency` in
    /// flight at once.
    ///
    /// Each URL is an independent unit of work; one failing does not affect
    /// the others. Results are returned in input order.
    pub async fn transform_urls(
        &self,
        urls: &[String],
        max_concurrency: usize,
    ) -> Vec<Result<TransformResult, TransformError>> {
        stream::iter(urls.iter().map(|url| self.transform_url(url)))
            .buffered(max_concurrency.max(1))
            .collect()
            .await
    }
}
