//! # Shared Constants
//!
//! Centralized endpoint and timeout constants shared across the crate.
//! Using these constants helps to avoid "magic strings" and keeps the
//! external interfaces in one place.

use std::time::Duration;

/// The scraping backend's extract endpoint.
pub const SCRAPE_API_URL: &str = "https://api.zyte.com/v1/extract";

/// The extraction backend's chat-completion endpoint.
pub const EXTRACTION_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Per-request timeout for scrape calls.
pub const SCRAPE_TIMEOUT: Duration = Duration::from_secs(60);

/// Per-request timeout for extraction calls. Completions are slow; the
/// model is given twice the scrape budget.
pub const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(120);

/// Completion budget requested from the extraction backend.
pub const MAX_COMPLETION_TOKENS: u32 = 1500;
