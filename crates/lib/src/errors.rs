use thiserror::Error;

/// Failures while fetching rendered HTML from the scraping backend.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build Reqwest client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Failed to send request to scraping backend: {0}")]
    Request(reqwest::Error),
    #[error("Scraping backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to deserialize scraping backend response: {0}")]
    Deserialization(reqwest::Error),
    #[error("Scraping backend response did not contain browserHtml")]
    MissingHtml,
    #[error("Unable to scrape page {url} after {attempts} attempts")]
    Exhausted { url: String, attempts: u32 },
}

/// Failures while turning page text into a structured record via the
/// extraction backend.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to build Reqwest client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Failed to send request to extraction backend: {0}")]
    Request(reqwest::Error),
    #[error("Failed to deserialize extraction backend response: {0}")]
    Deserialization(reqwest::Error),
    #[error("Extraction backend returned an error: {0}")]
    Api(String),
    #[error("Model output failed schema validation: {0}")]
    SchemaValidation(String),
    #[error("Unknown model identifier: {0}")]
    UnknownModel(String),
    #[error("Extraction failed after {attempts} attempts, ${cost:.6} spent")]
    Exhausted { attempts: u32, cost: f64 },
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Failure of a whole URL transform, wrapping the stage that caused it.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Page fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("Metadata extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("Scrape API key is missing")]
    MissingScrapeKey,
    #[error("Extraction API key is missing")]
    MissingAiKey,
    #[error("Failed to start blocking runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
