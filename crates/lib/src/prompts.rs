//! # Extraction Prompt Templates
//!
//! The fixed instruction conversation sent to the extraction backend. The
//! parser instructions and the embedded schema contract are system turns;
//! the page text is the user turn. The conversation is built once per
//! pipeline run and reused across retry attempts.

use crate::schema::extraction_schema;

/// The parser persona and task instructions.
pub const PARSER_SYSTEM_PROMPT: &str = "You are a webpage parser. The user will provide you with the text content of a webpage. \
Determine whether it is a product page. If it is, fill in the product data in the given format; \
if it is not a product page, product details are not required. \
Reply in valid JSON.";

/// The system turn embedding the machine-readable schema contract.
///
/// The schema text itself is generated once per process; only the small
/// surrounding frame is formatted per call site.
pub fn schema_system_prompt() -> String {
    format!(
        "Below is the OpenAPI JSON schema your reply must conform to:\n\n{}",
        extraction_schema()
    )
}
