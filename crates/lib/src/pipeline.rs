//! # Extraction Pipeline
//!
//! The bounded retry loop around the extraction client. Each run builds the
//! instruction conversation once, then keeps asking the model until its
//! answer survives schema coercion or the attempt budget runs out. Cost is
//! accumulated across every answered attempt: tokens were consumed whether
//! or not the answer validated, so discarded attempts are still billed.

use crate::coerce::coerce;
use crate::errors::ExtractionError;
use crate::extract::ExtractionClient;
use crate::prompts::{schema_system_prompt, PARSER_SYSTEM_PROMPT};
use crate::schema::ExtractionResult;
use crate::types::{AiResponse, ChatMessage};
use tracing::warn;

pub(crate) const MAX_ATTEMPTS: u32 = 5;

/// Builds the fixed instruction conversation for one page.
///
/// Two system turns (parser instructions, schema contract) followed by the
/// page text as the user turn. Reused verbatim across retry attempts.
pub fn build_messages(page_text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(PARSER_SYSTEM_PROMPT),
        ChatMessage::system(schema_system_prompt()),
        ChatMessage::user(page_text),
    ]
}

/// Runs extraction with bounded retry and running-cost accounting.
///
/// On success the returned response's `cost` is overwritten with the
/// accumulated total across all attempts, so the caller sees the full spend
/// rather than the winning attempt's share. Validation failures and backend
/// errors are retried alike; only exhaustion of the budget escalates.
pub async fn run_extraction(
    client: &ExtractionClient,
    page_text: &str,
) -> Result<(AiResponse, ExtractionResult), ExtractionError> {
    let messages = build_messages(page_text);

    let mut running_cost = 0.0_f64;
    for attempt in 1..=MAX_ATTEMPTS {
        let response = match client.extract(&messages).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Extraction attempt {attempt}/{MAX_ATTEMPTS} failed: {e}. Retrying...");
                continue;
            }
        };

        // Bill the attempt before validating it; the tokens are spent
        // either way.
        running_cost += response.cost;

        match coerce(&response.text) {
            Ok(result) => {
                let mut response = response;
                response.cost = running_cost;
                return Ok((response, result));
            }
            Err(e) => {
                warn!(
                    "Extraction attempt {attempt}/{MAX_ATTEMPTS} failed validation: {e}. Retrying..."
                );
            }
        }
    }

    Err(ExtractionError::Exhausted {
        attempts: MAX_ATTEMPTS,
        cost: running_cost,
    })
}
