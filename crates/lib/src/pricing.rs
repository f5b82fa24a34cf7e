//! # Per-Model Price Table
//!
//! Maps model identifiers to their USD-per-token rates so that every AI call
//! can be billed from its reported token usage. The table is read-only,
//! versioned data held apart from pipeline logic: updating a price is an edit
//! here, never a pipeline change.

use crate::errors::ExtractionError;
use std::fmt;
use std::str::FromStr;

/// Chat models supported by the extraction client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    #[default]
    Gpt4o,
    Gpt4oMini,
    Gpt4Turbo,
    Gpt35Turbo,
}

impl Model {
    /// The identifier sent on the wire to the extraction backend.
    pub fn wire_id(&self) -> &'static str {
        match self {
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt4Turbo => "gpt-4-turbo",
            Model::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_id())
    }
}

impl FromStr for Model {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gpt-4o" => Ok(Model::Gpt4o),
            "gpt-4o-mini" => Ok(Model::Gpt4oMini),
            "gpt-4-turbo" => Ok(Model::Gpt4Turbo),
            "gpt-3.5-turbo" => Ok(Model::Gpt35Turbo),
            other => Err(ExtractionError::UnknownModel(other.to_string())),
        }
    }
}

/// USD cost per single token, split by prompt and completion usage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelRates {
    pub prompt: f64,
    pub completion: f64,
}

/// Rates keyed by wire identifier. Prices are per token, i.e. the published
/// per-million figures divided by 1e6.
const RATE_TABLE: &[(&str, ModelRates)] = &[
    (
        "gpt-4o",
        ModelRates {
            prompt: 2.5e-6,
            completion: 10.0e-6,
        },
    ),
    (
        "gpt-4o-mini",
        ModelRates {
            prompt: 0.15e-6,
            completion: 0.6e-6,
        },
    ),
    (
        "gpt-4-turbo",
        ModelRates {
            prompt: 10.0e-6,
            completion: 30.0e-6,
        },
    ),
    (
        "gpt-3.5-turbo",
        ModelRates {
            prompt: 0.5e-6,
            completion: 1.5e-6,
        },
    ),
];

/// Looks up the rates for a wire identifier.
pub fn rates_for(model_id: &str) -> Option<&'static ModelRates> {
    RATE_TABLE
        .iter()
        .find(|(id, _)| *id == model_id)
        .map(|(_, rates)| rates)
}

/// Computes the USD cost of one AI call from its token usage.
///
/// Cost is a pure function of the token counts and the model identifier.
pub fn cost_for(
    model: Model,
    prompt_tokens: u64,
    completion_tokens: u64,
) -> Result<f64, ExtractionError> {
    let rates = rates_for(model.wire_id())
        .ok_or_else(|| ExtractionError::UnknownModel(model.wire_id().to_string()))?;
    Ok(prompt_tokens as f64 * rates.prompt + completion_tokens as f64 * rates.completion)
}
