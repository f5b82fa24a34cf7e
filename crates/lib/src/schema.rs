//! # Product Record Schema
//!
//! The typed shape the extraction model is asked to fill in, plus the
//! JSON-schema text that is embedded in the prompt as the machine-readable
//! contract. The schema text is generated once per process and cached;
//! every request reuses the same contract.

use chrono::{DateTime, Utc};
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Structured metadata extracted from a single product page.
///
/// Pages routinely omit data, so every field except the product name is
/// optional. The doc comments double as field descriptions in the generated
/// schema and are part of the contract the model sees.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Product {
    /// A unique identifier for the product
    pub product_id: Option<String>,
    /// The name of the product
    pub product_name: String,
    /// Currency Symbol of the price
    pub currency_symbol: Option<String>,
    /// The regular price of the product
    pub base_price: Option<f64>,
    /// The price for buying the product instantly
    pub buy_now_price: Option<f64>,
    /// Full description of the product
    pub full_description: Option<String>,
    /// Rating of the product given by users
    pub product_rating: Option<f64>,
    /// Number of users who have left reviews
    pub product_review_count: Option<u64>,
    /// Name of the brand
    pub brand_name: Option<String>,
    /// The number of items in stock as INT
    pub available_stock: Option<i64>,
    /// The category to which the product belongs
    pub categories: Option<Vec<String>>,
    /// Different variations of the product if available
    pub variants: Option<Vec<String>>,
    /// The date and time the product was added to the catalog
    pub date_added: Option<DateTime<Utc>>,
}

/// The top-level answer the model returns for a page.
///
/// `product_metadata` is only meaningful when `is_product_page` is true;
/// the coercer rejects payloads that carry metadata for a non-product page.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub is_product_page: bool,
    pub product_metadata: Option<Product>,
}

/// The JSON-schema text for [`ExtractionResult`], generated once and cached
/// process-wide.
pub fn extraction_schema() -> &'static str {
    static SCHEMA: OnceLock<String> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let schema = schema_for!(ExtractionResult);
        // Serializing a generated schema cannot fail: it is plain maps,
        // strings, and booleans.
        serde_json::to_string_pretty(&schema).expect("schema serialization")
    })
}
