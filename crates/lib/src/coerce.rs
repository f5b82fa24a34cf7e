//! # Schema Coercion
//!
//! Turns the model's textual answer into a validated [`ExtractionResult`].
//! Chat models rarely return bare JSON: answers arrive wrapped in markdown
//! fences, padded with prose, or carrying trailing commas. Coercion peels
//! those away before handing the payload to the strict deserializer, then
//! checks the flag/metadata invariant.
//!
//! This is a pure transformation with no side effects.

use crate::errors::ExtractionError;
use crate::schema::ExtractionResult;
use regex::Regex;

/// Parses `text` as an [`ExtractionResult`], tolerating common model
/// formatting noise.
pub fn coerce(text: &str) -> Result<ExtractionResult, ExtractionError> {
    let candidate = unfence(text)?;

    let start = candidate.find('{');
    let end = candidate.rfind('}');
    let object = match (start, end) {
        (Some(start), Some(end)) if start < end => &candidate[start..=end],
        _ => {
            return Err(ExtractionError::SchemaValidation(
                "no JSON object found in model output".to_string(),
            ))
        }
    };

    let object = strip_trailing_commas(object)?;
    let result: ExtractionResult = serde_json::from_str(&object)
        .map_err(|e| ExtractionError::SchemaValidation(e.to_string()))?;

    if !result.is_product_page && result.product_metadata.is_some() {
        return Err(ExtractionError::SchemaValidation(
            "product_metadata present although is_product_page is false".to_string(),
        ));
    }

    Ok(result)
}

/// Extracts the body of a markdown code fence, if the answer uses one.
fn unfence(text: &str) -> Result<String, ExtractionError> {
    let re = Regex::new(r"```(?:json)?\s*([\s\S]*?)```")?;
    let body = re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| text.trim().to_string());
    Ok(body)
}

/// Drops trailing commas before closing brackets, a frequent JS-object habit
/// in model output that strict JSON parsing rejects.
fn strip_trailing_commas(object: &str) -> Result<String, ExtractionError> {
    let re = Regex::new(r",\s*([}\]])")?;
    Ok(re.replace_all(object, "$1").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Product;

    fn product_json() -> String {
        r#"{
            "is_product_page": true,
            "product_metadata": {
                "product_name": "Tormore 1992 26 Year Old",
                "currency_symbol": "£",
                "base_price": 495.0,
                "brand_name": "The First Editions"
            }
        }"#
        .to_string()
    }

    #[test]
    fn parses_plain_json() {
        let result = coerce(&product_json()).unwrap();
        assert!(result.is_product_page);
        let product = result.product_metadata.unwrap();
        assert_eq!(product.product_name, "Tormore 1992 26 Year Old");
        assert_eq!(product.base_price, Some(495.0));
    }

    #[test]
    fn parses_fenced_json() {
        let fenced = format!("```json\n{}\n```", product_json());
        let result = coerce(&fenced).unwrap();
        assert!(result.is_product_page);
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let wrapped = format!("Here is the extracted data:\n{}\nLet me know!", product_json());
        let result = coerce(&wrapped).unwrap();
        assert!(result.product_metadata.is_some());
    }

    #[test]
    fn tolerates_trailing_commas() {
        let sloppy = r#"{
            "is_product_page": true,
            "product_metadata": {
                "product_name": "Widget",
                "categories": ["Tools", "Garden",],
            },
        }"#;
        let result = coerce(sloppy).unwrap();
        let product = result.product_metadata.unwrap();
        assert_eq!(
            product.categories,
            Some(vec!["Tools".to_string(), "Garden".to_string()])
        );
    }

    #[test]
    fn non_product_page_needs_no_metadata() {
        let result = coerce(r#"{"is_product_page": false}"#).unwrap();
        assert!(!result.is_product_page);
        assert!(result.product_metadata.is_none());
    }

    #[test]
    fn rejects_metadata_on_non_product_page() {
        let inconsistent = r#"{
            "is_product_page": false,
            "product_metadata": {"product_name": "Ghost"}
        }"#;
        let err = coerce(inconsistent).unwrap_err();
        assert!(matches!(err, ExtractionError::SchemaValidation(_)));
    }

    #[test]
    fn rejects_missing_required_name() {
        let nameless = r#"{
            "is_product_page": true,
            "product_metadata": {"base_price": 9.99}
        }"#;
        assert!(coerce(nameless).is_err());
    }

    #[test]
    fn rejects_mistyped_fields() {
        let mistyped = r#"{
            "is_product_page": true,
            "product_metadata": {"product_name": "Widget", "base_price": "cheap"}
        }"#;
        assert!(coerce(mistyped).is_err());
    }

    #[test]
    fn rejects_output_without_an_object() {
        assert!(coerce("I could not parse this page, sorry.").is_err());
        assert!(coerce("").is_err());
    }

    #[test]
    fn round_trip_is_idempotent() {
        let original = ExtractionResult {
            is_product_page: true,
            product_metadata: Some(Product {
                product_id: None,
                product_name: "Fresh Foam Sneaker".to_string(),
                currency_symbol: Some("$".to_string()),
                base_price: Some(79.99),
                buy_now_price: Some(74.99),
                full_description: Some("Cushioned running shoe.".to_string()),
                product_rating: Some(4.5),
                product_review_count: Some(1200),
                brand_name: Some("New Balance".to_string()),
                available_stock: None,
                categories: Some(vec!["Shoes".to_string(), "Shoes".to_string()]),
                variants: Some(vec!["8".to_string(), "8.5".to_string()]),
                date_added: None,
            }),
        };

        let serialized = serde_json::to_string_pretty(&original).unwrap();
        let coerced = coerce(&serialized).unwrap();
        assert_eq!(coerced, original);
    }
}
