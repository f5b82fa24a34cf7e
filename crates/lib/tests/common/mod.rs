#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared helpers for the integration tests: tracing setup and canned page
//! fixtures used by several suites.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}

/// A small but realistic product page, boilerplate included.
pub const PRODUCT_PAGE_HTML: &str = r#"
<html>
  <head><title>Old &amp; Rare Whisky</title><script>track();</script></head>
  <body>
    <header><h1>Old &amp; Rare Whisky</h1></header>
    <nav><a href="/whisky">All Whisky</a></nav>
    <main>
      <h2>Tormore 1992 26 Year Old</h2>
      <span>£495.00</span>
      <p>Single malt scotch whisky, 70cl, 45.7% ABV.</p>
    </main>
    <footer>Drink responsibly.</footer>
  </body>
</html>
"#;

/// A valid extraction answer for the product page fixture.
pub const PRODUCT_ANSWER_JSON: &str = r#"{
  "is_product_page": true,
  "product_metadata": {
    "product_name": "Tormore 1992 26 Year Old",
    "currency_symbol": "£",
    "base_price": 495.0,
    "full_description": "Single malt scotch whisky, 70cl, 45.7% ABV.",
    "categories": ["Whisky", "Single Malt"]
  }
}"#;
