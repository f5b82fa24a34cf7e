//! Transforms a single product URL into a structured record.
//!
//! Requires `SCRAPE_API_KEY` and `AI_API_KEY` in the environment (or a
//! `.env` file):
//!
//! ```sh
//! cargo run --example transform -- https://shop.example/some-product
//! ```

use pagelift::TransformClientBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let url = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: transform <url>"))?;

    let client = TransformClientBuilder::new()
        .scrape_api_key(std::env::var("SCRAPE_API_KEY")?)
        .ai_api_key(std::env::var("AI_API_KEY")?)
        .build()?;

    let result = client.transform_url(&url).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
