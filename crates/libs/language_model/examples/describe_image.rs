#![allow(clippy::missing_errors_doc)]

use color_eyre::eyre::{Result, eyre};
use language_model::{InlineImage, ResponseSchema, VisionModelClient};
use serde_json::json;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run() -> Result<()> {
    let base_url =
        std::env::var("MODEL_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let image_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| eyre!("usage: describe_image <image>"))?;

    let client = VisionModelClient::with_base_url(&base_url)
        .maybe_api_key(std::env::var("APP__SECRETS__API_KEY").ok())
        .timeout(Duration::from_secs(60))
        .build()?;
    let image = InlineImage::from_path(&image_path).await?;

    let now = Instant::now();
    info!(
        "Caption: {}",
        client
            .chat("Caption this image in one paragraph. Respond with the caption only.")
            .images(&[image.clone()])
            .call()
            .await?
    );

    let schema = ResponseSchema::new(
        "palette",
        json!({
            "type": "object",
            "properties": {
                "colors": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["colors"]
        }),
    );
    info!(
        "Palette: {}",
        client
            .chat("List the main colours of this image as hex codes.")
            .images(&[image])
            .schema(schema)
            .call()
            .await?
    );
    info!("Total time: {:?}", now.elapsed());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    color_eyre::install()?;

    run().await?;

    Ok(())
}
