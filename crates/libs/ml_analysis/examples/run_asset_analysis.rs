use language_model::VisionModelClient;
use ml_analysis::{analyze_asset, encode_asset, synthesize_collection};
use std::path::Path;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let client = VisionModelClient::with_base_url("http://localhost:8080")
        .model("qwen2.5-vl-7b-instruct".to_string())
        .timeout(Duration::from_secs(120))
        .build()?;

    let images = vec![
        Path::new("media_dir/sprites/knight.png"),
        Path::new("media_dir/sprites/slime.png"),
    ];

    let mut results = Vec::new();
    for image in images {
        let now = Instant::now();
        let encoded = encode_asset(image).await?;
        let result = analyze_asset(&client, encoded, 16).await?;
        println!(
            "{} sharpness {}, styles {:?}",
            image.display(),
            result.analysis.sharpness,
            result.analysis.style_features
        );
        println!("\tanalyze_asset {:?}", now.elapsed());
        results.push(result);
    }

    let now = Instant::now();
    let summary = synthesize_collection(&client, &results).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    println!("\tsynthesize_collection {:?}", now.elapsed());

    Ok(())
}
