use crate::AnalysisOutcome;
use crate::utils::{nice_id, parse_structured};
use common_types::{AnalysisResult, RemoteAssetAnalysis};
use language_model::{InlineImage, StructuredGeneration};
use tracing::debug;

/// Ask the model for a structured analysis of one asset.
///
/// The `id` and `thumbnail` of the result are assigned locally, after the response parsed.
/// Scores are not clamped.
pub async fn analyze_asset<M: StructuredGeneration + ?Sized>(
    model: &M,
    image: InlineImage,
    id_length: usize,
) -> AnalysisOutcome<AnalysisResult> {
    let response = model
        .generate(
            prompts::ASSET_ANALYSIS,
            std::slice::from_ref(&image),
            schemas::asset_analysis(),
        )
        .await?;
    let analysis: RemoteAssetAnalysis = parse_structured(&response)?;
    debug!(
        "Parsed analysis with {} colours and {} style tags",
        analysis.color_distribution.len(),
        analysis.style_features.len()
    );

    Ok(AnalysisResult::new(
        nice_id(id_length),
        image.into_data_url(),
        analysis,
    ))
}

mod prompts {
    pub const ASSET_ANALYSIS: &str = r"
Analyze this visual asset as an art director reviewing it for a production asset library.
Ignore the background color completely: only the foreground subject counts for every
measurement below.

Return:
1) The top 5 foreground colors, each with a color name, its percentage share of the
   foreground (0-100) and its hex code.
2) sharpness: edge definition and clarity of the subject, 0-100.
3) complexity: amount of detail, shapes and texture, 0-100.
4) saturation: color intensity of the foreground, 0-100.
5) styleFeatures: short style tags (e.g. pixel art, cel shading, watercolor, low poly).
6) clipSimilarity: estimated similarity of this asset to the WikiArt, LAION-5B and
   OpenGameArt datasets, 0-1 each, with a short label naming the closest style match.
7) uniquenessScore: how distinctive the asset is compared to those datasets, 0-100.
8) description: a brief professional critique in two or three sentences.
";
}

mod schemas {
    use language_model::ResponseSchema;
    use serde_json::json;

    pub fn asset_analysis() -> ResponseSchema {
        ResponseSchema::new(
            "asset_analysis",
            json!({
                "type": "object",
                "properties": {
                    "colorDistribution": {
                        "type": "array",
                        "maxItems": 5,
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string" },
                                "value": { "type": "number" },
                                "hex": { "type": "string" }
                            },
                            "required": ["name", "value", "hex"]
                        }
                    },
                    "sharpness": { "type": "number" },
                    "complexity": { "type": "number" },
                    "saturation": { "type": "number" },
                    "styleFeatures": { "type": "array", "items": { "type": "string" } },
                    "clipSimilarity": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "dataset": {
                                    "type": "string",
                                    "enum": ["WikiArt", "LAION-5B", "OpenGameArt"]
                                },
                                "similarity": { "type": "number" },
                                "styleMatch": { "type": "string" }
                            },
                            "required": ["dataset", "similarity", "styleMatch"]
                        }
                    },
                    "uniquenessScore": { "type": "number" },
                    "description": { "type": "string" }
                },
                "required": [
                    "colorDistribution", "sharpness", "complexity", "styleFeatures",
                    "clipSimilarity", "uniquenessScore", "description"
                ]
            }),
        )
    }
}
