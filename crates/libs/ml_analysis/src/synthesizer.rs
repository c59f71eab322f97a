use crate::utils::parse_structured;
use crate::{AnalysisOutcome, AssetAnalysisError};
use common_types::{AnalysisResult, CollectionSummary};
use language_model::StructuredGeneration;

pub const CORE_FEATURE_COUNT: usize = 8;

/// Condense all per-asset results into the collection's "visual DNA".
pub async fn synthesize_collection<M: StructuredGeneration + ?Sized>(
    model: &M,
    results: &[AnalysisResult],
) -> AnalysisOutcome<CollectionSummary> {
    if results.is_empty() {
        return Err(AssetAnalysisError::EmptyCollection);
    }
    let prompt = prompts::collection_summary(&feature_block(results), &description_block(results));
    let response = model
        .generate(&prompt, &[], schemas::collection_summary())
        .await?;
    let summary: CollectionSummary = parse_structured(&response)?;

    if summary.core_features.len() != CORE_FEATURE_COUNT {
        return Err(AssetAnalysisError::ResponseFormat(format!(
            "expected {CORE_FEATURE_COUNT} core features, got {}",
            summary.core_features.len()
        )));
    }
    Ok(summary)
}

fn feature_block(results: &[AnalysisResult]) -> String {
    results
        .iter()
        .flat_map(|r| r.analysis.style_features.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(", ")
}

fn description_block(results: &[AnalysisResult]) -> String {
    results
        .iter()
        .map(|r| r.analysis.description.as_str())
        .collect::<Vec<_>>()
        .join(". ")
}

mod prompts {
    pub fn collection_summary(features: &str, descriptions: &str) -> String {
        format!(
            r"你是一名资深美术总监。下面是同一批视觉素材的风格标签和逐张点评。

风格标签：{features}

素材点评：{descriptions}

请提炼这批素材共同的视觉DNA：
1) coreFeatures：恰好 8 个中文核心特征关键词；
2) promptFormula：一条可直接用于AI生图的提示词公式，严格使用以下结构：
风格:[...] + 构图:[...] + 核心特征:[...] + 色调:[...] + 细节:[...]"
        )
    }
}

mod schemas {
    use super::CORE_FEATURE_COUNT;
    use language_model::ResponseSchema;
    use serde_json::json;

    pub fn collection_summary() -> ResponseSchema {
        ResponseSchema::new(
            "collection_summary",
            json!({
                "type": "object",
                "properties": {
                    "coreFeatures": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": CORE_FEATURE_COUNT,
                        "maxItems": CORE_FEATURE_COUNT
                    },
                    "promptFormula": { "type": "string" }
                },
                "required": ["coreFeatures", "promptFormula"]
            }),
        )
    }
}
