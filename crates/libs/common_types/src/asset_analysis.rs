use serde::{Deserialize, Serialize};

/// Share of the foreground taken up by one named colour, as estimated by the model.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ColorShare {
    pub name: String,
    /// Percentage, nominally 0-100.
    pub value: f64,
    pub hex: String,
}

/// Model-estimated similarity against a reference dataset.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClipSimilarity {
    pub dataset: String,
    /// Nominally 0-1.
    pub similarity: f64,
    pub style_match: String,
}

/// The structured output the model returns for a single asset.
///
/// Scores are passed through exactly as received, the model does not always stay in its
/// documented ranges.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAssetAnalysis {
    pub color_distribution: Vec<ColorShare>,
    pub sharpness: f64,
    pub complexity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    pub style_features: Vec<String>,
    pub clip_similarity: Vec<ClipSimilarity>,
    pub uniqueness_score: f64,
    pub description: String,
}

/// One analysed asset: the model output plus the locally assigned id and the encoded image.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,
    /// `data:` URL of the analysed image.
    pub thumbnail: String,
    #[serde(flatten)]
    pub analysis: RemoteAssetAnalysis,
}

impl AnalysisResult {
    #[must_use]
    pub const fn new(id: String, thumbnail: String, analysis: RemoteAssetAnalysis) -> Self {
        Self {
            id,
            thumbnail,
            analysis,
        }
    }
}
