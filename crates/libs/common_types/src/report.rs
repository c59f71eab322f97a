use crate::{ClipSimilarity, ColorShare};
use serde::{Deserialize, Serialize};

/// The "visual DNA" of a collection, condensed by the model from all per-asset results.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub core_features: Vec<String>,
    pub prompt_formula: String,
}

/// Mean similarity against one reference dataset across the analysed assets.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatasetSimilarity {
    pub dataset: String,
    pub similarity: f64,
}

impl From<&ClipSimilarity> for DatasetSimilarity {
    fn from(clip: &ClipSimilarity) -> Self {
        Self {
            dataset: clip.dataset.clone(),
            similarity: clip.similarity,
        }
    }
}

/// Collection level statistics, always derived from the current results and summary.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalReportData {
    pub sample_count: usize,
    pub avg_sharpness: f64,
    pub avg_complexity: f64,
    pub avg_uniqueness: f64,
    pub avg_saturation: f64,
    pub dominant_colors: Vec<ColorShare>,
    pub top_styles: Vec<String>,
    pub dataset_similarity: Vec<DatasetSimilarity>,
    pub recommendations: Vec<String>,
    pub summary: Option<CollectionSummary>,
}
