use common_types::{
    AnalysisResult, CollectionSummary, ColorShare, DatasetSimilarity, GlobalReportData,
    RemoteAssetAnalysis,
};

const MAX_DOMINANT_COLORS: usize = 5;
const MAX_TOP_STYLES: usize = 4;

pub const RECOMMENDATIONS: [&str; 3] = [
    "保持主色调的一致性，将占比最高的前景色整理成统一色板，用于后续素材的生产。",
    "针对复杂度偏高的素材适当精简细节层次，以保证缩略尺寸下的可读性。",
    "参考相似度最高的数据集风格方向，同时强化独特元素，避免与公开素材趋同。",
];

/// Reduce per-asset results into collection level statistics.
///
/// Returns `None` for an empty slice, there is nothing to average.
#[must_use]
pub fn aggregate(
    results: &[AnalysisResult],
    summary: Option<&CollectionSummary>,
) -> Option<GlobalReportData> {
    if results.is_empty() {
        return None;
    }
    let mean = |field: fn(&RemoteAssetAnalysis) -> f64| {
        results.iter().map(|r| field(&r.analysis)).sum::<f64>() / results.len() as f64
    };

    Some(GlobalReportData {
        sample_count: results.len(),
        avg_sharpness: mean(|a| a.sharpness),
        avg_complexity: mean(|a| a.complexity),
        avg_uniqueness: mean(|a| a.uniqueness_score),
        avg_saturation: average_saturation(results),
        dominant_colors: merge_colors(results),
        top_styles: top_styles(results),
        dataset_similarity: dataset_similarity(results),
        recommendations: RECOMMENDATIONS.iter().map(ToString::to_string).collect(),
        summary: summary.cloned(),
    })
}

/// Saturation is optional in the model output, so it is averaged over the results that have it.
fn average_saturation(results: &[AnalysisResult]) -> f64 {
    let reported: Vec<f64> = results.iter().filter_map(|r| r.analysis.saturation).collect();
    if reported.is_empty() {
        return 0.0;
    }
    reported.iter().sum::<f64>() / reported.len() as f64
}

/// Sum each named colour across all results, then divide by the number of results.
///
/// The first hex seen for a name is kept. Values are not renormalized to 100.
fn merge_colors(results: &[AnalysisResult]) -> Vec<ColorShare> {
    let mut merged: Vec<ColorShare> = Vec::new();
    for color in results.iter().flat_map(|r| &r.analysis.color_distribution) {
        match merged.iter_mut().find(|c| c.name == color.name) {
            Some(existing) => existing.value += color.value,
            None => merged.push(color.clone()),
        }
    }

    let count = results.len() as f64;
    for color in &mut merged {
        color.value /= count;
    }
    // Stable sort: ties keep first-seen order.
    merged.sort_by(|a, b| b.value.total_cmp(&a.value));
    merged.truncate(MAX_DOMINANT_COLORS);
    merged
}

fn top_styles(results: &[AnalysisResult]) -> Vec<String> {
    let mut styles: Vec<String> = Vec::with_capacity(MAX_TOP_STYLES);
    for tag in results.iter().flat_map(|r| &r.analysis.style_features) {
        if styles.len() == MAX_TOP_STYLES {
            break;
        }
        if !styles.contains(tag) {
            styles.push(tag.clone());
        }
    }
    styles
}

/// Mean similarity per reference dataset, over the results that mention that dataset.
fn dataset_similarity(results: &[AnalysisResult]) -> Vec<DatasetSimilarity> {
    let mut totals: Vec<(DatasetSimilarity, usize)> = Vec::new();
    for clip in results.iter().flat_map(|r| &r.analysis.clip_similarity) {
        match totals.iter_mut().find(|(d, _)| d.dataset == clip.dataset) {
            Some((total, seen)) => {
                total.similarity += clip.similarity;
                *seen += 1;
            }
            None => totals.push((clip.into(), 1)),
        }
    }
    totals
        .into_iter()
        .map(|(mut total, seen)| {
            total.similarity /= seen as f64;
            total
        })
        .collect()
}
