use common_types::{AnalysisResult, GlobalReportData};
use serde::Serialize;
use std::fmt::{self, Write};

const BAR_WIDTH: usize = 20;

#[derive(Serialize)]
struct JsonReport<'a> {
    report: Option<&'a GlobalReportData>,
    results: &'a [AnalysisResult],
}

/// Report and results as pretty JSON, thumbnails included.
pub fn render_json(
    report: Option<&GlobalReportData>,
    results: &[AnalysisResult],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { report, results })
}

/// Plain text report. Thumbnails are left out, they are only useful in the JSON output.
pub fn render_report(
    report: &GlobalReportData,
    results: &[AnalysisResult],
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "Visual asset report ({} samples)", report.sample_count)?;
    writeln!(out)?;
    writeln!(out, "Scores")?;
    writeln!(out, "  sharpness   {}", score_line(report.avg_sharpness))?;
    writeln!(out, "  complexity  {}", score_line(report.avg_complexity))?;
    writeln!(out, "  saturation  {}", score_line(report.avg_saturation))?;
    writeln!(out, "  uniqueness  {}", score_line(report.avg_uniqueness))?;

    if !report.dominant_colors.is_empty() {
        writeln!(out)?;
        writeln!(out, "Palette")?;
        for color in &report.dominant_colors {
            writeln!(out, "  {:<8} {:>5.1}%  {}", color.hex, color.value, color.name)?;
        }
    }

    if !report.top_styles.is_empty() {
        writeln!(out)?;
        writeln!(out, "Styles: {}", report.top_styles.join(", "))?;
    }

    if !report.dataset_similarity.is_empty() {
        writeln!(out)?;
        writeln!(out, "Dataset similarity")?;
        for dataset in &report.dataset_similarity {
            writeln!(
                out,
                "  {:<12} {}",
                dataset.dataset,
                score_line(dataset.similarity * 100.0)
            )?;
        }
    }

    if let Some(summary) = &report.summary {
        writeln!(out)?;
        writeln!(out, "Visual DNA")?;
        writeln!(out, "  {}", summary.core_features.join(" / "))?;
        writeln!(out, "  {}", summary.prompt_formula)?;
    }

    writeln!(out)?;
    writeln!(out, "Recommendations")?;
    for (i, recommendation) in report.recommendations.iter().enumerate() {
        writeln!(out, "  {}. {recommendation}", i + 1)?;
    }

    writeln!(out)?;
    writeln!(out, "Samples")?;
    for result in results {
        let analysis = &result.analysis;
        writeln!(
            out,
            "  [{}] sharpness {:.0}, complexity {:.0}, uniqueness {:.0}",
            result.id, analysis.sharpness, analysis.complexity, analysis.uniqueness_score
        )?;
        if !analysis.style_features.is_empty() {
            writeln!(out, "      {}", analysis.style_features.join(", "))?;
        }
        writeln!(out, "      {}", analysis.description)?;
    }

    Ok(out)
}

/// `value` on a 0-100 scale as a bar followed by the number. Out of range values are drawn
/// clamped but printed as received.
fn score_line(value: f64) -> String {
    let filled = (value.clamp(0.0, 100.0) / 100.0 * BAR_WIDTH as f64).round() as usize;
    format!(
        "{}{} {value:>5.1}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_types::{ClipSimilarity, CollectionSummary, ColorShare, RemoteAssetAnalysis};
    use ml_analysis::aggregate;

    fn result(id: &str, sharpness: f64) -> AnalysisResult {
        AnalysisResult::new(
            id.to_string(),
            "data:image/png;base64,iVBORw==".to_string(),
            RemoteAssetAnalysis {
                color_distribution: vec![ColorShare {
                    name: "Amber".to_string(),
                    value: 55.0,
                    hex: "#FFBF00".to_string(),
                }],
                sharpness,
                complexity: 40.0,
                saturation: Some(75.0),
                style_features: vec!["pixel art".to_string(), "isometric".to_string()],
                clip_similarity: vec![ClipSimilarity {
                    dataset: "OpenGameArt".to_string(),
                    similarity: 0.8,
                    style_match: "tileset".to_string(),
                }],
                uniqueness_score: 60.0,
                description: format!("Sample {id} reads well at small sizes."),
            },
        )
    }

    #[test]
    fn test_score_line_clamps_the_bar_only() {
        assert_eq!(score_line(50.0), format!("{}{}  50.0", "#".repeat(10), ".".repeat(10)));
        assert!(score_line(140.0).starts_with(&"#".repeat(BAR_WIDTH)));
        assert!(score_line(140.0).ends_with("140.0"));
        assert!(score_line(-5.0).starts_with(&".".repeat(BAR_WIDTH)));
    }

    #[test]
    fn test_text_report_without_summary_skips_visual_dna() -> Result<(), fmt::Error> {
        let results = [result("a1", 80.0), result("b2", 60.0)];
        let report = aggregate(&results, None).expect("non-empty");

        let text = render_report(&report, &results)?;

        assert!(text.contains("(2 samples)"));
        assert!(text.contains("#FFBF00"));
        assert!(text.contains("Styles: pixel art, isometric"));
        assert!(text.contains("OpenGameArt"));
        assert!(text.contains("[b2] sharpness 60"));
        assert!(!text.contains("Visual DNA"));
        assert!(!text.contains("data:image"));
        Ok(())
    }

    #[test]
    fn test_text_report_with_summary() -> Result<(), fmt::Error> {
        let results = [result("a1", 80.0)];
        let summary = CollectionSummary {
            core_features: vec!["像素".to_string(); 8],
            prompt_formula: "风格:[像素] + 构图:[等距]".to_string(),
        };
        let report = aggregate(&results, Some(&summary)).expect("non-empty");

        let text = render_report(&report, &results)?;

        assert!(text.contains("Visual DNA"));
        assert!(text.contains("风格:[像素] + 构图:[等距]"));
        assert!(text.contains("3. "));
        Ok(())
    }

    #[test]
    fn test_json_report_keeps_thumbnails() -> serde_json::Result<()> {
        let results = [result("a1", 80.0)];
        let report = aggregate(&results, None);

        let json: serde_json::Value =
            serde_json::from_str(&render_json(report.as_ref(), &results)?)?;

        assert_eq!(json["report"]["sampleCount"], 1);
        assert_eq!(json["results"][0]["id"], "a1");
        assert_eq!(json["results"][0]["thumbnail"], "data:image/png;base64,iVBORw==");
        assert_eq!(json["results"][0]["sharpness"], 80.0);
        Ok(())
    }

    #[test]
    fn test_json_report_without_results() -> serde_json::Result<()> {
        let json: serde_json::Value = serde_json::from_str(&render_json(None, &[])?)?;
        assert!(json["report"].is_null());
        assert_eq!(json["results"], serde_json::json!([]));
        Ok(())
    }
}
