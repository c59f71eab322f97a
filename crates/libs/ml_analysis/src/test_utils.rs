use async_trait::async_trait;
use common_types::{AnalysisResult, ClipSimilarity, ColorShare, RemoteAssetAnalysis};
use language_model::{InlineImage, ModelResult, ResponseSchema, StructuredGeneration};
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type AnalysisResponder = Box<dyn Fn(usize) -> ModelResult<String> + Send + Sync>;
type SummaryResponder = Box<dyn Fn() -> ModelResult<String> + Send + Sync>;

/// Scripted stand-in for the remote model.
///
/// Image requests are answered by the analysis responder, keyed by the asset's position in
/// `with_assets`. Text-only requests are answered by the summary responder.
pub struct StubModel {
    assets: HashMap<String, usize>,
    analysis: AnalysisResponder,
    summary: SummaryResponder,
    reverse_delay: Option<Duration>,
    pub analysis_calls: AtomicUsize,
    pub summary_prompts: Mutex<Vec<String>>,
    pub schema_names: Mutex<Vec<String>>,
}

impl StubModel {
    pub fn new(analysis: impl Fn(usize) -> ModelResult<String> + Send + Sync + 'static) -> Self {
        Self {
            assets: HashMap::new(),
            analysis: Box::new(analysis),
            summary: Box::new(|| Ok(summary_json(8))),
            reverse_delay: None,
            analysis_calls: AtomicUsize::new(0),
            summary_prompts: Mutex::new(Vec::new()),
            schema_names: Mutex::new(Vec::new()),
        }
    }

    pub fn with_summary(
        mut self,
        summary: impl Fn() -> ModelResult<String> + Send + Sync + 'static,
    ) -> Self {
        self.summary = Box::new(summary);
        self
    }

    pub fn with_assets(mut self, data_urls: &[String]) -> Self {
        self.assets = data_urls
            .iter()
            .enumerate()
            .map(|(index, url)| (url.clone(), index))
            .collect();
        self
    }

    /// Make earlier assets answer slower than later ones.
    pub const fn with_reverse_delay(mut self, step: Duration) -> Self {
        self.reverse_delay = Some(step);
        self
    }

    pub fn analysis_calls(&self) -> usize {
        self.analysis_calls.load(Ordering::SeqCst)
    }

    pub fn summary_prompts(&self) -> Vec<String> {
        self.summary_prompts.lock().expect("poisoned").clone()
    }
}

#[async_trait]
impl StructuredGeneration for StubModel {
    async fn generate(
        &self,
        prompt: &str,
        images: &[InlineImage],
        schema: ResponseSchema,
    ) -> ModelResult<String> {
        self.schema_names
            .lock()
            .expect("poisoned")
            .push(schema.name.clone());
        let Some(image) = images.first() else {
            self.summary_prompts
                .lock()
                .expect("poisoned")
                .push(prompt.to_string());
            return (self.summary)();
        };

        self.analysis_calls.fetch_add(1, Ordering::SeqCst);
        let index = self.assets.get(image.data_url()).copied().unwrap_or(0);
        if let Some(step) = self.reverse_delay {
            let remaining = u32::try_from(self.assets.len().saturating_sub(index)).unwrap_or(1);
            tokio::time::sleep(step * remaining).await;
        }
        (self.analysis)(index)
    }
}

pub fn analysis_json(sharpness: f64, description: &str) -> String {
    json!({
        "colorDistribution": [
            { "name": "Crimson", "value": 60, "hex": "#DC143C" },
            { "name": "Slate", "value": 40, "hex": "#708090" }
        ],
        "sharpness": sharpness,
        "complexity": 50,
        "saturation": 70,
        "styleFeatures": ["cel shading", "bold outline"],
        "clipSimilarity": [
            { "dataset": "WikiArt", "similarity": 0.2, "styleMatch": "poster" },
            { "dataset": "LAION-5B", "similarity": 0.5, "styleMatch": "illustration" },
            { "dataset": "OpenGameArt", "similarity": 0.8, "styleMatch": "sprite" }
        ],
        "uniquenessScore": 65,
        "description": description
    })
    .to_string()
}

pub fn summary_json(feature_count: usize) -> String {
    let features: Vec<String> = (1..=feature_count).map(|i| format!("特征{i}")).collect();
    json!({
        "coreFeatures": features,
        "promptFormula": "风格:[赛璐璐] + 构图:[居中] + 核心特征:[粗描边] + 色调:[暖红] + 细节:[高光]"
    })
    .to_string()
}

pub fn result_with(
    sharpness: f64,
    colors: &[(&str, f64, &str)],
    styles: &[&str],
    saturation: Option<f64>,
) -> AnalysisResult {
    AnalysisResult::new(
        crate::nice_id(12),
        "data:image/png;base64,AA==".to_string(),
        RemoteAssetAnalysis {
            color_distribution: colors
                .iter()
                .map(|(name, value, hex)| ColorShare {
                    name: (*name).to_string(),
                    value: *value,
                    hex: (*hex).to_string(),
                })
                .collect(),
            sharpness,
            complexity: sharpness / 2.0,
            saturation,
            style_features: styles.iter().map(ToString::to_string).collect(),
            clip_similarity: vec![ClipSimilarity {
                dataset: "WikiArt".to_string(),
                similarity: sharpness / 100.0,
                style_match: "painterly".to_string(),
            }],
            uniqueness_score: 100.0 - sharpness,
            description: format!("sharpness {sharpness}"),
        },
    )
}

/// Write `count` small, distinct PNG files and return their paths with their data URLs.
pub async fn write_assets(dir: &Path, count: usize) -> (Vec<PathBuf>, Vec<String>) {
    let mut paths = Vec::with_capacity(count);
    let mut urls = Vec::with_capacity(count);
    for index in 0..count {
        let path = dir.join(format!("asset_{index}.png"));
        let marker = u8::try_from(index).expect("small test batch");
        std::fs::write(&path, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, marker])
            .expect("write test asset");
        let image = InlineImage::from_path(&path).await.expect("encode test asset");
        urls.push(image.into_data_url());
        paths.push(path);
    }
    (paths, urls)
}
