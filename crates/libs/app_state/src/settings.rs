use crate::{LoggingSettings, RawSettings, SecretSettings};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub model: ModelSettings,
    pub analysis: AnalysisSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub request_timeout: Duration,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub sample_cap: usize,
    pub concurrency: usize,
    pub id_length: usize,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        let model = ModelSettings {
            base_url: raw.model.base_url,
            model: raw.model.model,
            temperature: raw.model.temperature,
            top_p: raw.model.top_p,
            request_timeout: Duration::from_secs(raw.model.request_timeout_seconds.max(1)),
        };
        let analysis = AnalysisSettings {
            sample_cap: raw.analysis.sample_cap.max(1),
            concurrency: raw.analysis.concurrency.max(1),
            id_length: raw.analysis.id_length.max(8),
        };

        Self {
            model,
            analysis,
            logging: raw.logging,
            secrets: raw.secrets,
        }
    }
}

impl AppSettings {
    /// The service credential, if one was configured.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        let key = self.secrets.api_key.trim();
        (!key.is_empty()).then(|| key.to_string())
    }
}
