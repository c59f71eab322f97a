use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub model: RawModelSettings,
    pub analysis: RawAnalysisSettings,
    pub logging: LoggingSettings,
    #[serde(default)]
    pub secrets: SecretSettings,
}

/// Where and how to reach the remote vision-language model.
#[derive(Debug, Deserialize, Clone)]
pub struct RawModelSettings {
    /// Root of an OpenAI-compatible API, without the `/v1/...` suffix.
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    /// Upper bound for a single request, connect to last byte.
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawAnalysisSettings {
    /// Maximum number of uploaded assets sent to the model per run.
    pub sample_cap: usize,
    /// How many per-asset requests may be in flight at once. 1 = strictly sequential.
    pub concurrency: usize,
    /// Length of the generated `id` of an analysis result.
    pub id_length: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SecretSettings {
    #[serde(default)]
    pub api_key: String,
}
