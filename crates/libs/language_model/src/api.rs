use crate::InlineImage;
use bon::bon;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API error (status {status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Model response contained no message content")]
    EmptyResponse,
}

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Message {
    pub role: String,
    pub content: MessageContent,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<MessagePart>),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum MessagePart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ImageUrl {
    pub url: String,
}

/// A named JSON schema the model output has to conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: Value,
}

impl ResponseSchema {
    #[must_use]
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: String,
    schema: Value,
    // Strict mode would force every property into `required`.
    strict: bool,
}

impl From<ResponseSchema> for ResponseFormat {
    fn from(schema: ResponseSchema) -> Self {
        Self {
            kind: "json_schema",
            json_schema: JsonSchemaFormat {
                name: schema.name,
                schema: schema.schema,
                strict: false,
            },
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Deserialize)]
pub struct ChatFullResponse {
    pub choices: Vec<FullChoice>,
}

#[derive(Deserialize)]
pub struct FullChoice {
    pub message: FullMessage,
}

#[derive(Deserialize)]
pub struct FullMessage {
    pub content: Option<String>,
}

/// Used when the builder is given no `timeout`.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Clone, Debug)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
}

/// Client for an OpenAI-compatible multimodal chat completions endpoint.
#[derive(Clone)]
pub struct VisionModelClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    config: SamplingConfig,
}

#[bon]
impl VisionModelClient {
    /// Build a client. `timeout` bounds every request made through it, from connect to the
    /// last byte of the response body, and defaults to [`DEFAULT_REQUEST_TIMEOUT`].
    #[builder(start_fn = with_base_url)]
    pub fn new(
        #[builder(start_fn)] base_url: &str,
        model: Option<String>,
        api_key: Option<String>,
        temperature: Option<f32>,
        top_p: Option<f32>,
        timeout: Option<Duration>,
    ) -> ModelResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.unwrap_or_default(),
            api_key: api_key.filter(|key| !key.is_empty()),
            config: SamplingConfig {
                temperature: temperature.unwrap_or(0.4),
                top_p: top_p.unwrap_or(0.9),
            },
        })
    }

    #[must_use]
    pub fn prepare_message(prompt: &str, images: &[InlineImage]) -> Message {
        let mut parts = vec![MessagePart::Text {
            text: prompt.to_string(),
        }];
        for image in images {
            parts.push(MessagePart::ImageUrl {
                image_url: ImageUrl {
                    url: image.data_url().to_string(),
                },
            });
        }
        Message {
            role: "user".to_string(),
            content: MessageContent::Parts(parts),
        }
    }

    #[builder]
    pub async fn chat(
        &self,
        #[builder(start_fn)] prompt: &str,
        images: Option<&[InlineImage]>,
        schema: Option<ResponseSchema>,
    ) -> ModelResult<String> {
        let msg = Self::prepare_message(prompt, images.unwrap_or_default());
        self.call(vec![msg], schema).await
    }

    pub async fn call(
        &self,
        messages: Vec<Message>,
        schema: Option<ResponseSchema>,
    ) -> ModelResult<String> {
        let req_body = self.build_request(messages, schema);
        let url = format!("{}/v1/chat/completions", self.base_url);
        let mut request = self.http.post(url).json(&req_body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ModelError::Api {
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }
        let body = response.text().await?;
        debug!("Model responded with {} bytes", body.len());
        let full: ChatFullResponse = serde_json::from_str(&body)?;
        full.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ModelError::EmptyResponse)
    }

    fn build_request(&self, messages: Vec<Message>, schema: Option<ResponseSchema>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            response_format: schema.map(Into::into),
        }
    }
}
