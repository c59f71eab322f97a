use crate::ModelResult;
use base64::{Engine as _, engine::general_purpose};
use std::path::Path;
use tokio::fs;

const FALLBACK_MIME_TYPE: &str = "image/jpeg";

/// An image embedded as a `data:` URL, ready to be placed in a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    mime_type: String,
    data_url: String,
}

impl InlineImage {
    /// Read an image from disk and encode it.
    ///
    /// The media type comes from the file's magic bytes, then its extension, then falls back
    /// to `image/jpeg`.
    pub async fn from_path(path: &Path) -> ModelResult<Self> {
        let bytes = fs::read(path).await?;
        let by_extension = mime_guess::from_path(path)
            .first_raw()
            .filter(|mime| mime.starts_with("image/"));
        Ok(Self::encode(&bytes, by_extension))
    }

    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::encode(bytes, None)
    }

    fn encode(bytes: &[u8], fallback: Option<&str>) -> Self {
        let mime_type = infer::get(bytes)
            .map(|kind| kind.mime_type())
            .or(fallback)
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_string();
        let b64 = general_purpose::STANDARD.encode(bytes);
        let data_url = format!("data:{mime_type};base64,{b64}");
        Self {
            mime_type,
            data_url,
        }
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    #[must_use]
    pub fn into_data_url(self) -> String {
        self.data_url
    }
}
