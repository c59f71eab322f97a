use crate::{InlineImage, ModelResult, ResponseSchema, VisionModelClient};
use async_trait::async_trait;

/// A remote model that answers a prompt (optionally with images) with text conforming to a
/// JSON schema.
#[async_trait]
pub trait StructuredGeneration: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        images: &[InlineImage],
        schema: ResponseSchema,
    ) -> ModelResult<String>;
}

#[async_trait]
impl StructuredGeneration for VisionModelClient {
    async fn generate(
        &self,
        prompt: &str,
        images: &[InlineImage],
        schema: ResponseSchema,
    ) -> ModelResult<String> {
        self.chat(prompt).images(images).schema(schema).call().await
    }
}
