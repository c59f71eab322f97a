use crate::{AnalysisOutcome, AssetAnalysisError};
use language_model::InlineImage;
use std::path::Path;

/// Read an uploaded asset and turn it into an inline `data:` URL.
pub async fn encode_asset(path: &Path) -> AnalysisOutcome<InlineImage> {
    InlineImage::from_path(path)
        .await
        .map_err(|source| AssetAnalysisError::Encoding {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreadable_asset_is_encoding_error() {
        let result = encode_asset(Path::new("/no/such/upload.png")).await;
        match result {
            Err(AssetAnalysisError::Encoding { path, .. }) => {
                assert_eq!(path, Path::new("/no/such/upload.png"));
            }
            other => panic!("expected encoding error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_asset_is_encoded_as_data_url() -> color_eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sprite.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G', 1, 2, 3])?;

        let image = encode_asset(&path).await?;

        assert_eq!(image.mime_type(), "image/png");
        assert!(image.data_url().starts_with("data:image/png;base64,"));
        Ok(())
    }
}
