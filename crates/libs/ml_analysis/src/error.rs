use language_model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Ways a single asset (or the collection summary) can fail. None of them abort a run.
#[derive(Error, Debug)]
pub enum AssetAnalysisError {
    #[error("Could not read asset {}: {source}", .path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
    #[error("Remote model call failed: {0}")]
    RemoteService(#[source] ModelError),
    #[error("Model response did not match the expected schema: {0}")]
    ResponseFormat(String),
    #[error("Cannot summarize a collection without analysis results")]
    EmptyCollection,
}

impl From<ModelError> for AssetAnalysisError {
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::Json(e) => Self::ResponseFormat(e.to_string()),
            ModelError::EmptyResponse => Self::ResponseFormat(error.to_string()),
            other => Self::RemoteService(other),
        }
    }
}

pub type AnalysisOutcome<T> = Result<T, AssetAnalysisError>;
