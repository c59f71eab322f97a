use crate::{AnalysisOutcome, AssetAnalysisError};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Generate a URL-safe random ID of a given length.
#[must_use]
pub fn nice_id(length: usize) -> String {
    const URL_SAFE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_";
    (0..length)
        .map(|_| URL_SAFE[fastrand::usize(..URL_SAFE.len())] as char)
        .collect()
}

/// Models sometimes wrap json output in a markdown code fence, even when asked for a schema.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    match inner.split_once('\n') {
        Some((tag, body)) if !tag.trim_start().starts_with(['{', '[']) => body.trim(),
        _ => inner.trim(),
    }
}

/// Parse a structured model response, mapping any mismatch to `ResponseFormat`.
pub(crate) fn parse_structured<T: DeserializeOwned>(response: &str) -> AnalysisOutcome<T> {
    serde_json::from_str::<T>(strip_code_fence(response)).map_err(|e| {
        warn!("Model output did not match schema: {e}. Raw output: {response}");
        AssetAnalysisError::ResponseFormat(e.to_string())
    })
}
