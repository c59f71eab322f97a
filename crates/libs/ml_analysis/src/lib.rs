#![deny(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

mod aggregator;
mod analyzer;
mod encoder;
mod error;
mod run;
mod sampler;
mod synthesizer;
mod utils;

#[cfg(test)]
mod test_utils;

pub use aggregator::{RECOMMENDATIONS, aggregate};
pub use analyzer::analyze_asset;
pub use encoder::encode_asset;
pub use error::*;
pub use run::{AnalysisRun, RunOptions, RunPhase, RunStatus};
pub use sampler::{DEFAULT_SAMPLE_CAP, sample_batch};
pub use synthesizer::{CORE_FEATURE_COUNT, synthesize_collection};
pub use utils::nice_id;
