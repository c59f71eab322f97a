#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
mod asset_analysis;
mod report;

pub use asset_analysis::*;
pub use report::*;
