#![deny(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

mod api;
mod inline_image;
mod structured;

pub use api::*;
pub use inline_image::InlineImage;
pub use structured::StructuredGeneration;
