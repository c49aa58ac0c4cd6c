//! Document reading and display shaping.

mod processor;
mod shaping;

pub use processor::{DocumentOptions, DocumentProcessor};
pub use shaping::{shape, shape_content, ShapedContent, CSV_PREVIEW_LINES};
