//! Core types for smartmedia.

mod classification;
mod file;
mod result;

pub use classification::*;
pub use file::*;
pub use result::*;
