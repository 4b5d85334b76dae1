//! Report module - text rendering, parsing and file export.

mod export;
mod text;

pub use export::*;
pub use text::*;
