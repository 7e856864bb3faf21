//! Projections of a parsed tree: the box-drawing preview shown before
//! creation and the JSON mapping written by `--json`.

mod json;
mod preview;

pub use json::{ExportError, to_json, write_json};
pub use preview::render_tree;
