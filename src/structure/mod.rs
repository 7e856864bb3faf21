//! Parsing of human-written structure descriptions.
//!
//! Line-based inputs (indentation or tree-drawing) go through the
//! `LineClassifier` and then the stack-based tree builder. Dictionary
//! inputs (YAML or JSON) are read directly into a tree.

mod dictionary;
mod line_classifier;
mod notation;
mod parser;
mod tree_builder;

pub use line_classifier::{CURRENT_DIRECTORY, ClassifiedLine, LineError, validate_name};
pub use notation::Notation;
pub use parser::{MalformedStructure, ParseOptions, StructureParser};

#[cfg(test)]
pub use dictionary::read_dictionary;
#[cfg(test)]
pub use notation::LineNotation;
