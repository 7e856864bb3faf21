//! Filesystem tree representation and its materialization on disk.
//!
//! A [`FilesystemNode`] tree is produced by the structure parser, walked
//! iteratively for previews and exports, and handed to a `Materializer`
//! which creates each entry independently.

mod materializer;
#[cfg(test)]
mod scanner;
mod tree;
mod walk;

pub use materializer::{FsMaterializer, MaterializationReport, materialize};
#[cfg(test)]
pub use scanner::scan_directory;
pub use tree::{FilesystemNode, NodeKind};
pub use walk::Walk;
