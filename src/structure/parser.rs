use std::path::Path;

use snafu::prelude::*;
use tracing::debug;

use crate::filesystem::FilesystemNode;
use crate::structure::dictionary::{DictionaryError, read_dictionary};
use crate::structure::line_classifier::{LineClassifier, LineError};
use crate::structure::notation::{InputFormat, LineNotation, Notation};
use crate::structure::tree_builder::{BuildError, build};

const DEFAULT_TAB_WIDTH: usize = 4;
const DEFAULT_INDENT_WIDTH: usize = 4;
const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub notation: Notation,
    pub tab_width: usize,
    pub indent_width: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            notation: Notation::Auto,
            tab_width: DEFAULT_TAB_WIDTH,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

/// Turns a structure description into a single rooted tree. Parsing is
/// all-or-nothing: any malformed line aborts without a partial tree.
#[derive(Debug, Clone, Default)]
pub struct StructureParser {
    options: ParseOptions,
}

impl StructureParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// `source` is only consulted to auto-detect dictionary files by
    /// extension.
    pub fn parse(
        &self,
        text: &str,
        source: Option<&Path>,
    ) -> Result<FilesystemNode, MalformedStructure> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);

        match self.options.notation.resolve(source, text) {
            InputFormat::Lines(notation) => self.parse_lines(text, notation),
            InputFormat::Dictionary => {
                debug!("Parsing structure as a dictionary");
                read_dictionary(text).context(DictionarySnafu)
            }
        }
    }

    pub fn parse_lines(
        &self,
        text: &str,
        notation: LineNotation,
    ) -> Result<FilesystemNode, MalformedStructure> {
        debug!("Parsing structure using {} notation", notation);
        let classifier =
            LineClassifier::new(notation, self.options.tab_width, self.options.indent_width);

        let mut lines = Vec::new();
        for (index, raw_line) in text.lines().enumerate() {
            let line_number = index + 1;
            let classified = classifier
                .classify(line_number, raw_line)
                .context(LineSnafu {
                    line_number,
                    line: raw_line,
                })?;
            lines.extend(classified);
        }
        debug!("Classified {} meaningful lines", lines.len());

        build(lines).context(TreeSnafu)
    }
}

/// A structural violation found while parsing. Raised before anything
/// touches the filesystem.
#[derive(Debug, Snafu)]
pub enum MalformedStructure {
    #[snafu(display("Malformed structure at line {}: '{}'", line_number, line))]
    Line {
        line_number: usize,
        line: String,
        source: LineError,
    },
    #[snafu(display("Malformed structure"))]
    Tree { source: BuildError },
    #[snafu(display("Malformed structure dictionary"))]
    Dictionary { source: DictionaryError },
}
