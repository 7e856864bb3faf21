use snafu::Snafu;

use crate::ext::ExpandTabsExt;
use crate::structure::notation::{
    ASCII_BRANCH_GLYPHS, BRANCH_GLYPHS, HORIZONTAL_FILL, LineNotation, VERTICAL_GLYPHS,
};

/// Only valid as the root, where it stands for the base directory itself.
pub const CURRENT_DIRECTORY: &str = ".";
const COMMENT_MARKER: char = '#';
const DIRECTORY_SUFFIX: char = '/';
/// Columns per nesting level when a line has no branch token to measure.
const DEFAULT_COLUMN_WIDTH: usize = 4;

/// One meaningful input line reduced to its position in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub line_number: usize,
    pub depth: usize,
    pub name: String,
    pub is_directory: bool,
}

/// Stateless per-line decoder for one [`LineNotation`].
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier {
    notation: LineNotation,
    tab_width: usize,
    indent_width: usize,
}

impl LineClassifier {
    pub fn new(notation: LineNotation, tab_width: usize, indent_width: usize) -> Self {
        Self {
            notation,
            tab_width: tab_width.max(1),
            indent_width: indent_width.max(1),
        }
    }

    /// Returns `Ok(None)` for blank lines, comments, and spacer lines made
    /// only of vertical tree glyphs.
    pub fn classify(
        &self,
        line_number: usize,
        raw_line: &str,
    ) -> Result<Option<ClassifiedLine>, LineError> {
        let expanded = raw_line.expand_tabs(self.tab_width);
        let content = expanded.trim_start();
        if content.is_empty() || content.starts_with(COMMENT_MARKER) {
            return Ok(None);
        }

        let (depth, rest, needs_name) = match self.notation {
            LineNotation::Indentation => {
                let leading = expanded.chars().take_while(|c| c.is_whitespace()).count();
                (leading / self.indent_width, content, true)
            }
            LineNotation::TreeDrawing => {
                let prefix = scan_tree_prefix(&expanded);
                let rest = expanded[prefix.consumed..].trim_start_matches(|c: char| {
                    c.is_whitespace()
                        || VERTICAL_GLYPHS.contains(&c)
                        || BRANCH_GLYPHS.contains(&c)
                        || (c != '-' && HORIZONTAL_FILL.contains(&c))
                });
                (prefix.depth, rest, prefix.has_branch)
            }
        };

        let name = strip_inline_comment(strip_bullet(rest)).trim();
        if name.is_empty() && !needs_name {
            return Ok(None);
        }

        let (name, is_directory) = split_directory_suffix(name);
        validate_name(name)?;

        Ok(Some(ClassifiedLine {
            line_number,
            depth,
            name: name.to_string(),
            is_directory,
        }))
    }
}

struct TreePrefix {
    depth: usize,
    /// Byte offset where the name part begins.
    consumed: usize,
    has_branch: bool,
}

/// Consumes continuation and branch tokens from the start of `line`. A
/// branch token always ends the prefix.
///
/// One nesting level spans as many columns as the line's branch token
/// (glyph, fill and separating space), so `└─ ` drawings indent by three
/// columns and `└── ` drawings by four.
fn scan_tree_prefix(line: &str) -> TreePrefix {
    let chars = line.char_indices().map(|(_, c)| c).collect::<Vec<_>>();
    let offset_at = |index: usize| {
        line.char_indices()
            .nth(index)
            .map_or(line.len(), |(offset, _)| offset)
    };
    let column_width = branch_token_width(&chars).unwrap_or(DEFAULT_COLUMN_WIDTH);

    let mut index = 0;
    let mut depth = 0;
    loop {
        let spaces = chars[index..].iter().take_while(|c| **c == ' ').count();
        if spaces >= column_width {
            // Blank continuation below a finished branch
            depth += 1;
            index += column_width;
            continue;
        }

        let glyph_index = index + spaces;
        if let Some(fill) = branch_at(&chars, glyph_index) {
            return TreePrefix {
                depth: depth + 1,
                consumed: offset_at(glyph_index + 1 + fill),
                has_branch: true,
            };
        }

        match chars.get(glyph_index) {
            Some(glyph) if VERTICAL_GLYPHS.contains(glyph) || *glyph == '|' => {
                let padding = chars[glyph_index + 1..]
                    .iter()
                    .take(column_width - 1)
                    .take_while(|c| **c == ' ')
                    .count();
                depth += 1;
                index = glyph_index + 1 + padding;
            }
            _ => break,
        }
    }

    TreePrefix {
        depth,
        consumed: offset_at(index),
        has_branch: false,
    }
}

/// Returns the horizontal fill length when a branch token starts at `index`.
fn branch_at(chars: &[char], index: usize) -> Option<usize> {
    let glyph = *chars.get(index)?;
    let next = chars.get(index + 1).copied();
    let is_branch = BRANCH_GLYPHS.contains(&glyph)
        || (ASCII_BRANCH_GLYPHS.contains(&glyph) && next == Some('-'));
    if !is_branch {
        return None;
    }

    let fill = chars[index + 1..]
        .iter()
        .take_while(|c| HORIZONTAL_FILL.contains(c))
        .count();
    Some(fill)
}

/// Column width of the first branch token in the line's prefix, counting
/// one separating space after the fill.
fn branch_token_width(chars: &[char]) -> Option<usize> {
    let mut index = 0;
    while let Some(c) = chars.get(index) {
        if let Some(fill) = branch_at(chars, index) {
            return Some(fill + 2);
        }
        if *c != ' ' && !VERTICAL_GLYPHS.contains(c) && *c != '|' {
            return None;
        }
        index += 1;
    }
    None
}

/// Removes a leading run of `-` bullets and the whitespace after it, so
/// `- src/` and `-src/` both name `src`.
fn strip_bullet(text: &str) -> &str {
    text.trim_start_matches('-').trim_start()
}

/// Cuts the text at the first `#` that starts it or follows whitespace.
fn strip_inline_comment(text: &str) -> &str {
    let mut previous_is_space = true;
    for (offset, c) in text.char_indices() {
        if c == COMMENT_MARKER && previous_is_space {
            return &text[..offset];
        }
        previous_is_space = c.is_whitespace();
    }
    text
}

fn split_directory_suffix(name: &str) -> (&str, bool) {
    if name.ends_with(DIRECTORY_SUFFIX) {
        (name.trim_end_matches(DIRECTORY_SUFFIX).trim_end(), true)
    } else {
        (name, false)
    }
}

/// Checks that `name` can be used as a single path component.
pub fn validate_name(name: &str) -> Result<(), LineError> {
    if name.is_empty() {
        return Err(LineError::MissingName);
    }
    if name.contains(['/', '\\']) {
        return Err(LineError::NameWithSeparator {
            name: name.to_string(),
        });
    }
    if name == ".." {
        return Err(LineError::ReservedName {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum LineError {
    #[snafu(display("Entry has no name"))]
    MissingName,
    #[snafu(display("Name '{}' contains a path separator", name))]
    NameWithSeparator { name: String },
    #[snafu(display("'{}' cannot be used as an entry name", name))]
    ReservedName { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn indentation() -> LineClassifier {
        LineClassifier::new(LineNotation::Indentation, 4, 4)
    }

    fn tree() -> LineClassifier {
        LineClassifier::new(LineNotation::TreeDrawing, 4, 4)
    }

    fn entry(depth: usize, name: &str, is_directory: bool) -> Option<ClassifiedLine> {
        Some(ClassifiedLine {
            line_number: 1,
            depth,
            name: name.to_string(),
            is_directory,
        })
    }

    #[rstest]
    #[case("project/", entry(0, "project", true))]
    #[case("    src/", entry(1, "src", true))]
    #[case("        main.rs", entry(2, "main.rs", false))]
    #[case("    - README.md", entry(1, "README.md", false))]
    #[case("-docs/", entry(0, "docs", true))]
    #[case("    -src/", entry(1, "src", true))]
    #[case("        -main.py", entry(2, "main.py", false))]
    #[case("    -- notes.txt", entry(1, "notes.txt", false))]
    #[case("      six_spaces.txt", entry(1, "six_spaces.txt", false))]
    #[case("\tsrc/", entry(1, "src", true))]
    #[case("\t\tlib.rs", entry(2, "lib.rs", false))]
    #[case("    main.rs   # entry point", entry(1, "main.rs", false))]
    #[case("    issue#12.md", entry(1, "issue#12.md", false))]
    #[case("    my file.txt  ", entry(1, "my file.txt", false))]
    #[case("    build//", entry(1, "build", true))]
    fn test_indentation_lines(#[case] line: &str, #[case] expected: Option<ClassifiedLine>) {
        assert_eq!(indentation().classify(1, line).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("      ")]
    #[case("# a comment")]
    #[case("    # indented comment")]
    #[case("\t")]
    fn test_skipped_lines(#[case] line: &str) {
        assert_eq!(indentation().classify(1, line).unwrap(), None);
        assert_eq!(tree().classify(1, line).unwrap(), None);
    }

    #[rstest]
    #[case("project/", entry(0, "project", true))]
    #[case("├── src/", entry(1, "src", true))]
    #[case("│   └── main.ext", entry(2, "main.ext", false))]
    #[case("└── README.md", entry(1, "README.md", false))]
    #[case("    └── deep.rs", entry(2, "deep.rs", false))]
    #[case("│   │       └── x", entry(4, "x", false))]
    #[case("|-- src/", entry(1, "src", true))]
    #[case("|   `-- main.rs", entry(2, "main.rs", false))]
    #[case("+-- lib/", entry(1, "lib", true))]
    #[case("┣━━ bold.txt", entry(1, "bold.txt", false))]
    #[case("├─ short.txt", entry(1, "short.txt", false))]
    #[case("├──src", entry(1, "src", false))]
    #[case("├── main.rs  # entry point", entry(1, "main.rs", false))]
    #[case("├── - bullet.md", entry(1, "bullet.md", false))]
    #[case("│   ├── my-file.txt", entry(2, "my-file.txt", false))]
    #[case("  ├── indented.txt", entry(1, "indented.txt", false))]
    #[case("├─ a", entry(1, "a", false))]
    #[case("   └─ c", entry(2, "c", false))]
    #[case("│  └─ x", entry(2, "x", false))]
    #[case("│     └─ y", entry(3, "y", false))]
    #[case("      └─ z", entry(3, "z", false))]
    #[case("        `-- old", entry(3, "old", false))]
    #[case("    nested/", entry(1, "nested", true))]
    fn test_tree_drawing_lines(#[case] line: &str, #[case] expected: Option<ClassifiedLine>) {
        assert_eq!(tree().classify(1, line).unwrap(), expected);
    }

    #[rstest]
    #[case("│")]
    #[case("│   │")]
    #[case("|")]
    #[case("│   # note")]
    fn test_tree_spacer_lines_are_skipped(#[case] line: &str) {
        assert_eq!(tree().classify(1, line).unwrap(), None);
    }

    #[rstest]
    #[case("├──")]
    #[case("│   └── ")]
    #[case("├── /")]
    #[case("`--")]
    fn test_branch_without_name_is_an_error(#[case] line: &str) {
        assert_eq!(tree().classify(1, line), Err(LineError::MissingName));
    }

    #[rstest]
    #[case("    src/utils/", LineError::NameWithSeparator { name: "src/utils".into() })]
    #[case("    a\\b.txt", LineError::NameWithSeparator { name: "a\\b.txt".into() })]
    #[case("    ../", LineError::ReservedName { name: "..".into() })]
    #[case("    ..", LineError::ReservedName { name: "..".into() })]
    #[case("    - ", LineError::MissingName)]
    fn test_invalid_names(#[case] line: &str, #[case] expected: LineError) {
        assert_eq!(indentation().classify(1, line), Err(expected));
    }

    #[test]
    fn test_current_directory_is_left_to_the_builder() {
        assert_eq!(tree().classify(1, ".").unwrap(), entry(0, ".", false));
    }

    #[test]
    fn test_custom_indent_width() {
        let classifier = LineClassifier::new(LineNotation::Indentation, 4, 2);
        let line = classifier.classify(7, "    lib.rs").unwrap().unwrap();
        assert_eq!(line.depth, 2);
        assert_eq!(line.line_number, 7);
    }

    #[test]
    fn test_line_error_display() {
        let error = LineError::NameWithSeparator {
            name: "a/b".to_string(),
        };
        assert_eq!(error.to_string(), "Name 'a/b' contains a path separator");
        assert_eq!(LineError::MissingName.to_string(), "Entry has no name");
    }
}
