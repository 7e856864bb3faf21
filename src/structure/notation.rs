use std::path::Path;

use clap::ValueEnum;
use derive_more::Display;

/// Glyphs that only appear in box-drawing tree diagrams.
pub(crate) const VERTICAL_GLYPHS: &[char] = &['│', '┃', '║'];
pub(crate) const BRANCH_GLYPHS: &[char] = &['├', '└', '┣', '┗', '╠', '╚'];
pub(crate) const HORIZONTAL_FILL: &[char] = &['─', '━', '═', '-'];
/// ASCII characters that start a branch when followed by `-`.
pub(crate) const ASCII_BRANCH_GLYPHS: &[char] = &['|', '+', '`'];

const DICTIONARY_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// The notation requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Notation {
    #[default]
    Auto,
    Indentation,
    #[value(name = "tree")]
    TreeDrawing,
    Dictionary,
}

/// Line-oriented notations understood by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LineNotation {
    #[display("indentation")]
    Indentation,
    #[display("tree-drawing")]
    TreeDrawing,
}

/// What the parser should do with a given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Lines(LineNotation),
    Dictionary,
}

impl Notation {
    /// Resolves `Auto` by looking at the source file extension first and
    /// the text second.
    pub fn resolve(self, source: Option<&Path>, text: &str) -> InputFormat {
        match self {
            Notation::Indentation => InputFormat::Lines(LineNotation::Indentation),
            Notation::TreeDrawing => InputFormat::Lines(LineNotation::TreeDrawing),
            Notation::Dictionary => InputFormat::Dictionary,
            Notation::Auto => {
                if source.is_some_and(has_dictionary_extension) {
                    InputFormat::Dictionary
                } else {
                    InputFormat::Lines(detect_line_notation(text))
                }
            }
        }
    }
}

fn has_dictionary_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DICTIONARY_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Picks tree-drawing notation when any line carries a box-drawing glyph or
/// starts with an ASCII branch such as `|--` or `` `-- ``.
pub fn detect_line_notation(text: &str) -> LineNotation {
    let is_tree = text.lines().any(|line| {
        line.chars()
            .any(|c| VERTICAL_GLYPHS.contains(&c) || BRANCH_GLYPHS.contains(&c))
            || starts_with_ascii_branch(line)
    });

    if is_tree {
        LineNotation::TreeDrawing
    } else {
        LineNotation::Indentation
    }
}

fn starts_with_ascii_branch(line: &str) -> bool {
    let mut rest = line.trim_start();
    // Skip ASCII continuation columns such as "|   "
    while let Some(after) = rest.strip_prefix('|') {
        if after.starts_with('-') {
            return true;
        }
        rest = after.trim_start();
    }
    let mut chars = rest.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(glyph), Some('-')) if ASCII_BRANCH_GLYPHS.contains(&glyph)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("project/\n├── src/\n│   └── main.rs\n", LineNotation::TreeDrawing)]
    #[case("project/\n|-- src/\n|   `-- main.rs\n", LineNotation::TreeDrawing)]
    #[case("project/\n+-- src/\n", LineNotation::TreeDrawing)]
    #[case("project/\n    src/\n        main.rs\n", LineNotation::Indentation)]
    #[case("project/\n    - src/\n        - main.rs\n", LineNotation::Indentation)]
    #[case("project/\n    my-file.txt\n", LineNotation::Indentation)]
    #[case("", LineNotation::Indentation)]
    fn test_detect_line_notation(#[case] text: &str, #[case] expected: LineNotation) {
        assert_eq!(detect_line_notation(text), expected);
    }

    #[rstest]
    #[case("structure.json", InputFormat::Dictionary)]
    #[case("structure.YAML", InputFormat::Dictionary)]
    #[case("structure.yml", InputFormat::Dictionary)]
    #[case("structure.txt", InputFormat::Lines(LineNotation::Indentation))]
    fn test_auto_uses_extension(#[case] path: &str, #[case] expected: InputFormat) {
        let format = Notation::Auto.resolve(Some(Path::new(path)), "project/\n    a.txt\n");
        assert_eq!(format, expected);
    }

    #[test]
    fn test_explicit_notation_overrides_detection() {
        let text = "project/\n├── src/\n";
        assert_eq!(
            Notation::Indentation.resolve(None, text),
            InputFormat::Lines(LineNotation::Indentation)
        );
        assert_eq!(
            Notation::Dictionary.resolve(Some(Path::new("x.txt")), text),
            InputFormat::Dictionary
        );
    }
}
