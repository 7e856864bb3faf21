use colored::Colorize;

use crate::filesystem::FilesystemNode;

const BRANCH: &str = "├── ";
const CORNER: &str = "└── ";
const CONTINUATION: &str = "│   ";
const BLANK: &str = "    ";

/// Renders the tree in box-drawing notation, one entry per line, with a
/// trailing `/` on directories. The output parses back to the same tree.
pub fn render_tree(root: &FilesystemNode, styled: bool) -> String {
    let mut output = String::new();
    // For each ancestor level below the root: does it still have siblings
    // to print?
    let mut open_levels: Vec<bool> = Vec::new();

    for entry in root.walk() {
        if entry.depth > 0 {
            open_levels.truncate(entry.depth - 1);
            for has_more in &open_levels {
                output.push_str(if *has_more { CONTINUATION } else { BLANK });
            }
            output.push_str(if entry.is_last { CORNER } else { BRANCH });
            open_levels.push(!entry.is_last);
        }

        output.push_str(&label(entry.node, styled));
        output.push('\n');
    }

    output
}

fn label(node: &FilesystemNode, styled: bool) -> String {
    match (node.is_directory(), styled) {
        (true, true) => format!("{}/", node.name()).blue().bold().to_string(),
        (true, false) => format!("{}/", node.name()),
        (false, _) => node.name().to_string(),
    }
}
