use std::collections::HashSet;

use snafu::Snafu;
use tracing::trace;

use crate::filesystem::FilesystemNode;
use crate::structure::{CURRENT_DIRECTORY, ClassifiedLine};

/// Builds a tree from classified lines, attaching every line to the nearest
/// open directory whose depth is strictly smaller than its own.
///
/// The first line becomes the root and is always a directory; a root named
/// `.` stands for the base directory itself. Equal depth
/// means sibling; a deeper line following a file attaches to the file's
/// closest open directory. Two siblings may not share a name.
pub fn build(lines: impl IntoIterator<Item = ClassifiedLine>) -> Result<FilesystemNode, BuildError> {
    let mut lines = lines.into_iter();
    let first = lines.next().ok_or(BuildError::MissingRoot)?;
    trace!("Root '{}' at depth {}", first.name, first.depth);

    let mut stack = AncestorStack::new(first.name, first.depth);
    for line in lines {
        if line.name == CURRENT_DIRECTORY {
            return Err(BuildError::CurrentDirectoryEntry {
                line_number: line.line_number,
            });
        }
        if !stack.close_to(line.depth) {
            return Err(BuildError::OrphanedEntry {
                line_number: line.line_number,
                name: line.name,
            });
        }
        if !stack.claim(&line.name) {
            return Err(BuildError::DuplicateEntry {
                line_number: line.line_number,
                parent: stack.top_name().to_string(),
                name: line.name,
            });
        }

        if line.is_directory {
            stack.open(line.name, line.depth);
        } else {
            stack.attach(FilesystemNode::file(line.name));
        }
    }

    Ok(stack.finish())
}

struct OpenDirectory {
    name: String,
    depth: usize,
    child_names: HashSet<String>,
    children: Vec<FilesystemNode>,
}

impl OpenDirectory {
    fn new(name: String, depth: usize) -> Self {
        Self {
            name,
            depth,
            child_names: HashSet::new(),
            children: Vec::new(),
        }
    }

    fn into_node(self) -> FilesystemNode {
        FilesystemNode::directory_with_children(self.name, self.children)
    }
}

/// Directories that can still receive children, innermost last. Depth is
/// strictly increasing from the root upwards.
struct AncestorStack {
    root: OpenDirectory,
    open: Vec<OpenDirectory>,
}

impl AncestorStack {
    fn new(root_name: String, root_depth: usize) -> Self {
        Self {
            root: OpenDirectory::new(root_name, root_depth),
            open: Vec::new(),
        }
    }

    fn top_mut(&mut self) -> &mut OpenDirectory {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    fn top_name(&self) -> &str {
        &self.open.last().unwrap_or(&self.root).name
    }

    /// Reserves `name` in the innermost open directory. Returns `false` if a
    /// sibling already uses it.
    fn claim(&mut self, name: &str) -> bool {
        self.top_mut().child_names.insert(name.to_string())
    }

    /// Closes every open directory at `depth` or deeper. Returns `false`
    /// when even the root cannot parent an entry at `depth`.
    fn close_to(&mut self, depth: usize) -> bool {
        while self.open.last().is_some_and(|top| top.depth >= depth) {
            self.close_top();
        }
        self.root.depth < depth
    }

    fn close_top(&mut self) {
        if let Some(closed) = self.open.pop() {
            let node = closed.into_node();
            self.top_mut().children.push(node);
        }
    }

    fn open(&mut self, name: String, depth: usize) {
        self.open.push(OpenDirectory::new(name, depth));
    }

    fn attach(&mut self, node: FilesystemNode) {
        self.top_mut().children.push(node);
    }

    fn finish(mut self) -> FilesystemNode {
        while !self.open.is_empty() {
            self.close_top();
        }
        self.root.into_node()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum BuildError {
    #[snafu(display("No root entry found; the input has no meaningful lines"))]
    MissingRoot,
    #[snafu(display(
        "Line {}: '{}' is not nested under the root entry",
        line_number,
        name
    ))]
    OrphanedEntry { line_number: usize, name: String },
    #[snafu(display(
        "Line {}: '{}' appears more than once in '{}'",
        line_number,
        name,
        parent
    ))]
    DuplicateEntry {
        line_number: usize,
        name: String,
        parent: String,
    },
    #[snafu(display("Line {}: '.' can only be used as the root entry", line_number))]
    CurrentDirectoryEntry { line_number: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::NodeKind;

    fn line(depth: usize, name: &str) -> ClassifiedLine {
        let is_directory = name.ends_with('/');
        ClassifiedLine {
            line_number: 0,
            depth,
            name: name.trim_end_matches('/').to_string(),
            is_directory,
        }
    }

    fn numbered(lines: Vec<ClassifiedLine>) -> Vec<ClassifiedLine> {
        lines
            .into_iter()
            .enumerate()
            .map(|(i, mut l)| {
                l.line_number = i + 1;
                l
            })
            .collect()
    }

    fn shape(node: &FilesystemNode) -> Vec<String> {
        node.walk()
            .map(|e| {
                let suffix = if e.node.is_directory() { "/" } else { "" };
                format!("{}{}", e.path.display(), suffix)
            })
            .collect()
    }

    #[test]
    fn test_builds_nested_tree_in_input_order() {
        let root = build(numbered(vec![
            line(0, "project/"),
            line(1, "src/"),
            line(2, "main.ext"),
            line(1, "README.md"),
        ]))
        .unwrap();

        assert_eq!(
            shape(&root),
            vec![
                "project/",
                "project/src/",
                "project/src/main.ext",
                "project/README.md",
            ]
        );
    }

    #[test]
    fn test_equal_depth_is_always_sibling() {
        let root = build(numbered(vec![
            line(0, "project/"),
            line(1, "src/"),
            line(1, "src_utils/"),
            line(2, "helpers.rs"),
        ]))
        .unwrap();

        assert_eq!(
            shape(&root),
            vec![
                "project/",
                "project/src/",
                "project/src_utils/",
                "project/src_utils/helpers.rs",
            ]
        );
    }

    #[test]
    fn test_closing_multiple_levels_at_once() {
        let root = build(numbered(vec![
            line(0, "p/"),
            line(1, "a/"),
            line(2, "b/"),
            line(3, "c.txt"),
            line(1, "d.txt"),
        ]))
        .unwrap();

        assert_eq!(
            shape(&root),
            vec!["p/", "p/a/", "p/a/b/", "p/a/b/c.txt", "p/d.txt"]
        );
    }

    #[test]
    fn test_depth_jumps_attach_to_nearest_ancestor() {
        let root = build(numbered(vec![
            line(0, "p/"),
            line(3, "far/"),
            line(7, "deep.txt"),
            line(2, "mid.txt"),
        ]))
        .unwrap();

        assert_eq!(
            shape(&root),
            vec!["p/", "p/far/", "p/far/deep.txt", "p/mid.txt"]
        );
    }

    #[test]
    fn test_file_never_gains_children() {
        let root = build(numbered(vec![
            line(0, "p/"),
            line(1, "notes.txt"),
            line(2, "inner.txt"),
        ]))
        .unwrap();

        assert_eq!(shape(&root), vec!["p/", "p/notes.txt", "p/inner.txt"]);
        assert!(root.children()[0].children().is_empty());
    }

    #[test]
    fn test_root_is_always_a_directory() {
        let root = build(numbered(vec![line(0, "project")])).unwrap();
        assert_eq!(root.kind(), NodeKind::Directory);
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_dot_root_with_children() {
        let root = build(numbered(vec![line(0, "."), line(1, "src/"), line(2, "main.rs")])).unwrap();

        assert_eq!(shape(&root), vec!["./", "./src/", "./src/main.rs"]);
    }

    #[test]
    fn test_dot_below_root_is_rejected() {
        let result = build(numbered(vec![line(0, "p/"), line(1, ".")]));
        assert_eq!(
            result,
            Err(BuildError::CurrentDirectoryEntry { line_number: 2 })
        );
    }

    #[test]
    fn test_duplicate_sibling_is_rejected() {
        let result = build(numbered(vec![
            line(0, "p/"),
            line(1, "a.txt"),
            line(1, "src/"),
            line(1, "a.txt"),
        ]));

        assert_eq!(
            result,
            Err(BuildError::DuplicateEntry {
                line_number: 4,
                name: "a.txt".to_string(),
                parent: "p".to_string(),
            })
        );
    }

    #[test]
    fn test_file_and_directory_with_same_name_collide() {
        let result = build(numbered(vec![
            line(0, "p/"),
            line(1, "src/"),
            line(2, "build"),
            line(2, "build/"),
        ]));

        assert!(matches!(
            result,
            Err(BuildError::DuplicateEntry { line_number: 4, ref parent, .. }) if parent == "src"
        ));
    }

    #[test]
    fn test_same_name_under_different_parents_is_allowed() {
        let root = build(numbered(vec![
            line(0, "p/"),
            line(1, "a/"),
            line(2, "mod.rs"),
            line(1, "b/"),
            line(2, "mod.rs"),
        ]))
        .unwrap();

        assert_eq!(
            shape(&root),
            vec!["p/", "p/a/", "p/a/mod.rs", "p/b/", "p/b/mod.rs"]
        );
    }

    #[test]
    fn test_empty_input_has_no_root() {
        assert_eq!(build(Vec::new()), Err(BuildError::MissingRoot));
    }

    #[test]
    fn test_second_top_level_entry_is_orphaned() {
        let result = build(numbered(vec![
            line(0, "project/"),
            line(1, "a.txt"),
            line(0, "other/"),
            line(1, "b.txt"),
        ]));

        assert_eq!(
            result,
            Err(BuildError::OrphanedEntry {
                line_number: 3,
                name: "other".to_string()
            })
        );
    }

    #[test]
    fn test_entry_shallower_than_indented_root_is_orphaned() {
        let result = build(numbered(vec![line(2, "project/"), line(1, "a.txt")]));
        assert!(matches!(result, Err(BuildError::OrphanedEntry { .. })));
    }

    #[test]
    fn test_empty_directories_are_kept() {
        let root = build(numbered(vec![
            line(0, "p/"),
            line(1, "empty/"),
            line(1, "full/"),
            line(2, "x"),
        ]))
        .unwrap();

        assert!(root.children()[0].is_directory());
        assert!(root.children()[0].children().is_empty());
        assert_eq!(root.children()[1].children().len(), 1);
    }
}
