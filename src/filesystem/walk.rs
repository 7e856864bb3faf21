use std::path::PathBuf;

use crate::filesystem::FilesystemNode;

/// A node visited by [`Walk`], with its position in the tree.
#[derive(Debug, Clone)]
pub struct WalkEntry<'a> {
    pub node: &'a FilesystemNode,
    /// Path relative to the tree's parent, starting with the root's name.
    pub path: PathBuf,
    pub depth: usize,
    pub is_last: bool,
}

/// Pre-order iterator over a [`FilesystemNode`] tree.
///
/// Uses a heap-allocated work stack so arbitrarily deep hierarchies never
/// hit the call-stack limit.
pub struct Walk<'a> {
    stack: Vec<WalkEntry<'a>>,
}

impl<'a> Walk<'a> {
    pub fn new(root: &'a FilesystemNode) -> Self {
        Self {
            stack: vec![WalkEntry {
                node: root,
                path: PathBuf::from(root.name()),
                depth: 0,
                is_last: true,
            }],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = WalkEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pop()?;

        // Reversed so the first child is popped next
        let children = entry.node.children();
        for (index, child) in children.iter().enumerate().rev() {
            self.stack.push(WalkEntry {
                node: child,
                path: entry.path.join(child.name()),
                depth: entry.depth + 1,
                is_last: index + 1 == children.len(),
            });
        }

        Some(entry)
    }
}
