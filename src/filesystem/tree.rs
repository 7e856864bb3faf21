use derive_more::Display;

use crate::filesystem::Walk;

/// Represents the type of a filesystem node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeKind {
    #[display("directory")]
    Directory,
    #[display("file")]
    File,
}

/// One entry of a parsed structure. Directories own their children in
/// input order; files carry an optional literal payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesystemNode {
    name: String,
    kind: NodeKind,
    children: Vec<FilesystemNode>,
    content: String,
}

impl FilesystemNode {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            children: Vec::new(),
            content: String::new(),
        }
    }

    pub fn directory_with_children(name: impl Into<String>, children: Vec<FilesystemNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            children,
            content: String::new(),
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::file_with_content(name, String::new())
    }

    pub fn file_with_content(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn children(&self) -> &[FilesystemNode] {
        &self.children
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Pre-order traversal driven by an explicit work stack.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }
}

// Unwinds children iteratively so dropping a very deep tree cannot
// overflow the stack.
impl Drop for FilesystemNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
