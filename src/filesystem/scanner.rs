use std::fs;
use std::io;
use std::path::Path;

use crate::filesystem::FilesystemNode;

/// Reads an on-disk hierarchy back into a tree, children sorted by name.
pub fn scan_directory(path: &Path) -> io::Result<FilesystemNode> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut entries = fs::read_dir(path)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let children = entries
        .iter()
        .map(|entry| {
            let child_path = entry.path();
            if entry.file_type()?.is_dir() {
                scan_directory(&child_path)
            } else {
                let content = fs::read_to_string(&child_path)?;
                Ok(FilesystemNode::file_with_content(
                    entry.file_name().to_string_lossy().to_string(),
                    content,
                ))
            }
        })
        .collect::<io::Result<Vec<_>>>()?;

    Ok(FilesystemNode::directory_with_children(name, children))
}
