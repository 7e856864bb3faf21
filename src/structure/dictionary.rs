use std::collections::HashSet;

use hashlink::{LinkedHashMap, linked_hash_map};
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::filesystem::FilesystemNode;
use crate::structure::{CURRENT_DIRECTORY, LineError, validate_name};

/// Reads a nested mapping (YAML, or JSON as its subset) into a tree.
///
/// The document holds exactly one key, the root directory. Below it a
/// mapping is a directory, `null` an empty file (or an empty directory when
/// the key ends in `/`), and a string a file with that literal content.
pub fn read_dictionary(text: &str) -> Result<FilesystemNode, DictionaryError> {
    let documents = Yaml::load_from_str(text).context(ParseSnafu)?;
    let document = documents.first().ok_or(DictionaryError::EmptyDocument)?;
    let top_level = document
        .as_mapping()
        .ok_or(DictionaryError::TopLevelNotMap)?;

    if top_level.len() != 1 {
        return Err(DictionaryError::RootCount {
            count: top_level.len(),
        });
    }

    let Some((key, value)) = top_level.iter().next() else {
        return Err(DictionaryError::RootCount { count: 0 });
    };
    let (name, _) = entry_name(key)?;
    debug!("Reading dictionary rooted at '{}'", name);

    match value {
        Yaml::Mapping(children) => directory_from_mapping(name, children),
        Yaml::Value(Scalar::Null) => Ok(FilesystemNode::directory(name)),
        _ => Err(DictionaryError::RootNotMap { name }),
    }
}

/// A directory whose mapping is still being read.
struct PendingDirectory<'a, 'input> {
    name: String,
    entries: linked_hash_map::Iter<'a, Yaml<'input>, Yaml<'input>>,
    names: HashSet<String>,
    children: Vec<FilesystemNode>,
}

impl<'a, 'input> PendingDirectory<'a, 'input> {
    fn new(name: String, mapping: &'a LinkedHashMap<Yaml<'input>, Yaml<'input>>) -> Self {
        Self {
            name,
            entries: mapping.iter(),
            names: HashSet::new(),
            children: Vec::new(),
        }
    }

    /// Reserves `name` among this directory's children.
    fn claim(&mut self, name: &str) -> Result<(), DictionaryError> {
        ensure!(
            self.names.insert(name.to_string()),
            DuplicateEntrySnafu {
                name,
                parent: &self.name,
            }
        );
        Ok(())
    }

    fn into_node(self) -> FilesystemNode {
        FilesystemNode::directory_with_children(self.name, self.children)
    }
}

enum DictionaryEntry<'a, 'input> {
    Directory(String, &'a LinkedHashMap<Yaml<'input>, Yaml<'input>>),
    Leaf(FilesystemNode),
}

/// Walks nested mappings with an explicit stack of pending directories.
fn directory_from_mapping(
    name: String,
    mapping: &LinkedHashMap<Yaml, Yaml>,
) -> Result<FilesystemNode, DictionaryError> {
    let mut root = PendingDirectory::new(name, mapping);
    let mut open: Vec<PendingDirectory> = Vec::new();

    loop {
        let top = open.last_mut().unwrap_or(&mut root);
        let Some((key, value)) = top.entries.next() else {
            let Some(finished) = open.pop() else {
                return Ok(root.into_node());
            };
            let node = finished.into_node();
            open.last_mut().unwrap_or(&mut root).children.push(node);
            continue;
        };

        match classify_entry(key, value)? {
            DictionaryEntry::Directory(name, children) => {
                top.claim(&name)?;
                open.push(PendingDirectory::new(name, children));
            }
            DictionaryEntry::Leaf(node) => {
                top.claim(node.name())?;
                top.children.push(node);
            }
        }
    }
}

fn classify_entry<'a, 'input>(
    key: &Yaml<'input>,
    value: &'a Yaml<'input>,
) -> Result<DictionaryEntry<'a, 'input>, DictionaryError> {
    let (name, marked_directory) = entry_name(key)?;
    ensure!(name != CURRENT_DIRECTORY, CurrentDirectoryEntrySnafu);

    match value {
        Yaml::Mapping(children) => Ok(DictionaryEntry::Directory(name, children)),
        Yaml::Value(Scalar::Null) if marked_directory => {
            Ok(DictionaryEntry::Leaf(FilesystemNode::directory(name)))
        }
        Yaml::Value(Scalar::Null) => Ok(DictionaryEntry::Leaf(FilesystemNode::file(name))),
        Yaml::Value(Scalar::String(_)) if marked_directory => {
            Err(DictionaryError::DirectoryWithContent { name })
        }
        Yaml::Value(Scalar::String(content)) => Ok(DictionaryEntry::Leaf(
            FilesystemNode::file_with_content(name, content.to_string()),
        )),
        _ => Err(DictionaryError::UnsupportedValue { name }),
    }
}

/// Returns the validated entry name and whether it carried a `/` suffix.
fn entry_name(key: &Yaml) -> Result<(String, bool), DictionaryError> {
    let Yaml::Value(Scalar::String(raw)) = key else {
        return Err(DictionaryError::NonStringKey {
            key: format!("{:?}", key),
        });
    };

    let trimmed = raw.trim();
    let marked_directory = trimmed.ends_with('/');
    let name = trimmed.trim_end_matches('/');
    validate_name(name).context(InvalidNameSnafu {
        name: raw.to_string(),
    })?;

    Ok((name.to_string(), marked_directory))
}

#[derive(Debug, Snafu)]
pub enum DictionaryError {
    #[snafu(display("Failed to parse the structure dictionary"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("The structure dictionary is empty"))]
    EmptyDocument,
    #[snafu(display("Top level of the structure dictionary should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Expected exactly one top-level entry, found {}", count))]
    RootCount { count: usize },
    #[snafu(display("Root entry '{}' should be a map", name))]
    RootNotMap { name: String },
    #[snafu(display("Entry keys must be strings, found {}", key))]
    NonStringKey { key: String },
    #[snafu(display("Invalid entry name '{}'", name))]
    InvalidName { name: String, source: LineError },
    #[snafu(display("Entry '{}' should be a map, null or a string", name))]
    UnsupportedValue { name: String },
    #[snafu(display("'.' can only be used as the root entry"))]
    CurrentDirectoryEntry,
    #[snafu(display("Directory '{}' cannot have file content", name))]
    DirectoryWithContent { name: String },
    #[snafu(display("'{}' appears more than once in '{}'", name, parent))]
    DuplicateEntry { name: String, parent: String },
}
