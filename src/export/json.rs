use std::path::{Path, PathBuf};

use compio::fs;
use serde_json::{Map, Value};
use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::ext::BestEffortPathExt;
use crate::filesystem::FilesystemNode;

/// Projects the tree into `{ root: { child: ... } }`. Directories become
/// objects, files become `null` or their content when it is non-empty.
/// Keys keep input order.
pub fn to_json(root: &FilesystemNode) -> Value {
    let mut top_level = Map::new();
    top_level.insert(root.name().to_string(), node_value(root));
    Value::Object(top_level)
}

fn node_value(node: &FilesystemNode) -> Value {
    if node.is_directory() {
        let children = node
            .children()
            .iter()
            .map(|child| (child.name().to_string(), node_value(child)))
            .collect::<Map<_, _>>();
        Value::Object(children)
    } else if node.content().is_empty() {
        Value::Null
    } else {
        Value::String(node.content().to_string())
    }
}

/// Writes the pretty-printed projection of `root` to `path`.
pub async fn write_json(root: &FilesystemNode, path: &Path) -> Result<(), ExportError> {
    let mut text = serde_json::to_string_pretty(&to_json(root)).context(SerializeSnafu)?;
    text.push('\n');

    debug!("Writing JSON export to {}", path.best_effort_path_display());
    fs::write(path, text.into_bytes())
        .await
        .0
        .context(WriteSnafu {
            path: path.to_path_buf(),
        })?;
    Ok(())
}

#[derive(Debug, Snafu)]
pub enum ExportError {
    #[snafu(display("Failed to serialize the structure to JSON"))]
    SerializeError { source: serde_json::Error },
    #[snafu(display("Failed to write JSON export: {}", path.best_effort_path_display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}
