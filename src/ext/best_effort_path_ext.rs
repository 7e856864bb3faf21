use std::env;
use std::path::{Component, Path, PathBuf};

/// Absolute, normalized rendering of `path` for messages. The deepest
/// existing ancestor is canonicalized; components that were not created
/// yet are appended as written.
pub fn best_effort_path_display(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(current_dir) => current_dir.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    let normalized = normalize_path(&absolute);

    for ancestor in normalized.ancestors() {
        let Ok(canonical) = ancestor.canonicalize() else {
            continue;
        };
        return match normalized.strip_prefix(ancestor) {
            Ok(remainder) if !remainder.as_os_str().is_empty() => {
                canonical.join(remainder).display().to_string()
            }
            _ => canonical.display().to_string(),
        };
    }

    normalized.display().to_string()
}

/// Resolves `.` and `..` lexically.
fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}
