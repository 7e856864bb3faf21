use std::io;
use std::path::{Path, PathBuf};

use compio::fs;
use derive_more::Display;
use snafu::Snafu;
use tracing::{debug, info, warn};

use crate::ext::BestEffortPathExt;
use crate::filesystem::{FilesystemNode, NodeKind};

/// What a materializer did for a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Outcome {
    #[display("Created")]
    Created,
    #[display("Unchanged")]
    Unchanged,
    #[display("Rewritten")]
    Rewritten,
}

/// Filesystem side effects needed to realise a tree. Both operations are
/// idempotent and create missing parent directories.
pub trait Materializer {
    async fn ensure_directory(&self, path: &Path) -> io::Result<Outcome>;
    async fn write_file(&self, path: &Path, content: &str) -> io::Result<Outcome>;
}

/// [`Materializer`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMaterializer;

impl Materializer for FsMaterializer {
    async fn ensure_directory(&self, path: &Path) -> io::Result<Outcome> {
        if path.metadata().is_ok_and(|meta| meta.is_dir()) {
            return Ok(Outcome::Unchanged);
        }
        fs::create_dir_all(path).await?;
        Ok(Outcome::Created)
    }

    async fn write_file(&self, path: &Path, content: &str) -> io::Result<Outcome> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let outcome = match path.metadata() {
            Ok(meta) if meta.is_dir() => {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "a directory already exists at this path",
                ));
            }
            Ok(_) => {
                let existing = fs::read(path).await?;
                if existing == content.as_bytes() {
                    return Ok(Outcome::Unchanged);
                }
                Outcome::Rewritten
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Outcome::Created,
            Err(e) => return Err(e),
        };

        fs::write(path, content.as_bytes().to_vec()).await.0?;
        Ok(outcome)
    }
}

/// Summary of a best-effort materialization run.
#[derive(Debug, Default)]
pub struct MaterializationReport {
    pub created: usize,
    pub unchanged: usize,
    pub rewritten: usize,
    /// Entries not attempted because an enclosing directory failed.
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<FilesystemWriteFailure>,
}

impl MaterializationReport {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Created => self.created += 1,
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Rewritten => self.rewritten += 1,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.skipped.is_empty()
    }
}

/// Creates every entry of `root` below `base_dir`, in input order.
///
/// A failing entry never stops its siblings. Descendants of a directory
/// that could not be created are reported as skipped.
pub async fn materialize(
    root: &FilesystemNode,
    base_dir: &Path,
    materializer: &impl Materializer,
) -> MaterializationReport {
    let mut report = MaterializationReport::default();
    let mut failed_directories: Vec<PathBuf> = Vec::new();

    for entry in root.walk() {
        let path = base_dir.join(&entry.path);
        if failed_directories.iter().any(|failed| path.starts_with(failed)) {
            debug!("Skipping {}", path.display());
            report.skipped.push(path);
            continue;
        }

        let kind = entry.node.kind();
        let result = match kind {
            NodeKind::Directory => materializer.ensure_directory(&path).await,
            NodeKind::File => materializer.write_file(&path, entry.node.content()).await,
        };

        match result {
            Ok(outcome) => {
                info!("{} {}: {}", outcome, kind, path.display());
                report.record(outcome);
            }
            Err(source) => {
                let failure = FilesystemWriteFailure { path, kind, source };
                warn!("{}: {}", failure, failure.source);
                if kind == NodeKind::Directory {
                    failed_directories.push(failure.path.clone());
                }
                report.failures.push(failure);
            }
        }
    }

    report
}

#[derive(Debug, Snafu)]
#[snafu(display("Failed to create {} {}", kind, path.best_effort_path_display()))]
pub struct FilesystemWriteFailure {
    path: PathBuf,
    kind: NodeKind,
    source: io::Error,
}
