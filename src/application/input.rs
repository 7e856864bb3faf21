use std::path::Path;
use std::string::FromUtf8Error;

use compio::fs;
use snafu::prelude::*;
use tracing::debug;

use crate::ext::BestEffortPathExt;

/// Reads the whole structure description as UTF-8 text.
pub async fn read_structure_text(path: &Path) -> Result<String, UnreadableInput> {
    debug!("Reading structure file: {}", path.best_effort_path_display());
    let bytes = fs::read(path).await.context(ReadSnafu {
        file_path: path.best_effort_path_display(),
    })?;
    debug!("Successfully read structure file: {} bytes", bytes.len());

    String::from_utf8(bytes).context(DecodeSnafu {
        file_path: path.best_effort_path_display(),
    })
}

#[derive(Debug, Snafu)]
pub enum UnreadableInput {
    #[snafu(display("Failed to read the structure file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("The structure file is not valid UTF-8: {}", file_path))]
    DecodeError {
        file_path: String,
        source: FromUtf8Error,
    },
}
