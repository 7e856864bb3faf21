use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;
use crate::structure::Notation;

/// Create directories and files from a text description of a tree.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// Directory in which the described root is created
    #[clap(default_value = ".")]
    pub base_dir: PathBuf,

    /// Text file describing the structure
    #[clap(long, short, default_value = "structure.txt")]
    pub file: PathBuf,

    /// How the structure file is written
    #[clap(long, short, default_value = "auto", value_enum)]
    pub notation: Notation,

    /// Columns per tab stop when expanding tabs
    #[clap(long, default_value = "4", value_parser = parse_width)]
    pub tab_width: usize,

    /// Spaces per nesting level in indentation notation
    #[clap(long, default_value = "4", value_parser = parse_width)]
    pub indent_width: usize,

    /// Also write the parsed structure as JSON to this path
    #[clap(long)]
    pub json: Option<PathBuf>,

    /// Show the preview without creating anything
    #[clap(long)]
    pub dry_run: bool,

    /// Create without asking for confirmation
    #[clap(long, short)]
    pub yes: bool,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

fn parse_width(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("width must be at least 1".to_string()),
        Ok(width) => Ok(width),
        Err(e) => Err(e.to_string()),
    }
}
