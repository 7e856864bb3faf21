use std::path::PathBuf;

use crate::cli::Cli;
use crate::structure::ParseOptions;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub structure_file: PathBuf,
    pub base_dir: PathBuf,
    pub parse_options: ParseOptions,
    pub json_output: Option<PathBuf>,
    pub dry_run: bool,
    pub assume_yes: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            structure_file: cli.file,
            base_dir: cli.base_dir,
            parse_options: ParseOptions {
                notation: cli.notation,
                tab_width: cli.tab_width,
                indent_width: cli.indent_width,
            },
            json_output: cli.json,
            dry_run: cli.dry_run,
            assume_yes: cli.yes,
        }
    }
}
