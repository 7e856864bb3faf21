use std::error::Error as _;

use snafu::Snafu;
use snafu::prelude::*;
use supports_color::Stream;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::application::confirmation::confirm;
use crate::application::input::{UnreadableInput, read_structure_text};
use crate::export::{ExportError, render_tree, write_json};
use crate::ext::BestEffortPathExt;
use crate::filesystem::{FilesystemNode, FsMaterializer, MaterializationReport, materialize};
use crate::structure::{MalformedStructure, StructureParser};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        let text = read_structure_text(&app_config.structure_file)
            .await
            .context(InputSnafu)?;
        let root = StructureParser::new(app_config.parse_options)
            .parse(&text, Some(app_config.structure_file.as_path()))
            .context(StructureSnafu)?;
        info!(
            "Parsed {} entries rooted at '{}'",
            root.node_count(),
            root.name()
        );

        if let Some(json_path) = &app_config.json_output {
            write_json(&root, json_path)
                .await
                .context(JsonExportSnafu)?;
            println!("Wrote JSON export to {}", json_path.best_effort_path_display());
        }

        Self::print_preview(&root, &app_config);

        if app_config.dry_run {
            println!("Dry run: nothing was created.");
            return Ok(());
        }
        if !app_config.assume_yes && !confirm("Proceed?").context(PromptSnafu)? {
            println!("Operation aborted.");
            return Ok(());
        }

        let report = materialize(&root, &app_config.base_dir, &FsMaterializer).await;
        Self::print_summary(&report);

        ensure!(
            report.is_complete(),
            IncompleteMaterializationSnafu {
                failed: report.failures.len(),
                skipped: report.skipped.len(),
            }
        );
        Ok(())
    }

    fn print_preview(root: &FilesystemNode, app_config: &RuntimeConfig) {
        let styled = supports_color::on(Stream::Stdout).is_some();
        colored::control::set_override(styled);

        println!(
            "The following directories and files will be created in {}:",
            app_config.base_dir.best_effort_path_display()
        );
        print!("{}", render_tree(root, styled));
    }

    fn print_summary(report: &MaterializationReport) {
        println!(
            "Created {}, unchanged {}, rewritten {}.",
            report.created, report.unchanged, report.rewritten
        );
        for failure in &report.failures {
            match failure.source() {
                Some(cause) => println!("  {}: {}", failure, cause),
                None => println!("  {}", failure),
            }
        }
        for skipped in &report.skipped {
            println!("  Skipped {}", skipped.best_effort_path_display());
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Could not read the structure description"))]
    InputError { source: UnreadableInput },
    #[snafu(display("Could not parse the structure description"))]
    StructureError { source: MalformedStructure },
    #[snafu(display("Could not export the structure as JSON"))]
    JsonExportError { source: ExportError },
    #[snafu(display("Failed to read the confirmation answer"))]
    PromptError { source: std::io::Error },
    #[snafu(display(
        "{} entries could not be created and {} were skipped",
        failed,
        skipped
    ))]
    IncompleteMaterialization { failed: usize, skipped: usize },
}
