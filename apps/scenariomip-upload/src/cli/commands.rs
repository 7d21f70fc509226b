//! # Upload Command
//!
//! The run itself, generic over the deposition service so it can be driven
//! against Zenodo or an in-memory double.

use super::Cli;
use crate::deposition::{DepositionId, DepositionService};
use crate::error::UploadError;
use crate::publisher::{PublishOutcome, Publisher};
use scenariomip_core::{
    ArtifactSet, Breakdown, MetadataDocument, VariableTable, read_sheet, write_artifacts,
};
use std::path::PathBuf;

// =============================================================================
// OPTIONS
// =============================================================================

/// Inputs of one upload run.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub file_to_process: PathBuf,
    pub metadata_file: PathBuf,
    pub generated_dir: PathBuf,
    pub sheet_to_read: String,
    pub any_deposition_id: DepositionId,
    pub publish: bool,
    pub verbose: bool,
}

impl From<&Cli> for UploadOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            file_to_process: cli.file_to_process.clone(),
            metadata_file: cli.metadata_file.clone(),
            generated_dir: cli.generated_dir.clone(),
            sheet_to_read: cli.sheet_to_read.clone(),
            any_deposition_id: DepositionId(cli.any_deposition_id),
            publish: cli.publish,
            verbose: cli.verbose,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct UploadReport {
    pub version: String,
    pub full_count: usize,
    pub core_count: usize,
    pub artifacts: ArtifactSet,
    pub outcome: PublishOutcome,
}

// =============================================================================
// RUN
// =============================================================================

/// Load, select, write and publish.
///
/// The metadata is validated before the workbook is opened, so a bad
/// metadata file fails without touching the generated directory or the
/// service.
pub async fn run_upload<S>(
    options: &UploadOptions,
    service: &S,
) -> Result<UploadReport, UploadError>
where
    S: DepositionService + ?Sized,
{
    let metadata = MetadataDocument::from_path(&options.metadata_file)?;
    let version = metadata.version().to_string();
    tracing::info!(%version, "Preparing release");

    let full = read_sheet(&options.file_to_process, &options.sheet_to_read)?;
    let core = full.core_subset();

    if options.verbose {
        print_summary(&full, &core);
    }

    let artifacts = write_artifacts(
        &options.file_to_process,
        &full,
        &core,
        &version,
        &options.generated_dir,
    )?;

    let outcome = Publisher::new(service)
        .publish_artifacts(
            options.any_deposition_id,
            &metadata,
            &artifacts,
            options.publish,
        )
        .await?;

    Ok(UploadReport {
        version,
        full_count: full.len(),
        core_count: core.len(),
        artifacts,
        outcome,
    })
}

/// Counts and breakdowns for `--verbose`.
fn print_summary(full: &VariableTable, core: &VariableTable) {
    println!("There are {} variables in total.", full.len());
    println!("Of these, {} are core variables.", core.len());
    println!();
    println!("Breakdown by top-level key:");
    print!("{}", Breakdown::top_level(core));
    println!();
    println!("Breakdown by second-level key:");
    print!("{}", Breakdown::second_level(core));
}
