//! # CLI Module
//!
//! Single command: process the definitions workbook and publish the result
//! as a new version of the core-variables record.
//!
//! ```bash
//! # Upload and leave the draft open for review
//! scenariomip-upload "ScenarioMIP variables.xlsx"
//!
//! # Upload and publish, printing the breakdowns
//! scenariomip-upload "ScenarioMIP variables.xlsx" --publish --verbose
//! ```

mod commands;

use crate::config::UploadConfig;
use crate::deposition::ZenodoClient;
use crate::error::UploadError;
use clap::{Parser, ValueEnum};
use scenariomip_core::primitives::{
    DEFAULT_DEPOSITION_ID, DEFAULT_GENERATED_DIR, DEFAULT_METADATA_FILE, DEFAULT_SHEET,
};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Process a file and upload the processed files to Zenodo
#[derive(Parser, Debug)]
#[command(name = "scenariomip-upload")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Core variables definition file from which to start
    pub file_to_process: PathBuf,

    /// Publish the new Zenodo record. Without this the draft is left open so
    /// it can be checked and tweaked before publishing by hand.
    #[arg(long)]
    pub publish: bool,

    /// File from which to load the metadata
    #[arg(long, default_value = DEFAULT_METADATA_FILE)]
    pub metadata_file: PathBuf,

    /// Directory in which to place the generated files
    #[arg(long, default_value = DEFAULT_GENERATED_DIR)]
    pub generated_dir: PathBuf,

    /// Sheet to read from the definition file
    #[arg(long, default_value = DEFAULT_SHEET)]
    pub sheet_to_read: String,

    /// Show information about the number of variables included
    #[arg(short, long)]
    pub verbose: bool,

    /// Any deposition ID related to the Zenodo record you want to update
    #[arg(long, default_value_t = DEFAULT_DEPOSITION_ID)]
    pub any_deposition_id: u64,

    /// Logging level to use
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Info)]
    pub logging_level: LogLevel,
}

/// Log levels, named as operators already write them (`INFO`, `WARNING`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Success,
    #[value(alias = "warn")]
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Equivalent `tracing` filter level.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info | Self::Success => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }

    /// Filter directive: this level for our crates, warnings for the rest.
    #[must_use]
    pub fn directive(self) -> String {
        let level = self.as_filter();
        format!("warn,scenariomip_upload={level},scenariomip_core={level}")
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and configuration from the
/// environment.
pub async fn execute(cli: Cli) -> Result<(), UploadError> {
    execute_with(cli, UploadConfig::from_env).await
}

/// Execute the CLI with configuration from `load_config`.
///
/// The configuration is loaded first; if that fails nothing is read or
/// written.
pub async fn execute_with<F>(cli: Cli, load_config: F) -> Result<(), UploadError>
where
    F: FnOnce() -> Result<UploadConfig, UploadError>,
{
    let config = load_config()?;
    tracing::debug!(?config, "Configuration loaded");

    let options = UploadOptions::from(&cli);
    let client = ZenodoClient::new(&config);
    let report = run_upload(&options, &client).await?;

    println!("{}", report.outcome.message(&config.zenodo_domain));
    Ok(())
}
