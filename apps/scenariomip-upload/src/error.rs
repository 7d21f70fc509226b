//! # Error Types
//!
//! Top-level error of an upload run. Each stage keeps its own error type;
//! this enum only tells them apart for reporting.

use crate::deposition::DepositionError;
use scenariomip_core::CoreVariablesError;
use thiserror::Error;

/// Errors that abort an upload run.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Missing credential or unusable command-line input.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Loading, selecting or writing the variable table failed.
    #[error(transparent)]
    Core(#[from] CoreVariablesError),

    /// The deposition service rejected a request or could not be reached.
    #[error("Deposition failed: {0}")]
    Deposition(#[from] DepositionError),
}
