//! # Metadata Document
//!
//! The JSON document sent verbatim to the deposition service as the draft's
//! descriptive metadata. Only `metadata.version` is interpreted locally; it
//! names the release and the artifact files.
//!
//! ```json
//! {
//!   "metadata": {
//!     "title": "ScenarioMIP core variables",
//!     "version": "1.2.0",
//!     "upload_type": "dataset"
//!   }
//! }
//! ```

use crate::types::CoreVariablesError;
use serde_json::Value;
use std::path::Path;

/// A parsed metadata document with its release version.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataDocument {
    document: Value,
    version: String,
}

impl MetadataDocument {
    /// Read and validate a metadata file.
    ///
    /// # Errors
    ///
    /// `Config` if the file cannot be read, is not JSON, or has no
    /// non-empty string at `metadata.version`.
    pub fn from_path(path: &Path) -> Result<Self, CoreVariablesError> {
        let bytes = std::fs::read(path).map_err(|e| {
            CoreVariablesError::Config(format!(
                "Cannot read metadata file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_slice(&bytes).map_err(|e| match e {
            CoreVariablesError::Config(msg) => {
                CoreVariablesError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse a metadata document from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoreVariablesError> {
        let document: Value = serde_json::from_slice(bytes)
            .map_err(|e| CoreVariablesError::Config(format!("Invalid JSON: {}", e)))?;
        Self::from_value(document)
    }

    /// Validate an already-parsed JSON value.
    pub fn from_value(document: Value) -> Result<Self, CoreVariablesError> {
        let version = match document.pointer("/metadata/version") {
            Some(Value::String(v)) if !v.trim().is_empty() => v.clone(),
            Some(Value::String(_)) => {
                return Err(CoreVariablesError::Config(
                    "`metadata.version` is empty".to_string(),
                ));
            }
            Some(other) => {
                return Err(CoreVariablesError::Config(format!(
                    "`metadata.version` must be a string, found {}",
                    other
                )));
            }
            None => {
                return Err(CoreVariablesError::Config(
                    "Missing required key `metadata.version`".to_string(),
                ));
            }
        };

        Ok(Self { document, version })
    }

    /// Release version, e.g. `1.2.0`.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The full document, as read.
    #[must_use]
    pub fn as_json(&self) -> &Value {
        &self.document
    }
}
