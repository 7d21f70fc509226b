//! # Deposition Service
//!
//! The remote archive the artifacts are published to, seen as a fixed
//! sequence of operations:
//!
//! ```text
//! any id ──resolve_latest──▶ latest ──get_or_create_draft──▶ draft
//!   draft ──set_metadata──▶ clear_files ──resolve_bucket──▶ bucket
//!   bucket ──upload × 3──▶ [publish]
//! ```
//!
//! Implementations:
//! - [`ZenodoClient`]: the Zenodo REST API over HTTPS
//! - [`InMemoryDeposition`]: an in-process double for tests

mod memory;
mod zenodo;

pub use memory::{DepositionCall, DraftState, InMemoryDeposition};
pub use zenodo::ZenodoClient;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a deposition (one version of a record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepositionId(pub u64);

impl fmt::Display for DepositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upload target bound to one draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketLocation(pub String);

impl BucketLocation {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Errors reported by a deposition service.
#[derive(Debug, Error)]
pub enum DepositionError {
    /// The deposition, draft or file does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service refused the change (permissions, locked record, ...).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The service rejected the request payload.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The token was missing, invalid or lacks the needed scopes.
    #[error("Unauthorized: check ZENODO_TOKEN")]
    Unauthorized,

    /// The service could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-success response.
    #[error("Unexpected response ({status}): {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// A successful response without the expected fields.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A local file could not be read for upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// SERVICE TRAIT
// =============================================================================

/// Operations against the deposition service, in the order they are used.
///
/// Every call needs the previous call's output; nothing is retried and
/// nothing is rolled back.
#[async_trait]
pub trait DepositionService: Send + Sync {
    /// Latest version in the chain that `any` belongs to.
    async fn resolve_latest(&self, any: DepositionId) -> Result<DepositionId, DepositionError>;

    /// Open draft of `latest`, creating a new version if there is none.
    async fn get_or_create_draft(
        &self,
        latest: DepositionId,
    ) -> Result<DepositionId, DepositionError>;

    /// Replace the draft's metadata with `metadata`.
    async fn set_metadata(
        &self,
        draft: DepositionId,
        metadata: &Value,
    ) -> Result<(), DepositionError>;

    /// Remove every file from the draft. No-op on an empty draft.
    async fn clear_files(&self, draft: DepositionId) -> Result<(), DepositionError>;

    /// Upload target of the draft.
    async fn resolve_bucket(&self, draft: DepositionId) -> Result<BucketLocation, DepositionError>;

    /// Upload `file` into `bucket` under its file name.
    async fn upload(&self, bucket: &BucketLocation, file: &Path) -> Result<(), DepositionError>;

    /// Turn the draft into the new published version.
    async fn publish(&self, draft: DepositionId) -> Result<(), DepositionError>;
}

/// File name used as the remote key for `file`.
pub(crate) fn remote_file_name(file: &Path) -> Result<String, DepositionError> {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            DepositionError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("'{}' has no file name", file.display()),
            ))
        })
}
