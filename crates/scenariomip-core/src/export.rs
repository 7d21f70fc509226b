//! # Artifact Writer
//!
//! Produces the three files attached to a release inside the generated
//! directory:
//!
//! | File                                              | Content                        |
//! |---------------------------------------------------|--------------------------------|
//! | `ScenarioMIP_coreVariables_full_<v>.xlsx`         | byte copy of the input workbook |
//! | `ScenarioMIP_coreVariables_only-core_<v>.csv`     | core variables as CSV          |
//! | `README_<v>.md`                                   | generated README               |
//!
//! Existing files with the same names are overwritten. On failure nothing is
//! cleaned up: files written before the error stay in place.

use crate::breakdown::Breakdown;
use crate::formats::write_csv;
use crate::naming::ArtifactNames;
use crate::readme::{ReadmeContext, render_readme};
use crate::types::{CoreVariablesError, VariableTable};
use std::fs::File;
use std::path::{Path, PathBuf};

// =============================================================================
// ARTIFACT SET
// =============================================================================

/// Paths of the written artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub full_definition: PathBuf,
    pub core_variables: PathBuf,
    pub readme: PathBuf,
}

impl ArtifactSet {
    /// Paths for `names` inside `dir`. Nothing is touched on disk.
    #[must_use]
    pub fn in_dir(dir: &Path, names: &ArtifactNames) -> Self {
        Self {
            full_definition: dir.join(&names.full_definition),
            core_variables: dir.join(&names.core_variables),
            readme: dir.join(&names.readme),
        }
    }

    /// Files in the order they are uploaded: workbook, CSV, README.
    #[must_use]
    pub fn upload_order(&self) -> [&Path; 3] {
        [
            self.full_definition.as_path(),
            self.core_variables.as_path(),
            self.readme.as_path(),
        ]
    }
}

// =============================================================================
// WRITER
// =============================================================================

/// Write all artifacts for `version` into `out_dir`.
///
/// `full` is the table read from `source`; `core` is its core subset.
///
/// # Errors
///
/// Any filesystem or CSV error, unmodified.
pub fn write_artifacts(
    source: &Path,
    full: &VariableTable,
    core: &VariableTable,
    version: &str,
    out_dir: &Path,
) -> Result<ArtifactSet, CoreVariablesError> {
    let names = ArtifactNames::for_version(version);
    let artifacts = ArtifactSet::in_dir(out_dir, &names);

    std::fs::create_dir_all(out_dir)?;

    copy_with_mtime(source, &artifacts.full_definition)?;
    tracing::debug!(path = %artifacts.full_definition.display(), "Copied full definitions");

    write_csv(core, &artifacts.core_variables)?;
    tracing::debug!(path = %artifacts.core_variables.display(), rows = core.len(), "Wrote core variables");

    let top_level = Breakdown::top_level(core);
    let readme = render_readme(&ReadmeContext {
        names: &names,
        version,
        full_count: full.len(),
        core_count: core.len(),
        top_level: &top_level,
    });
    std::fs::write(&artifacts.readme, readme)?;
    tracing::debug!(path = %artifacts.readme.display(), "Wrote README");

    tracing::info!(dir = %out_dir.display(), version, "Artifacts written");
    Ok(artifacts)
}

/// Byte copy that keeps permissions and, where the platform allows, the
/// modification time.
fn copy_with_mtime(source: &Path, dest: &Path) -> Result<(), CoreVariablesError> {
    std::fs::copy(source, dest)?;

    // A read-only source yields a read-only copy; its mtime stays as is.
    let preserved = std::fs::metadata(source)
        .and_then(|meta| meta.modified())
        .and_then(|modified| {
            File::options()
                .write(true)
                .open(dest)?
                .set_modified(modified)
        });
    if let Err(e) = preserved {
        tracing::debug!(path = %dest.display(), error = %e, "Modification time not preserved");
    }
    Ok(())
}
