//! # Artifact Naming
//!
//! File names embed the release version with dots replaced by dashes, so
//! `1.2.0` produces `ScenarioMIP_coreVariables_full_1-2-0.xlsx`. Names of
//! different releases therefore never overwrite each other in the generated
//! directory.

use crate::primitives::{CORE_VARIABLES_PREFIX, FULL_DEFINITION_PREFIX, README_PREFIX};

/// Version string as used in file names: every `.` becomes `-`.
#[must_use]
pub fn version_filename(version: &str) -> String {
    version.replace('.', "-")
}

/// The three artifact file names for one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    /// Versioned copy of the definitions workbook.
    pub full_definition: String,
    /// CSV of the core variables.
    pub core_variables: String,
    /// Generated README.
    pub readme: String,
}

impl ArtifactNames {
    #[must_use]
    pub fn for_version(version: &str) -> Self {
        let suffix = version_filename(version);
        Self {
            full_definition: format!("{FULL_DEFINITION_PREFIX}{suffix}.xlsx"),
            core_variables: format!("{CORE_VARIABLES_PREFIX}{suffix}.csv"),
            readme: format!("{README_PREFIX}{suffix}.md"),
        }
    }

    /// Names in upload order: workbook, CSV, README.
    #[must_use]
    pub fn in_upload_order(&self) -> [&str; 3] {
        [
            self.full_definition.as_str(),
            self.core_variables.as_str(),
            self.readme.as_str(),
        ]
    }
}
