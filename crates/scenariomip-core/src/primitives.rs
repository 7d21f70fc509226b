//! # Fixed Names and Defaults
//!
//! Column names, file-name prefixes and command-line defaults shared by the
//! core crate and the upload binary. These are compiled in; a different
//! layout of the definitions workbook is a code change, not a flag.

/// Column holding the hierarchical variable name (`Emissions|CO2|Energy`).
pub const VARIABLE_COLUMN: &str = "variable";

/// Separator between the levels of a variable name.
pub const VARIABLE_SEPARATOR: char = '|';

/// Indicator columns, in the order they are checked.
///
/// A row is a core variable iff at least one of these holds a value.
pub const INDICATOR_COLUMNS: [&str; 5] = ["land", "emissions", "energy", "cdr", "macro"];

/// Cell texts read as missing values, as spreadsheet tooling conventionally
/// does. An indicator holding one of these does not make a row core.
pub const MISSING_VALUE_TOKENS: [&str; 19] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null", "",
];

/// Sheet of the definitions workbook that holds the variable table.
pub const DEFAULT_SHEET: &str = "ScenarioMIP core variables NEW";

/// Metadata document sent to the deposition service.
pub const DEFAULT_METADATA_FILE: &str = "METADATA.json";

/// Directory the artifacts are written into.
pub const DEFAULT_GENERATED_DIR: &str = "generated";

/// Any deposition in the version chain of the published core-variables record.
pub const DEFAULT_DEPOSITION_ID: u64 = 14_870_678;

/// Zenodo production instance.
pub const DEFAULT_ZENODO_DOMAIN: &str = "https://zenodo.org";

// =============================================================================
// ARTIFACT NAMING
// =============================================================================

/// Prefix of the versioned copy of the full definitions workbook.
pub const FULL_DEFINITION_PREFIX: &str = "ScenarioMIP_coreVariables_full_";

/// Prefix of the core-variables CSV.
pub const CORE_VARIABLES_PREFIX: &str = "ScenarioMIP_coreVariables_only-core_";

/// Prefix of the generated README.
pub const README_PREFIX: &str = "README_";

/// Heading of the generated README.
pub const README_TITLE: &str = "# ScenarioMIP core variables";
