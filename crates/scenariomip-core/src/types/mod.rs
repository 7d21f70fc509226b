//! # Core Type Definitions
//!
//! This module contains the data model of the variable definitions table:
//! - Category indicators (`CoreIndicator`)
//! - Rows and tables (`VariableRow`, `VariableTable`)
//! - Error types (`CoreVariablesError`)
//!
//! ## Cell Model
//!
//! Every cell is held as `Option<String>`. Empty cells and cells holding an
//! empty string are both `None`, so "is this indicator set" is a plain
//! `is_some()` and no numeric or boolean coercion ever happens.

use crate::primitives::{INDICATOR_COLUMNS, VARIABLE_COLUMN};
use thiserror::Error;

// =============================================================================
// CORE INDICATORS
// =============================================================================

/// A category column marking a variable as part of the core set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CoreIndicator {
    Land,
    Emissions,
    Energy,
    Cdr,
    Macro,
}

impl CoreIndicator {
    /// All indicators, in column-check order.
    pub const ALL: [Self; 5] = [
        Self::Land,
        Self::Emissions,
        Self::Energy,
        Self::Cdr,
        Self::Macro,
    ];

    /// Header of the workbook column backing this indicator.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        INDICATOR_COLUMNS[self as usize]
    }
}

impl std::fmt::Display for CoreIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

// =============================================================================
// VARIABLE ROW
// =============================================================================

/// One row of the definitions sheet.
///
/// Rows are immutable once built by [`VariableTable::new`]. Only core rows
/// are guaranteed to carry a variable name; note rows in the sheet may not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRow {
    variable: Option<String>,
    indicators: [Option<String>; 5],
    cells: Vec<Option<String>>,
}

impl VariableRow {
    /// Hierarchical variable name, levels joined by `|`.
    #[must_use]
    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    /// Value of one indicator column, `None` when unset.
    #[must_use]
    pub fn indicator(&self, indicator: CoreIndicator) -> Option<&str> {
        self.indicators[indicator as usize].as_deref()
    }

    /// A core variable has at least one indicator set.
    #[must_use]
    pub fn is_core(&self) -> bool {
        self.indicators.iter().any(Option::is_some)
    }

    /// All cells, in the column order of the owning table.
    #[must_use]
    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }
}

// =============================================================================
// VARIABLE TABLE
// =============================================================================

/// The variable definitions sheet, header plus rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableTable {
    columns: Vec<String>,
    rows: Vec<VariableRow>,
}

impl VariableTable {
    /// Build a table from a header and raw rows.
    ///
    /// Raw rows shorter than the header are padded with empty cells; cells
    /// past the header are dropped. Rows with no value at all are skipped.
    ///
    /// # Errors
    ///
    /// - `MissingColumn` if `variable` or any indicator column is absent
    /// - `MissingVariableName` if a core row has an empty `variable`
    pub fn new<I>(columns: Vec<String>, raw_rows: I) -> Result<Self, CoreVariablesError>
    where
        I: IntoIterator<Item = Vec<Option<String>>>,
    {
        let variable_idx = column_index(&columns, VARIABLE_COLUMN)?;
        let mut indicator_idx = [0usize; 5];
        for indicator in CoreIndicator::ALL {
            indicator_idx[indicator as usize] = column_index(&columns, indicator.column_name())?;
        }

        let mut rows = Vec::new();
        // Row numbers in errors are 1-based and count the header as row 1.
        for (offset, raw) in raw_rows.into_iter().enumerate() {
            let mut cells: Vec<Option<String>> = raw
                .into_iter()
                .take(columns.len())
                .map(|cell| cell.filter(|v| !v.is_empty()))
                .collect();
            cells.resize(columns.len(), None);

            if cells.iter().all(Option::is_none) {
                continue;
            }

            let variable = cells[variable_idx].clone();
            let indicators = indicator_idx.map(|idx| cells[idx].clone());
            if variable.is_none() && indicators.iter().any(Option::is_some) {
                return Err(CoreVariablesError::MissingVariableName { row: offset + 2 });
            }

            rows.push(VariableRow {
                variable,
                indicators,
                cells,
            });
        }

        Ok(Self { columns, rows })
    }

    /// Column headers in workbook order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in their current order.
    #[must_use]
    pub fn rows(&self) -> &[VariableRow] {
        &self.rows
    }

    /// Number of rows, named or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Variable names in row order. Rows without a name are skipped.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().filter_map(VariableRow::variable)
    }

    /// Same columns, different rows. Used by selection.
    pub(crate) fn with_rows(&self, rows: Vec<VariableRow>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}

fn column_index(columns: &[String], name: &str) -> Result<usize, CoreVariablesError> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| CoreVariablesError::MissingColumn(name.to_string()))
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised while loading, selecting or exporting the variable table.
///
/// Nothing here is retried: the first error aborts the run and whatever was
/// already written stays on disk.
#[derive(Debug, Error)]
pub enum CoreVariablesError {
    /// The metadata document is missing, malformed or lacks a required key.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook could not be opened or the sheet could not be read.
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// A required column is absent from the sheet header.
    #[error("Missing column in sheet header: {0}")]
    MissingColumn(String),

    /// A core row carries no variable name.
    #[error("Row {row} has no value in the `variable` column")]
    MissingVariableName {
        /// Spreadsheet row number (header is row 1).
        row: usize,
    },

    /// Writing the core-variables CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        ["variable", "unit", "land", "emissions", "energy", "cdr", "macro"]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn indicator_column_names_follow_declaration_order() {
        let names: Vec<_> = CoreIndicator::ALL.iter().map(|i| i.column_name()).collect();
        assert_eq!(names, INDICATOR_COLUMNS);
        assert_eq!(CoreIndicator::Cdr.to_string(), "cdr");
    }

    #[test]
    fn empty_string_cells_are_unset() {
        let table = VariableTable::new(
            header(),
            vec![vec![cell("Emissions|CO2"), cell("Mt CO2/yr"), cell("")]],
        )
        .expect("table");

        let row = &table.rows()[0];
        assert_eq!(row.indicator(CoreIndicator::Land), None);
        assert!(!row.is_core());
    }

    #[test]
    fn any_indicator_marks_row_as_core() {
        let table = VariableTable::new(
            header(),
            vec![vec![
                cell("Emissions|CO2"),
                None,
                None,
                None,
                None,
                cell("x"),
                None,
            ]],
        )
        .expect("table");

        let row = &table.rows()[0];
        assert!(row.is_core());
        assert_eq!(row.indicator(CoreIndicator::Cdr), Some("x"));
        assert_eq!(row.variable(), Some("Emissions|CO2"));
    }

    #[test]
    fn short_rows_are_padded_and_blank_rows_skipped() {
        let table = VariableTable::new(
            header(),
            vec![vec![cell("Population")], vec![None, None], vec![]],
        )
        .expect("table");

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].cells().len(), header().len());
    }

    #[test]
    fn missing_indicator_column_is_reported() {
        let columns = vec!["variable".to_string(), "land".to_string()];
        let result = VariableTable::new(columns, Vec::<Vec<Option<String>>>::new());
        assert!(matches!(
            result,
            Err(CoreVariablesError::MissingColumn(ref c)) if c == "emissions"
        ));
    }

    #[test]
    fn note_row_without_variable_name_is_kept() {
        let table = VariableTable::new(header(), vec![
            vec![cell("GDP|PPP")],
            vec![None, cell("billion USD")],
        ])
        .expect("table");

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].variable(), None);
        assert!(!table.rows()[1].is_core());
        assert_eq!(table.variables().collect::<Vec<_>>(), vec!["GDP|PPP"]);
    }

    #[test]
    fn core_row_without_variable_name_is_rejected() {
        let result = VariableTable::new(header(), vec![
            vec![cell("GDP|PPP")],
            vec![None, cell("Mt CO2/yr"), None, cell("x")],
        ]);
        assert!(matches!(
            result,
            Err(CoreVariablesError::MissingVariableName { row: 3 })
        ));
    }
}
