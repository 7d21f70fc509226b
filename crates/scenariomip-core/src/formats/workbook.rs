//! # Workbook Reader
//!
//! Loads one sheet of the definitions workbook into a [`VariableTable`].
//!
//! The first row is the header. Every cell is converted to text, so the
//! indicator columns are never coerced to numbers or booleans: a cell
//! holding `1` is the string `"1"`, a cell holding `TRUE` is `"True"`, a
//! date cell is `"2024-03-01 00:00:00"`.
//!
//! Error cells (`#N/A`, `#DIV/0!`, ...) and the usual missing-value texts
//! (`N/A`, `NA`, `null`, `nan`, ...) are read as empty.

use crate::primitives::MISSING_VALUE_TOKENS;
use crate::types::{CoreVariablesError, VariableTable};
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

/// Read `sheet` from the workbook at `path`.
///
/// # Errors
///
/// - `Io` if the file does not exist or cannot be opened
/// - `Workbook` if the file is not a readable workbook or has no such sheet
/// - `MissingColumn` / `MissingVariableName` from table construction
pub fn read_sheet(path: &Path, sheet: &str) -> Result<VariableTable, CoreVariablesError> {
    // Surface a missing file as the underlying I/O error, not a workbook error.
    std::fs::metadata(path)?;

    let mut workbook = open_workbook_auto(path).map_err(|e| {
        CoreVariablesError::Workbook(format!("Cannot open '{}': {}", path.display(), e))
    })?;
    let range = workbook.worksheet_range(sheet).map_err(|e| {
        CoreVariablesError::Workbook(format!(
            "Cannot read sheet '{}' of '{}': {}",
            sheet,
            path.display(),
            e
        ))
    })?;

    let mut rows = range.rows();
    let columns: Vec<String> = rows
        .next()
        .map(|header| {
            header
                .iter()
                .enumerate()
                .map(|(idx, cell)| cell_to_string(cell).unwrap_or_else(|| format!("Unnamed: {idx}")))
                .collect()
        })
        .unwrap_or_default();

    let raw_rows = rows.map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>());
    let table = VariableTable::new(columns, raw_rows)?;

    tracing::info!(
        path = %path.display(),
        sheet,
        rows = table.len(),
        "Read variable definitions"
    );

    Ok(table)
}

/// Text of a single cell; `None` for empty, error and missing-value cells.
#[must_use]
pub fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if MISSING_VALUE_TOKENS.contains(&s.as_str()) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Bool(true) => Some("True".to_string()),
        Data::Bool(false) => Some("False".to_string()),
        Data::DateTime(d) if !d.is_duration() => Some(
            d.as_datetime()
                .map_or_else(|| cell.to_string(), |dt| dt.to_string()),
        ),
        other => Some(other.to_string()),
    }
}
