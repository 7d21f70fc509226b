//! # CSV Writer
//!
//! Writes a [`VariableTable`] as comma-separated text: header row first,
//! columns in table order, no index column, unset cells as empty fields.

use crate::types::{CoreVariablesError, VariableTable};
use std::io::Write;
use std::path::Path;

/// Write `table` to a new file at `path`, replacing any existing file.
pub fn write_csv(table: &VariableTable, path: &Path) -> Result<(), CoreVariablesError> {
    let file = std::fs::File::create(path)?;
    write_csv_to(table, file)
}

/// Write `table` to any writer.
pub(crate) fn write_csv_to<W: Write>(
    table: &VariableTable,
    sink: W,
) -> Result<(), CoreVariablesError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink);

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.cells().iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}
