//! # File Formats
//!
//! Reading the definitions workbook and writing the core-variables CSV.

mod csv_table;
mod workbook;

pub use csv_table::write_csv;
pub use workbook::{cell_to_string, read_sheet};
