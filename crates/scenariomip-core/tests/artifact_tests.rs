//! # Artifact Tests
//!
//! End-to-end runs of read -> select -> write against real workbooks
//! authored with rust_xlsxwriter in a temporary directory.

use rust_xlsxwriter::{Format, Workbook};
use scenariomip_core::primitives::DEFAULT_SHEET;
use scenariomip_core::{CoreVariablesError, read_sheet, write_artifacts};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

// =============================================================================
// FIXTURES
// =============================================================================

const HEADER: [&str; 8] = [
    "variable", "unit", "definition", "land", "emissions", "energy", "cdr", "macro",
];

/// Ten variables; four carry an `emissions` or `land` flag.
const ROWS: [[&str; 8]; 10] = [
    ["Population", "million", "", "", "", "", "", ""],
    ["GDP|PPP", "billion USD_2010/yr", "", "", "", "", "", ""],
    ["Emissions|CO2", "Mt CO2/yr", "Total CO2", "", "x", "", "", ""],
    ["Land Cover|Forest", "million ha", "", "x", "", "", "", ""],
    ["Price|Carbon", "USD_2010/t CO2", "", "", "", "", "", ""],
    ["Emissions|CH4", "Mt CH4/yr", "", "", "x", "", "", ""],
    ["Final Energy", "EJ/yr", "", "", "", "", "", ""],
    ["Land Cover|Cropland", "million ha", "", "x", "", "", "", ""],
    ["Primary Energy", "EJ/yr", "", "", "", "", "", ""],
    ["Capacity|Electricity", "GW", "", "", "", "", "", ""],
];

fn write_workbook(path: &Path, sheet: &str, header: &[&str], rows: &[[&str; 8]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).expect("sheet name");
    for (col, name) in header.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *name)
            .expect("header cell");
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet
                    .write_string(r as u32 + 1, col as u16, *value)
                    .expect("cell");
            }
        }
    }
    workbook.save(path).expect("save workbook");
}

fn fixture(dir: &Path) -> PathBuf {
    let path = dir.join("definitions.xlsx");
    write_workbook(&path, DEFAULT_SHEET, &HEADER, &ROWS);
    path
}

// =============================================================================
// READ + SELECT
// =============================================================================

#[test]
fn reads_all_rows_and_selects_flagged_ones() {
    let dir = tempdir().expect("temp dir");
    let source = fixture(dir.path());

    let full = read_sheet(&source, DEFAULT_SHEET).expect("read");
    assert_eq!(full.len(), 10);
    assert_eq!(full.columns(), HEADER);

    let core = full.core_subset();
    assert_eq!(core.variables().collect::<Vec<_>>(), vec![
        "Emissions|CH4",
        "Emissions|CO2",
        "Land Cover|Cropland",
        "Land Cover|Forest",
    ]);
}

#[test]
fn numeric_indicator_cells_read_as_text() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("numeric.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Sheet1").expect("sheet name");
    for (col, name) in HEADER.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *name)
            .expect("header cell");
    }
    worksheet.write_string(1, 0, "Final Energy").expect("cell");
    worksheet.write_number(1, 5, 1.0).expect("cell");
    workbook.save(&path).expect("save");

    let table = read_sheet(&path, "Sheet1").expect("read");
    let core = table.core_subset();
    assert_eq!(core.len(), 1);
    assert_eq!(core.rows()[0].cells()[5].as_deref(), Some("1"));
}

#[test]
fn date_cells_read_as_timestamps() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("dated.xlsx");
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Sheet1").expect("sheet name");
    for (col, name) in HEADER.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *name)
            .expect("header cell");
    }
    worksheet.write_string(1, 0, "Emissions|CO2").expect("cell");
    // 45352 is 2024-03-01 in the 1900 date system.
    worksheet
        .write_number_with_format(1, 2, 45352.0, &date_format)
        .expect("cell");
    worksheet.write_string(1, 4, "x").expect("cell");
    workbook.save(&path).expect("save");

    let core = read_sheet(&path, "Sheet1").expect("read").core_subset();
    assert_eq!(
        core.rows()[0].cells()[2].as_deref(),
        Some("2024-03-01 00:00:00")
    );
}

#[test]
fn note_rows_without_a_name_are_counted_but_not_core() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("notes.xlsx");
    write_workbook(&path, DEFAULT_SHEET, &HEADER, &[
        ["Emissions|CO2", "Mt CO2/yr", "", "", "x", "", "", ""],
        ["", "see notes tab", "", "", "", "", "", ""],
    ]);

    let full = read_sheet(&path, DEFAULT_SHEET).expect("read");
    assert_eq!(full.len(), 2);
    let core = full.core_subset();
    assert_eq!(core.variables().collect::<Vec<_>>(), vec!["Emissions|CO2"]);

    let out_dir = dir.path().join("generated");
    let artifacts = write_artifacts(&path, &full, &core, "2.0.0", &out_dir).expect("write");
    let readme = std::fs::read_to_string(&artifacts.readme).expect("readme");
    assert!(readme.contains(
        "there are 2 variables in the full set and 1 variables in the core set."
    ));
}

#[test]
fn missing_value_indicators_do_not_make_rows_core() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("na.xlsx");
    write_workbook(&path, DEFAULT_SHEET, &HEADER, &[
        ["Final Energy", "EJ/yr", "", "N/A", "", "", "", ""],
        ["Primary Energy", "EJ/yr", "", "", "", "x", "", ""],
    ]);

    let core = read_sheet(&path, DEFAULT_SHEET).expect("read").core_subset();
    assert_eq!(core.variables().collect::<Vec<_>>(), vec!["Primary Energy"]);
}

#[test]
fn nameless_core_row_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("nameless.xlsx");
    write_workbook(&path, DEFAULT_SHEET, &HEADER, &[
        ["Emissions|CO2", "Mt CO2/yr", "", "", "x", "", "", ""],
        ["", "Mt CH4/yr", "", "", "x", "", "", ""],
    ]);

    let result = read_sheet(&path, DEFAULT_SHEET);
    assert!(matches!(
        result,
        Err(CoreVariablesError::MissingVariableName { row: 3 })
    ));
}

#[test]
fn unknown_sheet_is_workbook_error() {
    let dir = tempdir().expect("temp dir");
    let source = fixture(dir.path());

    let result = read_sheet(&source, "No such sheet");
    assert!(matches!(result, Err(CoreVariablesError::Workbook(_))));
}

#[test]
fn missing_indicator_column_is_reported() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("no-macro.xlsx");
    let mut header = HEADER;
    header[7] = "macroeconomics";
    write_workbook(&path, DEFAULT_SHEET, &header, &ROWS);

    let result = read_sheet(&path, DEFAULT_SHEET);
    assert!(matches!(
        result,
        Err(CoreVariablesError::MissingColumn(ref c)) if c == "macro"
    ));
}

// =============================================================================
// WRITE
// =============================================================================

#[test]
fn writes_three_versioned_artifacts() {
    let dir = tempdir().expect("temp dir");
    let source = fixture(dir.path());
    let out_dir = dir.path().join("generated").join("nested");

    let full = read_sheet(&source, DEFAULT_SHEET).expect("read");
    let core = full.core_subset();
    let artifacts = write_artifacts(&source, &full, &core, "0.1.0", &out_dir).expect("write");

    for path in artifacts.upload_order() {
        assert!(path.is_file(), "{} missing", path.display());
        let name = path.file_name().expect("name").to_string_lossy();
        assert!(name.contains("0-1-0"), "{name} lacks version suffix");
    }

    let copied = std::fs::read(&artifacts.full_definition).expect("copy");
    assert_eq!(copied, std::fs::read(&source).expect("source"));

    let csv = std::fs::read_to_string(&artifacts.core_variables).expect("csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5, "header plus four core rows");
    assert_eq!(lines[0], HEADER.join(","));
    assert_eq!(lines[1], "Emissions|CH4,Mt CH4/yr,,,x,,,");
    assert_eq!(lines[2], "Emissions|CO2,Mt CO2/yr,Total CO2,,x,,,");

    let readme = std::fs::read_to_string(&artifacts.readme).expect("readme");
    assert!(readme.contains(
        "In this version (0.1.0), there are 10 variables in the full set and 4 variables in the core set."
    ));
    assert!(readme.ends_with("1. Emissions: 2\n1. Land Cover: 2\n"));
}

#[test]
fn rerun_overwrites_and_is_byte_identical() {
    let dir = tempdir().expect("temp dir");
    let source = fixture(dir.path());
    let out_dir = dir.path().join("generated");

    let full = read_sheet(&source, DEFAULT_SHEET).expect("read");
    let core = full.core_subset();

    let first = write_artifacts(&source, &full, &core, "1.2.0", &out_dir).expect("first");
    let csv_first = std::fs::read(&first.core_variables).expect("csv");
    let readme_first = std::fs::read(&first.readme).expect("readme");

    let second = write_artifacts(&source, &full, &core, "1.2.0", &out_dir).expect("second");
    assert_eq!(first, second);
    assert_eq!(std::fs::read(&second.core_variables).expect("csv"), csv_first);
    assert_eq!(std::fs::read(&second.readme).expect("readme"), readme_first);
}

#[test]
fn missing_source_propagates_io_error() {
    let dir = tempdir().expect("temp dir");
    let source = fixture(dir.path());
    let full = read_sheet(&source, DEFAULT_SHEET).expect("read");
    let core = full.core_subset();

    let result = write_artifacts(
        &dir.path().join("gone.xlsx"),
        &full,
        &core,
        "1.0.0",
        &dir.path().join("generated"),
    );
    assert!(matches!(result, Err(CoreVariablesError::Io(_))));
}
