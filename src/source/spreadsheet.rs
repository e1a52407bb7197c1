//! Local table files
//!
//! `.csv` goes through the `csv` crate; workbooks (`xlsx`, `xlsm`, `xls`,
//! `ods`) through calamine, first worksheet only.

use crate::error::{IdMatchError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use laptop_id_common::Table;
use std::io::Read;
use std::path::Path;

/// Reads a local file into a `Table` named `name`.
pub fn read_table(path: &Path, name: &str) -> Result<Table> {
    if !path.exists() {
        return Err(IdMatchError::FileNotFound(path.display().to_string()));
    }

    let rows = if is_csv(path) {
        let file = std::fs::File::open(path)
            .map_err(|e| unavailable(path, e))?;
        read_csv_rows(file).map_err(|e| unavailable(path, e))?
    } else {
        read_workbook_rows(path)?
    };

    let table = Table::from_rows(name, rows);
    tracing::debug!(
        path = %path.display(),
        table = name,
        columns = table.headers.len(),
        rows = table.len(),
        "table loaded"
    );
    Ok(table)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Reads every CSV record as a row of strings; the header is the first row.
pub fn read_csv_rows<R: Read>(reader: R) -> std::result::Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect()
}

fn read_workbook_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| unavailable(path, e))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| unavailable(path, "workbook has no worksheets"))?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| unavailable(path, e))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

/// Cell rendered as text; whole floats lose their fraction ("101.0" -> "101").
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

fn unavailable(path: &Path, reason: impl std::fmt::Display) -> IdMatchError {
    IdMatchError::SourceUnavailable(format!("{}: {}", path.display(), reason))
}
