//! Result workbook
//!
//! The report rows with a model, every original column kept, plus the
//! `Znalezione ID` column.

use crate::error::{IdMatchError, Result};
use laptop_id_common::export::excel_core::generate_table_buffer;
use laptop_id_common::SelectionReport;
use std::path::{Path, PathBuf};

/// Suffix appended to the input file stem.
pub const RESULT_SUFFIX: &str = "_znalezione";
const SHEET_NAME: &str = "Wyniki";

/// `<output_dir>/<input stem>_znalezione.xlsx`
pub fn result_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("wynik");
    output_dir.join(format!("{}{}.xlsx", stem, RESULT_SUFFIX))
}

/// Writes the result workbook and returns its path.
///
/// # Arguments
/// * `report` - matching outcome, in input order
/// * `input_headers` - header row of the input report
/// * `input` - input report path (names the output)
/// * `output_dir` - existing directory receiving the workbook
pub fn write_results(
    report: &SelectionReport,
    input_headers: &[String],
    input: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    if !output_dir.is_dir() {
        return Err(IdMatchError::WriteFailure(format!(
            "{} is not a directory",
            output_dir.display()
        )));
    }

    let headers = SelectionReport::result_headers(input_headers);
    let rows = report.result_rows(input_headers.len());
    let buffer = generate_table_buffer(SHEET_NAME, &headers, &rows)
        .map_err(IdMatchError::WriteFailure)?;

    let path = result_path(input, output_dir);
    std::fs::write(&path, buffer)
        .map_err(|e| IdMatchError::WriteFailure(format!("{}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), rows = rows.len(), "results written");
    Ok(path)
}
