//! Result table xlsx generation
//!
//! Writes a plain result table: bold header row, one string cell per value.

use rust_xlsxwriter::*;

/// Column width used when no cell is wider (characters).
const MIN_COL_WIDTH: f64 = 8.0;
/// Widest column we size to (characters).
const MAX_COL_WIDTH: f64 = 60.0;

/// Builds an xlsx workbook in memory.
///
/// # Arguments
/// * `sheet_name` - worksheet name
/// * `headers` - header row
/// * `rows` - data rows (string cells)
pub fn generate_table_buffer(
    sheet_name: &str,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| format!("sheet name: {}", e))?;

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(|e| format!("header write: {}", e))?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string((row_idx + 1) as u32, col as u16, value)
                .map_err(|e| format!("cell write: {}", e))?;
        }
    }

    for col in 0..headers.len() {
        let widest = std::iter::once(headers[col].chars().count())
            .chain(rows.iter().map(|r| r.get(col).map(|v| v.chars().count()).unwrap_or(0)))
            .max()
            .unwrap_or(0) as f64;
        worksheet
            .set_column_width(col as u16, (widest + 2.0).clamp(MIN_COL_WIDTH, MAX_COL_WIDTH))
            .map_err(|e| format!("column width: {}", e))?;
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("freeze panes: {}", e))?;

    workbook
        .save_to_buffer()
        .map_err(|e| format!("save workbook: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_table_buffer() {
        let headers = vec!["Lp.".to_string(), "Znalezione ID".to_string()];
        let rows = vec![
            vec!["1".to_string(), "101, 102".to_string()],
            vec!["2".to_string(), "brak".to_string()],
        ];
        let buffer = generate_table_buffer("Arkusz1", &headers, &rows).unwrap();
        // xlsx is a zip archive
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_invalid_sheet_name() {
        let result = generate_table_buffer("bad[name]", &[], &[]);
        assert!(result.is_err());
    }
}
