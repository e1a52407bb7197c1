//! Tabular row/column contract
//!
//! Loaders hand over a `Table` of string cells. Typed rows are parsed out of
//! it here, failing loudly when a mandatory column is absent.

use crate::error::{Error, Result};
use crate::types::{InputUnit, RawCatalogRow};

/// Catalog column holding the identifier.
pub const CATALOG_ID_COLUMN: &str = "ID";
/// Catalog name columns, in order of preference.
pub const CATALOG_NAME_COLUMNS: &[&str] = &["Pełna nazwa", "Nazwa"];

/// Mandatory input report columns.
pub mod input_columns {
    pub const ORDINAL: &str = "Lp.";
    pub const SERIAL: &str = "S/N";
    pub const MANUFACTURER: &str = "Producent";
    pub const MODEL: &str = "Model";
    pub const PROCESSOR: &str = "Procesor";
    pub const TARGET_SPEC: &str = "Docelowa";
    pub const GRAPHICS: &str = "Grafika";
    pub const DISPLAY: &str = "Wyświetlacz";
    pub const WINDOWS: &str = "Windows";
    pub const CLASS: &str = "Klasa";
}

/// String table with a header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Name used in error messages ("catalog", "input").
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table from raw rows; the first row is the header.
    /// Fully blank rows are dropped.
    pub fn from_rows(name: &str, mut rows: Vec<Vec<String>>) -> Self {
        if rows.is_empty() {
            return Self {
                name: name.to_string(),
                ..Default::default()
            };
        }
        let headers = rows
            .remove(0)
            .into_iter()
            .map(|h| h.trim().trim_matches('\u{feff}').to_string())
            .collect();
        let rows = rows
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .collect();
        Self {
            name: name.to_string(),
            headers,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column, or `MissingColumn`.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Index of the first present column among `names`.
    pub fn column_any(&self, names: &[&str]) -> Result<usize> {
        names
            .iter()
            .find_map(|name| self.headers.iter().position(|h| h == name))
            .ok_or_else(|| Error::MissingColumn {
                table: self.name.clone(),
                column: names.join(" | "),
            })
    }

    /// Cell text; short rows read as empty.
    pub fn cell<'a>(row: &'a [String], index: usize) -> &'a str {
        row.get(index).map(String::as_str).unwrap_or("")
    }
}

impl RawCatalogRow {
    /// Parses catalog rows. `ID` and a name column are mandatory; other
    /// columns (such as `Producent`) are ignored.
    pub fn from_table(table: &Table) -> Result<Vec<RawCatalogRow>> {
        let id = table.column(CATALOG_ID_COLUMN)?;
        let name = table.column_any(CATALOG_NAME_COLUMNS)?;

        Ok(table
            .rows
            .iter()
            .map(|row| RawCatalogRow {
                id: Table::cell(row, id).trim().to_string(),
                name: Table::cell(row, name).to_string(),
            })
            .collect())
    }
}

impl InputUnit {
    /// Parses report rows. Every report column is mandatory.
    ///
    /// Field values are trimmed before scoring ("i5 " reads as "i5");
    /// `cells` keeps the untouched text for the result table.
    pub fn from_table(table: &Table) -> Result<Vec<InputUnit>> {
        use input_columns::*;

        let ordinal = table.column(ORDINAL)?;
        let serial = table.column(SERIAL)?;
        let manufacturer = table.column(MANUFACTURER)?;
        let model = table.column(MODEL)?;
        let processor = table.column(PROCESSOR)?;
        let target_spec = table.column(TARGET_SPEC)?;
        let graphics = table.column(GRAPHICS)?;
        let display = table.column(DISPLAY)?;
        let windows = table.column(WINDOWS)?;
        let class = table.column(CLASS)?;

        Ok(table
            .rows
            .iter()
            .map(|row| {
                let get = |index: usize| Table::cell(row, index).trim().to_string();
                InputUnit {
                    ordinal: get(ordinal),
                    serial: get(serial),
                    manufacturer: get(manufacturer),
                    model: get(model),
                    processor: get(processor),
                    target_spec: get(target_spec),
                    graphics: get(graphics),
                    display: get(display),
                    windows_edition: get(windows),
                    device_class: get(class),
                    cells: row.clone(),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn report_header() -> Vec<String> {
        strings(&[
            "Lp.", "S/N", "Producent", "Model", "Procesor", "Docelowa", "Grafika",
            "Wyświetlacz", "Windows", "Klasa",
        ])
    }

    #[test]
    fn test_from_rows_skips_blank_rows() {
        let table = Table::from_rows(
            "catalog",
            vec![
                strings(&["ID", "Nazwa"]),
                strings(&["1", "Laptop HP 450 / i5 / 8GB / BRAK DYSKU"]),
                strings(&["", "  "]),
            ],
        );
        assert_eq!(table.headers, strings(&["ID", "Nazwa"]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_catalog_name_column_alternatives() {
        let table = Table::from_rows(
            "catalog",
            vec![
                strings(&["Producent", "ID", "Pełna nazwa"]),
                strings(&["Lenovo", "17", "Laptop Lenovo T480 / i5 / 8GB / BRAK DYSKU"]),
            ],
        );
        let rows = RawCatalogRow::from_table(&table).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "17");
        assert!(rows[0].name.starts_with("Laptop Lenovo"));
    }

    #[test]
    fn test_catalog_missing_name_column() {
        let table = Table::from_rows("catalog", vec![strings(&["ID", "Opis"])]);
        let err = RawCatalogRow::from_table(&table).unwrap_err();
        match err {
            Error::MissingColumn { table, column } => {
                assert_eq!(table, "catalog");
                assert_eq!(column, "Pełna nazwa | Nazwa");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_input_units_keep_cells() {
        let table = Table::from_rows(
            "input",
            vec![
                report_header(),
                strings(&[
                    "1", "PF1ABC", "Lenovo", "T480", "i5", "8 256", "", "FHD", "win11pro", "A",
                ]),
            ],
        );
        let units = InputUnit::from_table(&table).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].serial, "PF1ABC");
        assert_eq!(units[0].target_spec, "8 256");
        assert_eq!(units[0].cells.len(), 10);
    }

    #[test]
    fn test_input_missing_column_fails_loudly() {
        let mut header = report_header();
        header.retain(|h| h != "Docelowa");
        let table = Table::from_rows("input", vec![header]);
        assert!(matches!(
            InputUnit::from_table(&table),
            Err(Error::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_short_row_reads_empty() {
        let row = strings(&["1"]);
        assert_eq!(Table::cell(&row, 0), "1");
        assert_eq!(Table::cell(&row, 5), "");
    }

    #[test]
    fn test_input_fields_trimmed_cells_untouched() {
        let table = Table::from_rows(
            "input",
            vec![
                report_header(),
                strings(&[
                    "1", " PF1ABC", "Lenovo ", "T480", "i5 ", "8 256", "", " FHD", "win11pro", "A ",
                ]),
            ],
        );
        let units = InputUnit::from_table(&table).unwrap();
        assert_eq!(units[0].processor, "i5");
        assert_eq!(units[0].manufacturer, "Lenovo");
        assert_eq!(units[0].display, "FHD");
        assert_eq!(units[0].device_class, "A");
        assert_eq!(units[0].cells[4], "i5 ");
        assert_eq!(units[0].cells[1], " PF1ABC");
    }
}
