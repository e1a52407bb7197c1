//! Catalog and report sources
//!
//! A catalog locator is either a local file or an `http(s)` URL. Both end up
//! as a `Table` handed to the core for typed parsing.

pub mod remote;
pub mod spreadsheet;

use crate::config::DEFAULT_WORKSHEET;
use crate::error::Result;
use laptop_id_common::Table;
use std::fmt;
use std::path::{Path, PathBuf};

/// Table names used in `MissingColumn` errors.
pub const CATALOG_TABLE: &str = "catalog";
pub const INPUT_TABLE: &str = "input";

/// Where the catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Remote { url: String, worksheet: String },
}

impl CatalogSource {
    /// `http://` and `https://` locators are remote, anything else is a path.
    pub fn parse(locator: &str) -> Self {
        Self::parse_with_worksheet(locator, DEFAULT_WORKSHEET)
    }

    pub fn parse_with_worksheet(locator: &str, worksheet: &str) -> Self {
        let locator = locator.trim();
        let lower = locator.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Remote {
                url: locator.to_string(),
                worksheet: worksheet.to_string(),
            }
        } else {
            CatalogSource::File(PathBuf::from(locator))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, CatalogSource::Remote { .. })
    }

    /// File name of the cleaned catalog dump for this kind of source.
    pub fn dump_file_name(&self) -> &'static str {
        if self.is_remote() {
            "outputID-fromURL.csv"
        } else {
            "outputID.csv"
        }
    }

    /// Loads the raw catalog table.
    pub async fn load(&self, credentials: Option<&Path>) -> Result<Table> {
        match self {
            CatalogSource::File(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || spreadsheet::read_table(&path, CATALOG_TABLE))
                    .await?
            }
            CatalogSource::Remote { url, worksheet } => {
                let rows = remote::fetch_rows(url, worksheet, credentials).await?;
                Ok(Table::from_rows(CATALOG_TABLE, rows))
            }
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Remote { url, .. } => write!(f, "{}", url),
        }
    }
}

/// Loads the report table.
pub fn load_input(path: &Path) -> Result<Table> {
    spreadsheet::read_table(path, INPUT_TABLE)
}
