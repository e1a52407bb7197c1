//! Cleaned catalog CSV dump, for inspecting what cleaning kept.

use crate::error::{IdMatchError, Result};
use laptop_id_common::CatalogEntry;
use std::path::{Path, PathBuf};

/// Writes `entries` to `dir/file_name`, one row per entry.
pub fn write_catalog_dump(entries: &[CatalogEntry], dir: &Path, file_name: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    let failure = |e: &dyn std::fmt::Display| {
        IdMatchError::WriteFailure(format!("{}: {}", path.display(), e))
    };

    let mut writer = csv::Writer::from_path(&path).map_err(|e| failure(&e))?;
    for entry in entries {
        writer.serialize(entry).map_err(|e| failure(&e))?;
    }
    writer.flush().map_err(|e| failure(&e))?;

    tracing::debug!(path = %path.display(), entries = entries.len(), "catalog dump written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use laptop_id_common::extract_attributes;

    #[test]
    fn test_dump_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![CatalogEntry::new(
            "101",
            extract_attributes("Laptop Lenovo ThinkPad T480 / i5 / 8GB / BRAK DYSKU"),
        )];
        let path = write_catalog_dump(&entries, dir.path(), "outputID.csv").unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Manufacturer,Model,Processor,RAM,HDD,Graphics,Resolution,Touchscreen,Windows,Class")
        );
        assert!(lines.next().unwrap().starts_with("101,Lenovo,ThinkPad T480,i5,"));
    }

    #[test]
    fn test_missing_dir_is_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_catalog_dump(&[], &dir.path().join("missing"), "outputID.csv").unwrap_err();
        assert!(matches!(err, IdMatchError::WriteFailure(_)));
    }
}
