//! Error types

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// A mandatory column is absent from a loaded table.
    #[error("Missing column '{column}' in {table} table")]
    MissingColumn { table: String, column: String },

    /// The caller cancelled the run.
    #[error("Run cancelled")]
    Cancelled,
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_column() {
        let error = Error::MissingColumn {
            table: "input".to_string(),
            column: "Docelowa".to_string(),
        };
        assert_eq!(format!("{}", error), "Missing column 'Docelowa' in input table");
    }

    #[test]
    fn test_error_display_cancelled() {
        assert_eq!(Error::Cancelled.to_string(), "Run cancelled");
    }
}
