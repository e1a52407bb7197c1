use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdMatchError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Catalog or report cannot be opened, fetched or parsed.
    #[error("Cannot open source: {0}")]
    SourceUnavailable(String),

    /// Output directory missing or not writable.
    #[error("Cannot write output: {0}")]
    WriteFailure(String),

    #[error("Run cancelled")]
    Cancelled,

    #[error("Worker failed: {0}")]
    Worker(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(laptop_id_common::Error),
}

impl From<laptop_id_common::Error> for IdMatchError {
    fn from(err: laptop_id_common::Error) -> Self {
        match err {
            laptop_id_common::Error::Cancelled => IdMatchError::Cancelled,
            other => IdMatchError::Common(other),
        }
    }
}

impl From<tokio::task::JoinError> for IdMatchError {
    fn from(err: tokio::task::JoinError) -> Self {
        IdMatchError::Worker(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IdMatchError>;
