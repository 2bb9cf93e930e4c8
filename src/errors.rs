use thiserror::Error;

/// Unified error type for ingest, config, and reporting failures.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Import failed: {0}")]
    Import(String),
}

pub type Result<T> = std::result::Result<T, TallyError>;
