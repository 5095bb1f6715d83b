/// Error types for loading station and observation tables
use thiserror::Error;

/// Main error type for nivo table parsing
#[derive(Error, Debug)]
pub enum NivoError {
    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing column `{column}` in {table} table")]
    MissingColumn { table: &'static str, column: &'static str },

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),
}

/// Type alias for Results using NivoError
pub type Result<T> = std::result::Result<T, NivoError>;
