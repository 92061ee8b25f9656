//! Error types for listing-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in listing-core
#[derive(Debug, Error)]
pub enum Error {
    /// A mandatory logical field has no matching source column
    #[error("required column '{field}' not found in input")]
    MissingRequiredColumn { field: String },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV
    #[error("failed to parse CSV '{path}': {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Spreadsheet could not be opened or its first sheet read
    #[error("failed to read workbook '{path}': {message}")]
    Workbook { path: PathBuf, message: String },

    /// Spreadsheet could not be written
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// File extension or export format we don't handle
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A column whose length differs from the rest of the table
    #[error("column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Configuration is syntactically fine but unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML for our schema
    #[error("failed to parse config '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build the error raised when `field` cannot be resolved
    pub fn missing_column(field: impl Into<String>) -> Self {
        Error::MissingRequiredColumn {
            field: field.into(),
        }
    }
}
