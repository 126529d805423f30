//! Error types for the tidypost library.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input dataset could not be read or is malformed.
    DataSource,
    /// The cleaned dataset or report could not be written.
    DataSink,
    /// A value reached a stage in a shape that stage does not accept.
    FieldType,
}

/// Main error type for tidypost operations.
#[derive(Debug, Error)]
pub enum TidyError {
    /// Error reading or accessing the input file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library while reading.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed row in the input.
    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// A required column is absent from the header.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// Empty file or no header to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Error writing the output file.
    #[error("Cannot write '{path}': {message}")]
    Sink { path: PathBuf, message: String },

    /// A value has the wrong shape for the stage reading it.
    #[error("Field type error at row {row}, column '{column}': {message}")]
    FieldType {
        row: usize,
        column: String,
        message: String,
    },

    /// Error serializing the run report.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TidyError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TidyError::Io { .. }
            | TidyError::Csv(_)
            | TidyError::Parse { .. }
            | TidyError::MissingColumn(_)
            | TidyError::EmptyData(_) => ErrorKind::DataSource,
            TidyError::Sink { .. } | TidyError::Json(_) => ErrorKind::DataSink,
            TidyError::FieldType { .. } => ErrorKind::FieldType,
        }
    }

    pub(crate) fn field_type(row: usize, column: &str, message: impl Into<String>) -> Self {
        TidyError::FieldType {
            row,
            column: column.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn sink(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        TidyError::Sink {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for tidypost operations.
pub type Result<T> = std::result::Result<T, TidyError>;
