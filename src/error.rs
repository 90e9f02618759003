//! Error types for the orrery normalization pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - spreadsheet parsing errors
//! - [`TransformError`] - row transformation errors
//! - [`ValidationError`] - schema and invariant violations
//! - [`PipelineError`] - top-level orchestration errors
//! - [`ServerError`] - static file server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during spreadsheet parsing.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode source bytes.
    #[error("Failed to decode content as {0}")]
    EncodingError(String),

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    ParseError(String),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

impl From<csv::Error> for CsvError {
    fn from(e: csv::Error) -> Self {
        CsvError::ParseError(e.to_string())
    }
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors during row transformation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Missing required source column.
    #[error("Missing source column: {0}")]
    MissingColumn(String),

    /// A row could not be turned into a record.
    #[error("Row {row}: {message}")]
    RowFailed { row: usize, message: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors during atlas validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Schema validation failed.
    #[error("Validation failed: {errors:?}")]
    SchemaError { errors: Vec<String> },

    /// A record's parent does not reference any known body.
    #[error("Body '{id}' references unknown parent '{parent}'")]
    UnknownParent { id: String, parent: String },

    /// Invalid field value.
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::transform::pipeline::transform_csv`].
/// It wraps all lower-level errors and adds pipeline-specific variants.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No usable rows in the source table.
    #[error("No rows to transform")]
    EmptyInput,
}

// =============================================================================
// Server Errors
// =============================================================================

/// Static file server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Could not bind the listening socket (port in use, permissions).
    #[error("Failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// Serve loop failed.
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),

    /// The served directory does not exist.
    #[error("Directory not found: {0}")]
    MissingDirectory(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
