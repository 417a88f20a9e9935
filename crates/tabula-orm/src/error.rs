//! Error types for the ORM.

use tabula_schema::SchemaError;
use thiserror::Error;

/// ORM-specific errors.
#[derive(Debug, Error)]
pub enum OrmError {
    /// Invalid table schema.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A table needed by an association could not be resolved.
    #[error("table not found: {0}")]
    MissingTable(String),

    /// Query building error, raised by query implementations.
    #[error("query error: {0}")]
    Query(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for ORM operations.
pub type Result<T> = std::result::Result<T, OrmError>;
