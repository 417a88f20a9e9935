//! Error types for schema construction and DDL generation.

/// Errors that can occur while building a schema or generating its SQL.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// An index or constraint was declared with an unknown type or with
    /// columns the table does not have.
    #[error("{0}")]
    InvalidSchema(String),

    /// A dialect failed to render part of a schema.
    #[error("{dialect} dialect error: {message}")]
    Dialect {
        /// Name of the dialect that failed.
        dialect: String,
        /// Error message.
        message: String,
    },

    /// Schema configuration could not be deserialized.
    #[error("Invalid schema configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl SchemaError {
    /// Creates a dialect error.
    #[must_use]
    pub fn dialect(dialect: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dialect {
            dialect: dialect.into(),
            message: message.into(),
        }
    }
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
