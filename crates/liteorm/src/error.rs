//! Error types for liteorm

use thiserror::Error;

/// Result type alias for liteorm operations
pub type LiteResult<T> = Result<T, LiteError>;

/// Error types raised while building, rendering, or mapping statements.
#[derive(Debug, Error)]
pub enum LiteError {
    /// A referenced column is absent from the bound table schema
    #[error("Unknown column '{column}' on table '{table}'")]
    SchemaMismatch { table: String, column: String },

    /// A table name could not be resolved through the registry
    #[error("Unknown table '{0}'")]
    UnknownTable(String),

    /// A column reference does not fit the scope it is used in
    /// (bare column in join scope, alias-qualified column in table scope,
    /// or an alias with no binding)
    #[error("Alias context error: {0}")]
    MissingAliasContext(String),

    /// Batched insert invoked with zero rows
    #[error("Batch insert requires at least one row")]
    EmptyBatch,

    /// A join edge references an alias with no introducing JOIN
    #[error("Malformed join: {0}")]
    MalformedJoin(String),

    /// A predicate token sequence cannot render to well-formed SQL
    #[error("Unbalanced predicate group: {0}")]
    UnbalancedGroup(String),

    /// Value could not be encoded as a SQL literal
    #[error("Encode error on column '{column}': {message}")]
    Encode { column: String, message: String },

    /// Raw cell could not be decoded into a typed value
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Builder misuse detected before execution
    #[error("Validation error: {0}")]
    Validation(String),

    /// Execution-layer failure, passed through from the driver untouched
    #[error("Driver error: {0}")]
    Driver(String),
}

impl LiteError {
    /// Create a schema mismatch error for a column lookup failure.
    pub fn schema_mismatch(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create an encode error for a specific column.
    pub fn encode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a decode error for a specific column.
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a driver pass-through error.
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver(message.into())
    }

    /// Check if this is a schema mismatch error
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch { .. })
    }

    /// Check if this is a malformed join error
    pub fn is_malformed_join(&self) -> bool {
        matches!(self, Self::MalformedJoin(_))
    }

    /// Check if this is an empty batch error
    pub fn is_empty_batch(&self) -> bool {
        matches!(self, Self::EmptyBatch)
    }
}
