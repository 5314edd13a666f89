//! Error types for sqlol

use thiserror::Error;

/// Result type alias for sqlol operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Failures raised while producing SQL text.
///
/// Every variant describes a mismatch between code and schema (a value that
/// cannot be serialized, a column the record does not have, a statement that
/// is missing a required clause). Callers usually treat them as fatal; empty
/// operands and empty condition lists are never reported here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// JSON fallback encoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A valuer could not produce its native value
    #[error("Valuer error: {0}")]
    Valuer(String),

    /// A column name does not resolve on the record
    #[error("No field '{field}' in record '{record}'")]
    UnknownField { field: String, record: &'static str },

    /// Statement assembly misuse
    #[error("Validation error: {0}")]
    Validation(String),
}

impl SqlError {
    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an unknown-field error for a record type
    pub fn unknown_field(field: impl Into<String>, record: &'static str) -> Self {
        Self::UnknownField {
            field: field.into(),
            record,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is an unknown-field error
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField { .. })
    }

    /// Check if this error came from value encoding (JSON or valuer)
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Serialization(_) | Self::Valuer(_))
    }
}

impl From<serde_json::Error> for SqlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
