//! Error types for predicate construction and batch setup.

use thiserror::Error;

/// Result type alias using [`PredicateError`].
pub type Result<T> = std::result::Result<T, PredicateError>;

/// Errors raised while building predicates, schemas, or row batches.
///
/// Evaluation never returns these: a predicate applied to a batch that
/// violates the batch invariants panics instead.
#[derive(Debug, Error)]
pub enum PredicateError {
    /// An IN / NOT IN list was built from zero literals.
    #[error("IN list must contain at least one literal")]
    EmptyInList,

    /// A literal could not be converted to the column's value type.
    #[error("Invalid {field_type} literal '{literal}': {reason}")]
    InvalidLiteral {
        field_type: &'static str,
        literal: String,
        reason: String,
    },

    /// Type mismatch between a column and the data or predicate bound to it.
    #[error("Type error: expected {expected}, got {actual}")]
    TypeError { expected: String, actual: String },

    /// Schema-related errors (empty or duplicate field names, etc.).
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// Requested batch capacity cannot be addressed by a `u16` selection vector.
    #[error("Invalid batch capacity {capacity} (max {max})")]
    InvalidBatchCapacity { capacity: usize, max: usize },

    /// Field or Arrow type that has no column representation.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A value could not be converted into its packed column encoding.
    #[error("Conversion error: {0}")]
    ConversionError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_literal_display() {
        let err = PredicateError::InvalidLiteral {
            field_type: "TINYINT",
            literal: "300".into(),
            reason: "number too large to fit in target type".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("TINYINT"));
        assert!(msg.contains("'300'"));
        assert!(msg.contains("too large"));
    }

    #[test]
    fn test_batch_capacity_display() {
        let err = PredicateError::InvalidBatchCapacity {
            capacity: 70_000,
            max: 65_536,
        };
        assert_eq!(err.to_string(), "Invalid batch capacity 70000 (max 65536)");
    }
}
