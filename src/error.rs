//! Error types for the resonance network.

use thiserror::Error;

/// Errors reported by configuration and input operations.
///
/// Numeric degeneracies inside the similarity operators are never reported
/// here; they are clamped where they occur.
#[derive(Error, Debug)]
pub enum ArtError {
    /// JSON parsing error while loading a configuration
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A columnar schema whose per-field arrays disagree in length
    #[error("Schema mismatch: column `{column}` has {got} entries, expected {expected}")]
    SchemaMismatch {
        column: &'static str,
        expected: usize,
        got: usize,
    },

    /// Structurally valid schema with an illegal value
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Field index past the end of the schema
    #[error("Field {index} out of range: schema has {count} fields")]
    FieldOutOfRange { index: usize, count: usize },

    /// Encoded input shorter than the field it targets
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Input carrying NaN or infinity
    #[error("Non-finite value in input for field {field}")]
    NonFiniteInput { field: usize },
}

/// Result type alias for network operations.
pub type Result<T> = std::result::Result<T, ArtError>;
