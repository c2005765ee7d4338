//! Cross-cutting validation errors.
//!
//! Storage and transport failures are defined in their own crates
//! (`StoreError`, `TransportError`); payload validation is the one error
//! family that originates from core types themselves.

use thiserror::Error;

/// A caller-supplied payload was rejected before reaching storage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required text field was empty.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// A choice question carried no options.
    #[error("question '{question_id}' has no options")]
    NoOptions { question_id: String },

    /// A choice question listed the same option twice.
    #[error("question '{question_id}' has duplicate option '{option}'")]
    DuplicateOption { question_id: String, option: String },

    /// Numeric bounds were inverted.
    #[error("question '{question_id}' has inverted bounds ({min} > {max})")]
    InvertedBounds {
        question_id: String,
        min: f64,
        max: f64,
    },

    /// A text question allowed zero characters.
    #[error("question '{question_id}' has a zero max length")]
    ZeroMaxLength { question_id: String },

    /// A record referenced a job that does not exist.
    #[error("unknown job id '{job_id}'")]
    UnknownJob { job_id: String },
}
