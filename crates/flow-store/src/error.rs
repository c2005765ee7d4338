//! Storage error types for flow-store.

use flow_core::errors::ValidationError;
use thiserror::Error;

/// Errors from collection and mutation operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `add` hit an existing key. Should not occur with generated ids;
    /// treat as internal if seen outside tests.
    #[error("duplicate key '{key}' in {collection}")]
    DuplicateKey {
        collection: &'static str,
        key: String,
    },

    /// An update targeted an absent key. Not retriable without a re-query.
    #[error("no {collection} record with key '{key}'")]
    NotFound {
        collection: &'static str,
        key: String,
    },

    /// Caller-supplied payload rejected before reaching storage.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A SQL query failed or returned an unexpected shape.
    #[error("query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("migration failed: {0}")]
    Migration(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// Map a libSQL insert error onto `DuplicateKey` when the primary key
    /// collided, passing other errors through.
    #[must_use]
    pub fn from_insert(e: libsql::Error, collection: &'static str, key: &str) -> Self {
        if e.to_string().contains("UNIQUE constraint failed") {
            Self::DuplicateKey {
                collection,
                key: key.to_string(),
            }
        } else {
            Self::LibSql(e)
        }
    }
}
