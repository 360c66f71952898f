//! Domain-level error types.

use thiserror::Error;

/// Domain errors - outcomes of a quota decision that are not a remaining count.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Note edits exhausted")]
    QuotaExhausted,

    #[error("Edit store failure: {0}")]
    Store(#[from] RepoError),
}

impl DomainError {
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidRequest(detail.into())
    }
}

/// Repository-level errors. Every variant means the store could not answer.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Stored record is invalid: {0}")]
    InvalidRecord(String),
}
