//! Repository-level error types.

use thiserror::Error;

/// Errors surfaced by the persistence layer.
///
/// Raw driver errors are stringified here and logged where they occur;
/// they never cross into client responses as-is.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Query timed out")]
    Timeout,

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}
