//! Query error types.

use common::InvalidArgument;
use domain::RepositoryError;
use thiserror::Error;

/// Errors that can occur while answering a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The repository failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The query carried a malformed value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
