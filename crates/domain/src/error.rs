//! Domain error types.

use common::InvalidArgument;
use thiserror::Error;

use crate::dispatcher::DispatchError;
use crate::product::{ProductId, VariantId};

/// Errors that can occur during product command handling.
///
/// `NotFound`, `DuplicateName` and `VariantNotFound` are business-rule
/// violations; `InvalidArgument` is a malformed primitive value. Both are
/// recoverable by the caller.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No product exists with the given ID.
    #[error("Product not found: {product_id}")]
    NotFound { product_id: ProductId },

    /// Another product already uses the name.
    #[error("A product with that name already exists: {name}")]
    DuplicateName { name: String },

    /// The product has no variant with the given ID.
    #[error("Variant not found: {variant_id} in product {product_id}")]
    VariantNotFound {
        product_id: ProductId,
        variant_id: VariantId,
    },

    /// A value object or entity rejected its input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// The repository failed or rejected a stale write.
    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    /// A listener failed while handling a dispatched event.
    #[error("Event dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

impl DomainError {
    /// Returns true for the not-found family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::NotFound { .. } | DomainError::VariantNotFound { .. }
        )
    }

    /// Returns true when the product changed under the caller.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::Repository(RepositoryError::ConcurrencyConflict { .. })
        )
    }

    /// Returns true for business-rule violations, conflicts and invalid input.
    pub fn is_client_error(&self) -> bool {
        match self {
            DomainError::Repository(_) => self.is_conflict(),
            DomainError::Dispatch(_) => false,
            _ => true,
        }
    }
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { product_id } => DomainError::NotFound { product_id },
            RepositoryError::DuplicateName { name } => DomainError::DuplicateName { name },
            other => DomainError::Repository(other),
        }
    }
}

/// Errors raised by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The product is not stored.
    #[error("Product not found: {product_id}")]
    NotFound { product_id: ProductId },

    /// Another stored product uses the name.
    #[error("A product with that name already exists: {name}")]
    DuplicateName { name: String },

    /// The stored product is at a different version than the written copy.
    #[error(
        "Concurrency conflict for product {product_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        product_id: ProductId,
        expected: u64,
        actual: u64,
    },
}
