//! Product persistence boundary.

use async_trait::async_trait;

use crate::error::RepositoryError;

use super::{Product, ProductId};

/// Core trait for product repositories.
///
/// Writes are checked and applied under one lock or transaction: name
/// uniqueness and the version check happen in the same step as the write,
/// so two concurrent handlers cannot both pass a check and then both
/// write. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Stores a new product, variants included, and sets its version.
    ///
    /// # Errors
    ///
    /// `DuplicateName` if any stored product already uses the name.
    async fn insert(&self, product: &mut Product) -> Result<(), RepositoryError>;

    /// Replaces a stored product, variants included, and bumps its version.
    ///
    /// The stored variant set always matches `product.variants()` after
    /// the call; variants removed from the aggregate are removed from the
    /// store.
    ///
    /// # Errors
    ///
    /// `NotFound` if the product is gone, `ConcurrencyConflict` if it was
    /// written since `product` was loaded, `DuplicateName` if another
    /// product uses the name.
    async fn update(&self, product: &mut Product) -> Result<(), RepositoryError>;

    /// Retrieves a product by ID.
    ///
    /// Returns None if the product doesn't exist.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Retrieves a product by exact, case-sensitive name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError>;

    /// Retrieves every product.
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Removes a product and all of its variants atomically.
    ///
    /// # Errors
    ///
    /// `NotFound` if the product is gone, `ConcurrencyConflict` if it was
    /// written since `product` was loaded.
    async fn delete(&self, product: &Product) -> Result<(), RepositoryError>;
}
