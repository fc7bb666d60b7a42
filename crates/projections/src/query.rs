//! Query objects and the handler contract.

use async_trait::async_trait;
use domain::ProductId;

use crate::Result;

/// Trait for queries.
///
/// Queries never change the catalog.
pub trait Query: Send + Sync {
    /// What a successful execution returns.
    type Output: Send;
}

/// Answers one kind of query.
#[async_trait]
pub trait QueryHandler<Q: Query + 'static>: Send + Sync {
    /// Executes the query.
    async fn handle(&self, query: Q) -> Result<Q::Output>;
}

/// Lists every product with its variants.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAllProducts;

impl Query for GetAllProducts {
    type Output = Vec<crate::ProductResponse>;
}

/// Looks up one product.
///
/// An unknown ID is not an error: the handler answers `None`.
#[derive(Debug, Clone, Copy)]
pub struct GetProductById {
    pub product_id: ProductId,
}

impl GetProductById {
    /// Creates a new query for `product_id`.
    pub fn new(product_id: ProductId) -> Self {
        Self { product_id }
    }

    /// Creates a query from a raw UUID string.
    ///
    /// Fails with `QueryError::InvalidArgument` if `raw` is not a UUID.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Self::new(ProductId::parse(raw)?))
    }
}

impl Query for GetProductById {
    type Output = Option<crate::ProductResponse>;
}
