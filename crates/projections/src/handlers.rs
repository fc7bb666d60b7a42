//! Read-only query handlers over the product repository.

use async_trait::async_trait;
use domain::ProductRepository;

use crate::Result;
use crate::query::{GetAllProducts, GetProductById, QueryHandler};
use crate::response::ProductResponse;

/// Answers [`GetAllProducts`].
pub struct GetAllProductsHandler<R: ProductRepository> {
    repository: R,
}

impl<R: ProductRepository> GetAllProductsHandler<R> {
    /// Creates a new handler over the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> QueryHandler<GetAllProducts> for GetAllProductsHandler<R> {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, _query: GetAllProducts) -> Result<Vec<ProductResponse>> {
        let products = self.repository.find_all().await?;
        tracing::debug!(count = products.len(), "listing products");
        Ok(products.iter().map(ProductResponse::from_domain).collect())
    }
}

/// Answers [`GetProductById`].
pub struct GetProductByIdHandler<R: ProductRepository> {
    repository: R,
}

impl<R: ProductRepository> GetProductByIdHandler<R> {
    /// Creates a new handler over the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> QueryHandler<GetProductById> for GetProductByIdHandler<R> {
    #[tracing::instrument(skip(self), fields(product_id = %query.product_id))]
    async fn handle(&self, query: GetProductById) -> Result<Option<ProductResponse>> {
        let product = self.repository.find_by_id(&query.product_id).await?;
        Ok(product.as_ref().map(ProductResponse::from_domain))
    }
}
