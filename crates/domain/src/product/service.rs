//! Product service providing a simplified API for catalog operations.

use crate::command::{CommandHandler, CommandResult};
use crate::dispatcher::EventDispatcher;
use crate::error::DomainError;

use super::{
    CreateProduct, CreateProductHandler, DeleteProduct, DeleteProductHandler, ProductRepository,
    UpdateProduct, UpdateProductHandler, UpdateVariant, UpdateVariantHandler,
};

/// Service for managing products.
///
/// Wraps one handler per command and forwards the events each handler
/// returns to the dispatcher once the product has been saved. A dispatch
/// failure is reported to the caller, but the save is not undone.
pub struct ProductService<R: ProductRepository + Clone, D: EventDispatcher> {
    create: CreateProductHandler<R>,
    update: UpdateProductHandler<R>,
    delete: DeleteProductHandler<R>,
    update_variant: UpdateVariantHandler<R>,
    dispatcher: D,
}

impl<R: ProductRepository + Clone, D: EventDispatcher> ProductService<R, D> {
    /// Creates a new product service sharing `repository` across handlers.
    pub fn new(repository: R, dispatcher: D) -> Self {
        Self {
            create: CreateProductHandler::new(repository.clone()),
            update: UpdateProductHandler::new(repository.clone()),
            delete: DeleteProductHandler::new(repository.clone()),
            update_variant: UpdateVariantHandler::new(repository),
            dispatcher,
        }
    }

    /// Creates a product and announces it.
    #[tracing::instrument(skip(self, cmd), fields(name = %cmd.name))]
    pub async fn create_product(&self, cmd: CreateProduct) -> Result<CommandResult, DomainError> {
        let result = self.create.handle(cmd).await?;
        self.publish(&result).await?;
        Ok(result)
    }

    /// Updates a product.
    #[tracing::instrument(skip(self, cmd), fields(product_id = %cmd.product_id))]
    pub async fn update_product(&self, cmd: UpdateProduct) -> Result<CommandResult, DomainError> {
        let result = self.update.handle(cmd).await?;
        self.publish(&result).await?;
        Ok(result)
    }

    /// Deletes a product and its variants.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, cmd: DeleteProduct) -> Result<(), DomainError> {
        self.delete.handle(cmd).await
    }

    /// Partially updates one variant.
    #[tracing::instrument(skip(self, cmd), fields(product_id = %cmd.product_id))]
    pub async fn update_variant(&self, cmd: UpdateVariant) -> Result<CommandResult, DomainError> {
        let result = self.update_variant.handle(cmd).await?;
        self.publish(&result).await?;
        Ok(result)
    }

    async fn publish(&self, result: &CommandResult) -> Result<(), DomainError> {
        for event in &result.events {
            self.dispatcher.dispatch(event).await?;
        }
        Ok(())
    }
}
