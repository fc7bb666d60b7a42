//! Product command handlers.
//!
//! Each handler loads what it needs from the repository, mutates a local
//! copy of the aggregate through its methods and writes it back. A failure
//! before the write leaves the stored product untouched. The name check here
//! only fails fast; the repository repeats it atomically with the write, and
//! rejects a copy that went stale while the handler was working on it.

use async_trait::async_trait;

use crate::command::{CommandHandler, CommandResult};
use crate::error::DomainError;

use super::{
    CreateProduct, DeleteProduct, Price, Product, ProductDescription, ProductEvent, ProductId,
    ProductName, ProductRepository, UpdateProduct, UpdateVariant, Variant, VariantId, VariantSpec,
};

/// Builds variants from specs and appends them to `product`.
///
/// Every variant gets a fresh ID. Missing price or stock falls back to the
/// product's current values.
fn append_variants(product: &mut Product, specs: Vec<VariantSpec>) -> Result<(), DomainError> {
    for spec in specs {
        let name = ProductName::new(spec.name)?;
        let price = spec.price.unwrap_or(product.price().value());
        let stock = spec.stock.unwrap_or(product.stock());

        let variant = Variant::new(VariantId::new(), product, name, price, stock, spec.image)?;
        product.add_variant(variant);
    }
    Ok(())
}

/// Fails with `DuplicateName` if a product other than `except` uses `name`.
async fn ensure_name_available<R: ProductRepository>(
    repository: &R,
    name: &ProductName,
    except: Option<ProductId>,
) -> Result<(), DomainError> {
    match repository.find_by_name(name.as_str()).await? {
        Some(existing) if Some(existing.id()) != except => Err(DomainError::DuplicateName {
            name: name.to_string(),
        }),
        _ => Ok(()),
    }
}

async fn load<R: ProductRepository>(
    repository: &R,
    product_id: ProductId,
) -> Result<Product, DomainError> {
    repository
        .find_by_id(&product_id)
        .await?
        .ok_or(DomainError::NotFound { product_id })
}

/// Creates products.
pub struct CreateProductHandler<R: ProductRepository> {
    repository: R,
}

impl<R: ProductRepository> CreateProductHandler<R> {
    /// Creates a new handler over the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> CommandHandler<CreateProduct> for CreateProductHandler<R> {
    #[tracing::instrument(skip(self, command), fields(name = %command.name))]
    async fn handle(&self, command: CreateProduct) -> Result<CommandResult, DomainError> {
        let name = ProductName::new(command.name)?;
        ensure_name_available(&self.repository, &name, None).await?;

        let description = ProductDescription::new(command.description)?;
        let price = Price::new(command.price)?;

        let mut product = Product::new(ProductId::new(), name, description, price, command.stock)?;
        append_variants(&mut product, command.variants)?;

        self.repository.insert(&mut product).await?;

        metrics::counter!("products_created_total").increment(1);
        tracing::info!(
            product_id = %product.id(),
            variants = product.variant_count(),
            "product created"
        );

        let events = vec![ProductEvent::product_created(&product)];
        Ok(CommandResult { product, events })
    }
}

/// Updates products, optionally replacing their variants.
pub struct UpdateProductHandler<R: ProductRepository> {
    repository: R,
}

impl<R: ProductRepository> UpdateProductHandler<R> {
    /// Creates a new handler over the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> CommandHandler<UpdateProduct> for UpdateProductHandler<R> {
    #[tracing::instrument(skip(self, command), fields(product_id = %command.product_id))]
    async fn handle(&self, command: UpdateProduct) -> Result<CommandResult, DomainError> {
        let mut product = load(&self.repository, command.product_id).await?;

        if let Some(raw_name) = command.name {
            let name = ProductName::new(raw_name)?;
            if name != *product.name() {
                ensure_name_available(&self.repository, &name, Some(product.id())).await?;
            }
            product.update_name(name);
        }

        if let Some(description) = command.description {
            product.update_description(ProductDescription::new(description)?);
        }

        if let Some(price) = command.price {
            product.update_price(price)?;
        }

        if let Some(stock) = command.stock {
            product.update_stock(stock)?;
        }

        if let Some(specs) = command.variants {
            product.clear_variants();
            append_variants(&mut product, specs)?;
        }

        self.repository.update(&mut product).await?;

        metrics::counter!("products_updated_total").increment(1);
        tracing::info!(product_id = %product.id(), "product updated");

        Ok(CommandResult::saved(product))
    }
}

/// Deletes products together with their variants.
pub struct DeleteProductHandler<R: ProductRepository> {
    repository: R,
}

impl<R: ProductRepository> DeleteProductHandler<R> {
    /// Creates a new handler over the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> CommandHandler<DeleteProduct> for DeleteProductHandler<R> {
    #[tracing::instrument(skip(self), fields(product_id = %command.product_id))]
    async fn handle(&self, command: DeleteProduct) -> Result<(), DomainError> {
        let product = load(&self.repository, command.product_id).await?;

        self.repository.delete(&product).await?;

        metrics::counter!("products_deleted_total").increment(1);
        tracing::info!(
            product_id = %product.id(),
            variants = product.variant_count(),
            "product deleted"
        );

        Ok(())
    }
}

/// Partially updates one variant of a product.
pub struct UpdateVariantHandler<R: ProductRepository> {
    repository: R,
}

impl<R: ProductRepository> UpdateVariantHandler<R> {
    /// Creates a new handler over the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> CommandHandler<UpdateVariant> for UpdateVariantHandler<R> {
    #[tracing::instrument(
        skip(self, command),
        fields(product_id = %command.product_id, variant_id = %command.variant_id)
    )]
    async fn handle(&self, command: UpdateVariant) -> Result<CommandResult, DomainError> {
        let mut product = load(&self.repository, command.product_id).await?;

        let variant = product.variant_mut(&command.variant_id).ok_or(
            DomainError::VariantNotFound {
                product_id: command.product_id,
                variant_id: command.variant_id,
            },
        )?;

        if let Some(name) = command.name {
            variant.change_name(ProductName::new(name)?);
        }

        if let Some(price) = command.price {
            variant.change_price(price)?;
        }

        if let Some(stock) = command.stock {
            variant.change_stock(stock)?;
        }

        if let Some(image) = command.image {
            variant.change_image(image);
        }

        self.repository.update(&mut product).await?;

        metrics::counter!("variants_updated_total").increment(1);
        tracing::info!("variant updated");

        Ok(CommandResult::saved(product))
    }
}
