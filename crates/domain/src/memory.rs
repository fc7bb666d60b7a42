use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::RepositoryError;
use crate::product::{Product, ProductId, ProductRepository};

/// In-memory product repository.
///
/// Products are kept in insertion order behind a single lock. Clones share
/// the same storage, so one instance can be handed to every handler.
/// Variants live inside their product, which makes deletion cascade by
/// construction.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Returns true if no product is stored.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    /// Returns the total number of stored variants across all products.
    pub async fn variant_count(&self) -> usize {
        self.products
            .read()
            .await
            .iter()
            .map(Product::variant_count)
            .sum()
    }

    /// Removes every product.
    pub async fn clear(&self) {
        self.products.write().await.clear();
    }
}

/// Fails with `DuplicateName` if a stored product other than `except` uses
/// `product`'s name.
fn ensure_unique_name(
    store: &[Product],
    product: &Product,
    except: Option<ProductId>,
) -> Result<(), RepositoryError> {
    let taken = store
        .iter()
        .any(|p| p.name() == product.name() && Some(p.id()) != except);

    if taken {
        return Err(RepositoryError::DuplicateName {
            name: product.name().to_string(),
        });
    }
    Ok(())
}

/// Returns the position of `product` in the store after checking that the
/// stored copy is at the same version.
fn position_at_version(store: &[Product], product: &Product) -> Result<usize, RepositoryError> {
    let product_id = product.id();
    let index = store
        .iter()
        .position(|p| p.id() == product_id)
        .ok_or(RepositoryError::NotFound { product_id })?;

    let actual = store[index].version();
    if actual != product.version() {
        return Err(RepositoryError::ConcurrencyConflict {
            product_id,
            expected: product.version(),
            actual,
        });
    }
    Ok(index)
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &mut Product) -> Result<(), RepositoryError> {
        let mut store = self.products.write().await;

        ensure_unique_name(&store, product, None)?;

        product.set_version(1);
        store.push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &mut Product) -> Result<(), RepositoryError> {
        let mut store = self.products.write().await;

        let index = position_at_version(&store, product)?;
        ensure_unique_name(&store, product, Some(product.id()))?;

        product.set_version(product.version() + 1);
        store[index] = product.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let store = self.products.read().await;
        Ok(store.iter().find(|p| p.id() == *id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        let store = self.products.read().await;
        Ok(store.iter().find(|p| p.name().as_str() == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.read().await.clone())
    }

    async fn delete(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut store = self.products.write().await;

        let index = position_at_version(&store, product)?;
        store.remove(index);
        Ok(())
    }
}
