//! Product domain events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::DomainEvent;

use super::{Product, ProductId};

/// Events that can occur on a product aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ProductEvent {
    /// Product was created.
    ProductCreated(ProductCreated),
}

impl DomainEvent for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated(_) => "ProductCreated",
        }
    }
}

impl ProductEvent {
    /// Creates a ProductCreated event from a freshly created product.
    pub fn product_created(product: &Product) -> Self {
        ProductEvent::ProductCreated(ProductCreated::from_product(product))
    }

    /// Returns the ID of the product the event is about.
    pub fn product_id(&self) -> ProductId {
        match self {
            ProductEvent::ProductCreated(data) => data.product_id,
        }
    }
}

/// Snapshot of a product taken right after it was created.
///
/// Carries the product itself plus denormalized scalar fields so listeners
/// can format notifications without touching the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreated {
    /// The created product, variants included.
    pub product: Product,

    /// The product ID.
    pub product_id: ProductId,

    /// Product name at creation time.
    pub product_name: String,

    /// Product description at creation time.
    pub product_description: String,

    /// Product price at creation time.
    pub product_price: f64,

    /// Product stock at creation time.
    pub product_stock: i64,

    /// When the product was created.
    pub occurred_at: DateTime<Utc>,
}

impl ProductCreated {
    /// Captures the event data from a product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product: product.clone(),
            product_id: product.id(),
            product_name: product.name().to_string(),
            product_description: product.description().to_string(),
            product_price: product.price().value(),
            product_stock: product.stock(),
            occurred_at: Utc::now(),
        }
    }
}
