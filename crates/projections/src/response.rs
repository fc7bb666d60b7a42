//! Flat response models built from the product aggregate.

use domain::{Product, Variant};
use serde::{Deserialize, Serialize};

/// A product as presented to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub variants: Vec<VariantResponse>,
}

/// A variant as presented to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub image: Option<String>,
}

impl ProductResponse {
    /// Builds the response, keeping variants in aggregate order.
    pub fn from_domain(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            price: product.price().value(),
            stock: product.stock(),
            variants: product
                .variants()
                .iter()
                .map(VariantResponse::from_domain)
                .collect(),
        }
    }
}

impl VariantResponse {
    /// Builds the response for one variant.
    pub fn from_domain(variant: &Variant) -> Self {
        Self {
            id: variant.id().to_string(),
            name: variant.name().to_string(),
            price: variant.price().value(),
            stock: variant.stock(),
            image: variant.image().map(str::to_string),
        }
    }
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self::from_domain(product)
    }
}
