//! Variant child entity.

use common::InvalidArgument;
use serde::{Deserialize, Serialize};

use super::value_objects::ensure_stock;
use super::{Price, Product, ProductId, ProductName, VariantId};

/// A purchasable variant of a product (size, colour, ...).
///
/// Holds the owning product's ID for navigation only; the product owns the
/// variant, never the other way around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    id: VariantId,
    product_id: ProductId,
    name: ProductName,
    price: Price,
    stock: i64,
    image: Option<String>,
}

impl Variant {
    /// Creates a variant linked to `product`.
    ///
    /// Fails if `price` or `stock` is negative.
    pub fn new(
        id: VariantId,
        product: &Product,
        name: ProductName,
        price: f64,
        stock: i64,
        image: Option<String>,
    ) -> Result<Self, InvalidArgument> {
        let price = Price::new(price)?;
        let stock = ensure_stock(stock)?;

        Ok(Self {
            id,
            product_id: product.id(),
            name,
            price,
            stock,
            image,
        })
    }

    /// Returns the variant ID.
    pub fn id(&self) -> VariantId {
        self.id
    }

    /// Returns the ID of the owning product.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Returns the variant name.
    pub fn name(&self) -> &ProductName {
        &self.name
    }

    /// Returns the variant price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Returns the units in stock.
    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Returns the image reference, if any.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Replaces the name.
    pub fn change_name(&mut self, name: ProductName) {
        self.name = name;
    }

    /// Replaces the price. Fails if `price` is negative.
    pub fn change_price(&mut self, price: f64) -> Result<(), InvalidArgument> {
        self.price = Price::new(price)?;
        Ok(())
    }

    /// Replaces the stock. Fails if `stock` is negative.
    pub fn change_stock(&mut self, stock: i64) -> Result<(), InvalidArgument> {
        self.stock = ensure_stock(stock)?;
        Ok(())
    }

    /// Replaces or clears the image reference. Not validated.
    pub fn change_image(&mut self, image: Option<String>) {
        self.image = image;
    }
}
