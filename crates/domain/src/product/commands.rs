//! Product commands.
//!
//! Commands carry raw primitives; handlers turn them into value objects so
//! validation happens in one place.

use crate::command::{Command, CommandResult};

use super::{ProductId, VariantId};

/// Description of a variant to create.
///
/// Price and stock fall back to the product's own values when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSpec {
    /// Variant name.
    pub name: String,

    /// Variant price, or None to use the product price.
    pub price: Option<f64>,

    /// Variant stock, or None to use the product stock.
    pub stock: Option<i64>,

    /// Optional image reference (e.g. a filename).
    pub image: Option<String>,
}

impl VariantSpec {
    /// Creates a variant spec with explicit price and stock.
    pub fn new(name: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            stock: Some(stock),
            image: None,
        }
    }

    /// Creates a variant spec that inherits price and stock from the product.
    pub fn inheriting(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: None,
            stock: None,
            image: None,
        }
    }

    /// Sets the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Command to create a new product with its variants.
///
/// The product ID is always generated by the handler.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    /// Product name.
    pub name: String,

    /// Product description.
    pub description: String,

    /// Product price.
    pub price: f64,

    /// Product stock.
    pub stock: i64,

    /// Variants to create, in order.
    pub variants: Vec<VariantSpec>,
}

impl CreateProduct {
    /// Creates a new CreateProduct command without variants.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        stock: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            stock,
            variants: vec![],
        }
    }

    /// Appends a variant spec.
    pub fn with_variant(mut self, variant: VariantSpec) -> Self {
        self.variants.push(variant);
        self
    }
}

impl Command for CreateProduct {
    type Output = CommandResult;
}

/// Command to update a product.
///
/// Every field left as None is left unchanged. `variants: Some(vec![])`
/// removes all variants; `variants: None` keeps them.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// The product to update.
    pub product_id: ProductId,

    /// New name.
    pub name: Option<String>,

    /// New description.
    pub description: Option<String>,

    /// New price.
    pub price: Option<f64>,

    /// New stock.
    pub stock: Option<i64>,

    /// Replacement variant list.
    pub variants: Option<Vec<VariantSpec>>,
}

impl UpdateProduct {
    /// Creates an UpdateProduct command that changes nothing yet.
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            name: None,
            description: None,
            price: None,
            stock: None,
            variants: None,
        }
    }

    /// Sets the new name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the new price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the new stock.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Replaces the whole variant list.
    pub fn with_variants(mut self, variants: Vec<VariantSpec>) -> Self {
        self.variants = Some(variants);
        self
    }
}

impl Command for UpdateProduct {
    type Output = CommandResult;
}

/// Command to delete a product and its variants.
#[derive(Debug, Clone)]
pub struct DeleteProduct {
    /// The product to delete.
    pub product_id: ProductId,
}

impl DeleteProduct {
    /// Creates a new DeleteProduct command.
    pub fn new(product_id: ProductId) -> Self {
        Self { product_id }
    }
}

impl Command for DeleteProduct {
    type Output = ();
}

/// Command to update one variant of a product.
///
/// `image` is doubly optional: None leaves it unchanged, `Some(None)`
/// clears it and `Some(Some(_))` replaces it.
#[derive(Debug, Clone)]
pub struct UpdateVariant {
    /// The product owning the variant.
    pub product_id: ProductId,

    /// The variant to update.
    pub variant_id: VariantId,

    /// New name.
    pub name: Option<String>,

    /// New price.
    pub price: Option<f64>,

    /// New stock.
    pub stock: Option<i64>,

    /// New image reference.
    pub image: Option<Option<String>>,
}

impl UpdateVariant {
    /// Creates an UpdateVariant command that changes nothing yet.
    pub fn new(product_id: ProductId, variant_id: VariantId) -> Self {
        Self {
            product_id,
            variant_id,
            name: None,
            price: None,
            stock: None,
            image: None,
        }
    }

    /// Sets the new name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the new stock.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Sets the new image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(Some(image.into()));
        self
    }

    /// Clears the image reference.
    pub fn clear_image(mut self) -> Self {
        self.image = Some(None);
        self
    }
}

impl Command for UpdateVariant {
    type Output = CommandResult;
}
