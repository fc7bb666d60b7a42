//! Product aggregate root.

use common::InvalidArgument;
use serde::{Deserialize, Serialize};

use super::value_objects::ensure_stock;
use super::{Price, ProductDescription, ProductId, ProductName, Variant, VariantId};

/// Product aggregate root.
///
/// Owns its variants exclusively: removing the product removes every
/// variant with it. Price and stock are non-negative at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    id: ProductId,

    /// Display name, unique across products (enforced by the handlers).
    name: ProductName,

    /// Free-form description.
    description: ProductDescription,

    /// Unit price.
    price: Price,

    /// Units in stock.
    stock: i64,

    /// Variants in insertion order.
    #[serde(default)]
    variants: Vec<Variant>,

    /// Stored version for optimistic concurrency. Zero until first saved.
    #[serde(default)]
    version: u64,
}

impl Product {
    /// Creates a product with no variants.
    ///
    /// Fails if `stock` is negative.
    pub fn new(
        id: ProductId,
        name: ProductName,
        description: ProductDescription,
        price: Price,
        stock: i64,
    ) -> Result<Self, InvalidArgument> {
        let stock = ensure_stock(stock)?;

        Ok(Self {
            id,
            name,
            description,
            price,
            stock,
            variants: Vec::new(),
            version: 0,
        })
    }
}

// Query methods
impl Product {
    /// Returns the product ID.
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Returns the product name.
    pub fn name(&self) -> &ProductName {
        &self.name
    }

    /// Returns the product description.
    pub fn description(&self) -> &ProductDescription {
        &self.description
    }

    /// Returns the product price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Returns the units in stock.
    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Returns the variants in insertion order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Returns the number of variants.
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Returns a variant by ID.
    pub fn variant(&self, variant_id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id() == *variant_id)
    }

    /// Returns the version this copy was loaded or saved at.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns a mutable variant by ID.
    pub fn variant_mut(&mut self, variant_id: &VariantId) -> Option<&mut Variant> {
        self.variants.iter_mut().find(|v| v.id() == *variant_id)
    }
}

// Mutators
impl Product {
    /// Sets the version. Called by repositories after a successful write.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Appends a variant. Duplicate IDs are not checked.
    pub fn add_variant(&mut self, variant: Variant) {
        self.variants.push(variant);
    }

    /// Removes every variant.
    pub fn clear_variants(&mut self) {
        self.variants.clear();
    }

    /// Replaces the name.
    pub fn update_name(&mut self, name: ProductName) {
        self.name = name;
    }

    /// Replaces the description.
    pub fn update_description(&mut self, description: ProductDescription) {
        self.description = description;
    }

    /// Replaces the price. Fails if `price` is negative.
    pub fn update_price(&mut self, price: f64) -> Result<(), InvalidArgument> {
        self.price = Price::new(price)?;
        Ok(())
    }

    /// Replaces the stock. Fails if `stock` is negative.
    pub fn update_stock(&mut self, stock: i64) -> Result<(), InvalidArgument> {
        self.stock = ensure_stock(stock)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camiseta() -> Product {
        Product::new(
            ProductId::new(),
            ProductName::new("Camiseta").unwrap(),
            ProductDescription::new("Camiseta de algodón").unwrap(),
            Price::new(19.99).unwrap(),
            10,
        )
        .unwrap()
    }

    fn variant_for(product: &Product, name: &str) -> Variant {
        Variant::new(
            VariantId::new(),
            product,
            ProductName::new(name).unwrap(),
            21.99,
            5,
            Some("imagen.jpg".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_create_product() {
        let id = ProductId::new();
        let product = Product::new(
            id,
            ProductName::new("Camiseta").unwrap(),
            ProductDescription::new("Camiseta de algodón").unwrap(),
            Price::new(19.99).unwrap(),
            10,
        )
        .unwrap();

        assert_eq!(product.id(), id);
        assert_eq!(product.name().as_str(), "Camiseta");
        assert_eq!(product.description().as_str(), "Camiseta de algodón");
        assert_eq!(product.price().value(), 19.99);
        assert_eq!(product.stock(), 10);
        assert_eq!(product.variant_count(), 0);
        assert_eq!(product.version(), 0);
    }

    #[test]
    fn test_negative_stock_fails() {
        for stock in [-1, -10, i64::MIN] {
            let result = Product::new(
                ProductId::new(),
                ProductName::new("Camiseta").unwrap(),
                ProductDescription::new("Camiseta de algodón").unwrap(),
                Price::zero(),
                stock,
            );
            assert!(result.is_err(), "stock {stock} should be rejected");
        }
    }

    #[test]
    fn test_zero_price_and_stock_allowed() {
        let product = Product::new(
            ProductId::new(),
            ProductName::new("Gratis").unwrap(),
            ProductDescription::new("Sin coste").unwrap(),
            Price::zero(),
            0,
        );
        assert!(product.is_ok());
    }

    #[test]
    fn test_add_and_clear_variants() {
        let mut product = camiseta();
        let first = variant_for(&product, "Camiseta Azul M");
        let second = variant_for(&product, "Camiseta Roja L");
        let first_id = first.id();

        product.add_variant(first);
        product.add_variant(second);

        assert_eq!(product.variant_count(), 2);
        assert_eq!(product.variants()[0].id(), first_id);
        assert_eq!(product.variants()[1].name().as_str(), "Camiseta Roja L");
        assert!(product.variant(&first_id).is_some());

        product.clear_variants();
        assert_eq!(product.variant_count(), 0);
        assert!(product.variant(&first_id).is_none());
    }

    #[test]
    fn test_update_price_rejects_negative() {
        let mut product = camiseta();
        assert!(product.update_price(-5.0).is_err());
        assert_eq!(product.price().value(), 19.99);

        product.update_price(29.99).unwrap();
        assert_eq!(product.price().value(), 29.99);
    }

    #[test]
    fn test_update_stock_rejects_negative() {
        let mut product = camiseta();
        assert!(product.update_stock(-1).is_err());
        assert_eq!(product.stock(), 10);

        product.update_stock(20).unwrap();
        assert_eq!(product.stock(), 20);
    }

    #[test]
    fn test_update_name_and_description() {
        let mut product = camiseta();
        product.update_name(ProductName::new("Camiseta Premium").unwrap());
        product.update_description(ProductDescription::new("Algodón orgánico").unwrap());

        assert_eq!(product.name().as_str(), "Camiseta Premium");
        assert_eq!(product.description().as_str(), "Algodón orgánico");
    }

    #[test]
    fn test_variant_mut_changes_in_place() {
        let mut product = camiseta();
        let variant = variant_for(&product, "Camiseta Azul M");
        let variant_id = variant.id();
        product.add_variant(variant);

        product
            .variant_mut(&variant_id)
            .unwrap()
            .change_stock(1)
            .unwrap();

        assert_eq!(product.variant(&variant_id).unwrap().stock(), 1);
    }

    #[test]
    fn test_serialization_keeps_variants() {
        let mut product = camiseta();
        product.add_variant(variant_for(&product, "Camiseta Azul M"));

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["name"], "Camiseta");
        assert_eq!(json["variants"][0]["image"], "imagen.jpg");

        let restored: Product = serde_json::from_value(json).unwrap();
        assert_eq!(restored, product);
    }
}
