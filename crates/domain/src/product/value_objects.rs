//! Value objects for the product domain.
//!
//! Each constructor validates its raw input and fails with
//! [`InvalidArgument`]. There are no setters; a change is always a new value.

use common::{InvalidArgument, parse_uuid};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Creates a new random product ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a product ID from its string form.
    pub fn parse(raw: &str) -> Result<Self, InvalidArgument> {
        parse_uuid(raw, "ProductId").map(Self)
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for ProductId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Unique identifier for a product variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(Uuid);

impl VariantId {
    /// Creates a new random variant ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a variant ID from its string form.
    pub fn parse(raw: &str) -> Result<Self, InvalidArgument> {
        parse_uuid(raw, "VariantId").map(Self)
    }
}

impl Default for VariantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for VariantId {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for VariantId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Product (or variant) name: trimmed, non-empty, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    /// Maximum length in characters.
    pub const MAX_LENGTH: usize = 255;

    /// Creates a product name, trimming surrounding whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidArgument> {
        let name = name.into();
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(InvalidArgument::new("Product name cannot be empty"));
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(InvalidArgument::new(format!(
                "Product name cannot exceed {} characters",
                Self::MAX_LENGTH
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductName {
    type Error = InvalidArgument;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductName> for String {
    fn from(name: ProductName) -> Self {
        name.0
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Product description: must contain something other than whitespace.
///
/// The text is kept as given; only the emptiness check trims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductDescription(String);

impl ProductDescription {
    /// Creates a product description.
    pub fn new(description: impl Into<String>) -> Result<Self, InvalidArgument> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(InvalidArgument::new("Product description cannot be empty"));
        }
        Ok(Self(description))
    }

    /// Returns the description as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductDescription {
    type Error = InvalidArgument;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductDescription> for String {
    fn from(description: ProductDescription) -> Self {
        description.0
    }
}

/// Non-negative, finite price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Creates a price, rejecting negative, NaN and infinite values.
    pub fn new(value: f64) -> Result<Self, InvalidArgument> {
        if value.is_nan() || value.is_infinite() {
            return Err(InvalidArgument::new(format!("Price must be a finite number: {value}")));
        }
        if value < 0.0 {
            return Err(InvalidArgument::new("Price cannot be negative"));
        }
        Ok(Self(value))
    }

    /// Returns a zero price.
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = InvalidArgument;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Validates a stock level.
pub(crate) fn ensure_stock(stock: i64) -> Result<i64, InvalidArgument> {
    if stock < 0 {
        return Err(InvalidArgument::new("Stock cannot be negative"));
    }
    Ok(stock)
}
