//! Read side of the product catalog.
//!
//! This crate provides the query side of the CQRS pattern:
//! - [`Query`] and [`QueryHandler`] contracts
//! - [`GetAllProducts`] and [`GetProductById`] with their handlers
//! - [`ProductResponse`] and [`VariantResponse`] flat response models

pub mod error;
pub mod handlers;
pub mod query;
pub mod response;

pub use error::{QueryError, Result};
pub use handlers::{GetAllProductsHandler, GetProductByIdHandler};
pub use query::{GetAllProducts, GetProductById, Query, QueryHandler};
pub use response::{ProductResponse, VariantResponse};
