//! Product aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod handlers;
mod repository;
mod service;
mod value_objects;
mod variant;

pub use aggregate::Product;
pub use commands::*;
pub use events::{ProductCreated, ProductEvent};
pub use handlers::{
    CreateProductHandler, DeleteProductHandler, UpdateProductHandler, UpdateVariantHandler,
};
pub use repository::ProductRepository;
pub use service::ProductService;
pub use value_objects::{Price, ProductDescription, ProductId, ProductName, VariantId};
pub use variant::Variant;
