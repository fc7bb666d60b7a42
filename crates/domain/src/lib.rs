//! Domain layer for the inventory system.
//!
//! This crate provides the product catalog model and its write side:
//! - Product aggregate with owned variants and validated value objects
//! - Command types and one CommandHandler per command
//! - ProductRepository trait with an in-memory implementation
//! - ProductCreated event and a synchronous event dispatcher

pub mod command;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod memory;
pub mod product;

pub use command::{Command, CommandHandler, CommandResult};
pub use dispatcher::{
    DispatchError, EventDispatcher, EventListener, FailurePolicy, ListenerError,
    SyncEventDispatcher,
};
pub use error::{DomainError, RepositoryError};
pub use event::DomainEvent;
pub use memory::InMemoryProductRepository;
pub use product::{
    CreateProduct, CreateProductHandler, DeleteProduct, DeleteProductHandler, Price, Product,
    ProductCreated, ProductDescription, ProductEvent, ProductId, ProductName, ProductRepository,
    ProductService, UpdateProduct, UpdateProductHandler, UpdateVariant, UpdateVariantHandler,
    Variant, VariantId, VariantSpec,
};
