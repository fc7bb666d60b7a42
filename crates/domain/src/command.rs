//! Command handling infrastructure.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::product::{Product, ProductEvent};

/// Result of a command that changes a product.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The product as saved by the command.
    pub product: Product,

    /// Events produced by the command, to be dispatched after the save.
    pub events: Vec<ProductEvent>,
}

impl CommandResult {
    /// Creates a result with no events.
    pub fn saved(product: Product) -> Self {
        Self {
            product,
            events: vec![],
        }
    }
}

/// Trait for commands.
///
/// Commands represent an intention to change the catalog. They may be
/// rejected if the current state doesn't allow the change.
pub trait Command: Send + Sync {
    /// What a successful execution returns.
    type Output: Send;
}

/// Executes one kind of command.
///
/// Every handler is a single callable: it accepts its command and either
/// returns the command's output or a typed [`DomainError`].
#[async_trait]
pub trait CommandHandler<C: Command + 'static>: Send + Sync {
    /// Executes the command.
    async fn handle(&self, command: C) -> Result<C::Output, DomainError>;
}
