//! Sends an email whenever a product is created.

use std::sync::Arc;

use async_trait::async_trait;
use domain::{EventListener, ListenerError, ProductCreated, ProductEvent};

use crate::sender::EmailSender;

/// Subject of product-created notifications.
pub const PRODUCT_CREATED_SUBJECT: &str = "New product created";

/// Notifies a fixed recipient about every new product.
pub struct ProductCreatedListener {
    sender: Arc<dyn EmailSender>,
    recipient: String,
}

impl ProductCreatedListener {
    /// Creates a listener mailing `recipient` through `sender`.
    pub fn new(sender: Arc<dyn EmailSender>, recipient: impl Into<String>) -> Self {
        Self {
            sender,
            recipient: recipient.into(),
        }
    }

    /// Returns the notification recipient.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Formats the notification body.
    pub fn body(event: &ProductCreated) -> String {
        format!(
            "A new product has been created:\n\n\
             Name: {}\n\
             Description: {}\n\
             Price: {:.2}\n\
             Stock: {}",
            event.product_name, event.product_description, event.product_price, event.product_stock
        )
    }
}

#[async_trait]
impl EventListener for ProductCreatedListener {
    fn name(&self) -> &'static str {
        "product_created_notification"
    }

    async fn handle(&self, event: &ProductEvent) -> Result<(), ListenerError> {
        let ProductEvent::ProductCreated(created) = event;

        tracing::debug!(
            product_id = %created.product_id,
            provider = self.sender.provider(),
            "notifying product creation"
        );

        self.sender
            .send(&self.recipient, PRODUCT_CREATED_SUBJECT, &Self::body(created))
            .await?;

        Ok(())
    }
}
