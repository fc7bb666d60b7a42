//! Email sender contract and the shared send pipeline.
//!
//! Every backend implements only [`EmailDelivery`]. [`Mailer`] wraps a
//! delivery with the steps all backends share: validation, logging and
//! error wrapping.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{NotificationError, Result};
use crate::logger::{LogContext, Logger, log_context};
use crate::message::EmailMessage;

/// Sends plain-text emails.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Returns the provider name, used in logs and errors.
    fn provider(&self) -> &'static str;

    /// Validates and sends one message.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// The provider-specific step of sending a message.
#[async_trait]
pub trait EmailDelivery: Send + Sync {
    /// The provider's native error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the provider name.
    fn provider(&self) -> &'static str;

    /// Hands an already validated message to the provider.
    async fn deliver(
        &self,
        from: &str,
        message: &EmailMessage,
    ) -> std::result::Result<(), Self::Error>;
}

/// An [`EmailSender`] built from a delivery strategy.
pub struct Mailer<D: EmailDelivery> {
    delivery: D,
    from: String,
    logger: Arc<dyn Logger>,
}

impl<D: EmailDelivery> Mailer<D> {
    /// Creates a new mailer sending from `from`.
    pub fn new(delivery: D, from: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            delivery,
            from: from.into(),
            logger,
        }
    }

    /// Returns the wrapped delivery.
    pub fn delivery(&self) -> &D {
        &self.delivery
    }

    fn context(&self, message: &EmailMessage) -> LogContext {
        log_context([
            ("to", message.to().as_str().into()),
            ("subject", message.subject().into()),
            ("provider", self.delivery.provider().into()),
        ])
    }
}

#[async_trait]
impl<D: EmailDelivery> EmailSender for Mailer<D> {
    fn provider(&self) -> &'static str {
        self.delivery.provider()
    }

    #[tracing::instrument(skip(self, subject, body))]
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let message = EmailMessage::new(to, subject, body)?;
        let provider = self.delivery.provider();

        let mut context = self.context(&message);
        self.logger.info("Attempting to send email", &context);

        match self.delivery.deliver(&self.from, &message).await {
            Ok(()) => {
                context.insert("success".into(), true.into());
                self.logger.info("Email sent successfully", &context);
                metrics::counter!("emails_sent_total", "provider" => provider).increment(1);
                Ok(())
            }
            Err(e) => {
                context.insert("success".into(), false.into());
                context.insert("error".into(), e.to_string().into());
                self.logger.error("Failed to send email", &context);
                metrics::counter!("emails_failed_total", "provider" => provider).increment(1);
                Err(NotificationError::Delivery {
                    provider,
                    source: Box::new(e),
                })
            }
        }
    }
}
