//! Notification error types.

use common::InvalidArgument;
use thiserror::Error;

/// Boxed provider error kept as the source of a delivery failure.
pub type DeliveryError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while sending an email.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The message was rejected before reaching any provider.
    #[error("{0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// The provider failed to deliver the message.
    #[error("Error sending email via {provider}: {source}")]
    Delivery {
        provider: &'static str,
        #[source]
        source: DeliveryError,
    },
}

impl NotificationError {
    /// Returns true if the provider was reached and failed.
    pub fn is_delivery(&self) -> bool {
        matches!(self, Self::Delivery { .. })
    }
}

/// Result type for notification operations.
pub type Result<T> = std::result::Result<T, NotificationError>;
