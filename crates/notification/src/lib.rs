//! Email notifications for the inventory system.
//!
//! This crate provides:
//! - [`EmailSender`], the contract callers depend on
//! - [`Mailer`], the shared validate/log/deliver pipeline over an
//!   [`EmailDelivery`] strategy
//! - SMTP, SES, SendGrid, Mailgun and Log backends in [`providers`]
//! - [`EmailServiceFactory`] to pick a backend by name
//! - [`ProductCreatedListener`] wiring product creation to an email

pub mod error;
pub mod factory;
pub mod listener;
pub mod logger;
pub mod message;
pub mod providers;
pub mod sender;

pub use error::{DeliveryError, NotificationError, Result};
pub use factory::{EmailService, EmailServiceFactory};
pub use listener::ProductCreatedListener;
pub use logger::{LogContext, LogEntry, LogLevel, Logger, MemoryLogger, TracingLogger};
pub use message::{EmailAddress, EmailMessage};
pub use sender::{EmailDelivery, EmailSender, Mailer};
