//! SMTP backend: hands messages to a mail transport.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use crate::message::EmailMessage;
use crate::sender::EmailDelivery;

/// A plain-text email as handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Errors reported by a mail transport.
#[derive(Debug, Error)]
pub enum SmtpError {
    /// The SMTP server could not be reached.
    #[error("could not connect to {endpoint}")]
    Connection { endpoint: String },

    /// The server rejected the message.
    #[error("{code} {message}")]
    Rejected { code: u16, message: String },
}

/// Trait for mail transports.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Sends one email.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), SmtpError>;
}

/// SMTP delivery over a [`MailTransport`].
pub struct SmtpDelivery<T: MailTransport> {
    transport: T,
}

impl<T: MailTransport> SmtpDelivery<T> {
    /// Creates a new SMTP delivery.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: MailTransport> EmailDelivery for SmtpDelivery<T> {
    type Error = SmtpError;

    fn provider(&self) -> &'static str {
        "SMTP"
    }

    async fn deliver(&self, from: &str, message: &EmailMessage) -> Result<(), SmtpError> {
        let email = OutgoingEmail {
            from: from.to_string(),
            to: message.to().to_string(),
            subject: message.subject().to_string(),
            text: message.body().to_string(),
        };
        self.transport.send(&email).await
    }
}

#[derive(Debug, Default)]
struct InMemoryTransportState {
    sent: Vec<OutgoingEmail>,
    fail_on_send: bool,
    reject_with: Option<(u16, String)>,
}

/// In-memory mail transport for testing.
#[derive(Debug, Clone)]
pub struct InMemoryMailTransport {
    endpoint: String,
    state: Arc<RwLock<InMemoryTransportState>>,
}

impl InMemoryMailTransport {
    /// Creates a new transport pretending to talk to `host:port`.
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            endpoint: format!("{host}:{port}"),
            state: Arc::default(),
        }
    }

    /// Configures the transport to fail on every send.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state.write().unwrap().fail_on_send = fail;
    }

    /// Makes the server reject every later message with an SMTP reply.
    pub fn reject_with(&self, code: u16, message: impl Into<String>) {
        self.state.write().unwrap().reject_with = Some((code, message.into()));
    }

    /// Returns every email sent so far.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.state.read().unwrap().sent.clone()
    }

    /// Returns the number of emails sent.
    pub fn sent_count(&self) -> usize {
        self.state.read().unwrap().sent.len()
    }
}

impl Default for InMemoryMailTransport {
    fn default() -> Self {
        Self::new("localhost", 25)
    }
}

#[async_trait]
impl MailTransport for InMemoryMailTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), SmtpError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_send {
            return Err(SmtpError::Connection {
                endpoint: self.endpoint.clone(),
            });
        }

        if let Some((code, message)) = state.reject_with.clone() {
            return Err(SmtpError::Rejected { code, message });
        }

        state.sent.push(email.clone());
        Ok(())
    }
}
