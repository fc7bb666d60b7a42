//! Mailgun backend.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::message::EmailMessage;
use crate::sender::EmailDelivery;

/// Form parameters for the `messages` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailgunMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Parsed `messages` response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MailgunResponse {
    pub id: Option<String>,
    pub message: String,
}

/// Errors from the Mailgun backend.
#[derive(Debug, Error)]
pub enum MailgunError {
    /// Mailgun answered with an HTTP error.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Mailgun accepted the call but returned no message ID.
    #[error("Mailgun error: No message ID returned")]
    MissingMessageId,
}

/// Trait for Mailgun API clients.
#[async_trait]
pub trait MailgunClient: Send + Sync {
    /// Sends a message through `domain`.
    async fn send_message(
        &self,
        domain: &str,
        message: MailgunMessage,
    ) -> Result<MailgunResponse, MailgunError>;
}

/// Mailgun delivery over a [`MailgunClient`].
pub struct MailgunDelivery<C: MailgunClient> {
    client: C,
    domain: String,
}

impl<C: MailgunClient> MailgunDelivery<C> {
    /// Creates a new Mailgun delivery sending through `domain`.
    pub fn new(client: C, domain: impl Into<String>) -> Self {
        Self {
            client,
            domain: domain.into(),
        }
    }
}

#[async_trait]
impl<C: MailgunClient> EmailDelivery for MailgunDelivery<C> {
    type Error = MailgunError;

    fn provider(&self) -> &'static str {
        "Mailgun"
    }

    async fn deliver(&self, from: &str, message: &EmailMessage) -> Result<(), MailgunError> {
        let params = MailgunMessage {
            from: from.to_string(),
            to: message.to().to_string(),
            subject: message.subject().to_string(),
            text: message.body().to_string(),
        };

        let response = self.client.send_message(&self.domain, params).await?;

        match response.id {
            Some(id) if !id.is_empty() => {
                tracing::debug!(message_id = %id, "Mailgun queued message");
                Ok(())
            }
            _ => Err(MailgunError::MissingMessageId),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryMailgunState {
    messages: Vec<(String, MailgunMessage)>,
    omit_id: bool,
    fail_with: Option<(u16, String)>,
}

/// In-memory Mailgun client for testing.
///
/// A blank API key is answered with `401 Forbidden`, as the real API does.
#[derive(Debug, Clone)]
pub struct InMemoryMailgunClient {
    api_key: String,
    state: Arc<RwLock<InMemoryMailgunState>>,
}

impl InMemoryMailgunClient {
    /// Creates a new client authenticating with `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            state: Arc::default(),
        }
    }

    /// Makes later responses carry no message ID.
    pub fn set_omit_id(&self, omit: bool) {
        self.state.write().unwrap().omit_id = omit;
    }

    /// Makes every later call fail with an HTTP error.
    pub fn fail_with(&self, status: u16, message: impl Into<String>) {
        self.state.write().unwrap().fail_with = Some((status, message.into()));
    }

    /// Returns every `(domain, message)` pair received so far.
    pub fn messages(&self) -> Vec<(String, MailgunMessage)> {
        self.state.read().unwrap().messages.clone()
    }
}

#[async_trait]
impl MailgunClient for InMemoryMailgunClient {
    async fn send_message(
        &self,
        domain: &str,
        message: MailgunMessage,
    ) -> Result<MailgunResponse, MailgunError> {
        let mut state = self.state.write().unwrap();

        if self.api_key.trim().is_empty() {
            return Err(MailgunError::Http {
                status: 401,
                message: "Forbidden".to_string(),
            });
        }

        if let Some((status, message)) = state.fail_with.clone() {
            return Err(MailgunError::Http { status, message });
        }

        state.messages.push((domain.to_string(), message));

        let id = (!state.omit_id).then(|| format!("<{}@{domain}>", uuid::Uuid::new_v4()));
        Ok(MailgunResponse {
            id,
            message: "Queued. Thank you.".to_string(),
        })
    }
}
