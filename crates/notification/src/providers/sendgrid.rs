//! SendGrid backend.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::message::EmailMessage;
use crate::sender::EmailDelivery;

/// A v3 `mail/send` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendGridMail {
    pub personalizations: Vec<Personalization>,
    pub from: Address,
    pub subject: String,
    pub content: Vec<MailContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Personalization {
    pub to: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

impl SendGridMail {
    /// Builds a single-recipient plain-text mail.
    pub fn new(from: &str, message: &EmailMessage) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: message.to().to_string(),
                }],
            }],
            from: Address {
                email: from.to_string(),
            },
            subject: message.subject().to_string(),
            content: vec![MailContent {
                content_type: "text/plain".to_string(),
                value: message.body().to_string(),
            }],
        }
    }
}

/// Raw HTTP answer from SendGrid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendGridResponse {
    pub status_code: u16,
    pub body: String,
}

/// Errors from the SendGrid backend.
#[derive(Debug, Error)]
pub enum SendGridError {
    /// SendGrid answered with a 4xx or 5xx status.
    #[error("SendGrid error: {status} - {body}")]
    Status { status: u16, body: String },

    /// The request never reached SendGrid.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Trait for SendGrid API clients.
#[async_trait]
pub trait SendGridClient: Send + Sync {
    /// Posts to `mail/send`.
    async fn send(&self, mail: SendGridMail) -> Result<SendGridResponse, SendGridError>;
}

/// SendGrid delivery over a [`SendGridClient`].
pub struct SendGridDelivery<C: SendGridClient> {
    client: C,
}

impl<C: SendGridClient> SendGridDelivery<C> {
    /// Creates a new SendGrid delivery.
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: SendGridClient> EmailDelivery for SendGridDelivery<C> {
    type Error = SendGridError;

    fn provider(&self) -> &'static str {
        "SendGrid"
    }

    async fn deliver(&self, from: &str, message: &EmailMessage) -> Result<(), SendGridError> {
        let response = self.client.send(SendGridMail::new(from, message)).await?;

        if response.status_code >= 400 {
            return Err(SendGridError::Status {
                status: response.status_code,
                body: response.body,
            });
        }

        Ok(())
    }
}

#[derive(Debug)]
struct InMemorySendGridState {
    mails: Vec<SendGridMail>,
    response: SendGridResponse,
    unreachable: bool,
}

/// In-memory SendGrid client for testing.
///
/// Answers `202 Accepted` unless told otherwise. A blank API key is
/// answered with `401 Unauthorized`, as the real API does.
#[derive(Debug, Clone)]
pub struct InMemorySendGridClient {
    api_key: String,
    state: Arc<RwLock<InMemorySendGridState>>,
}

impl InMemorySendGridClient {
    /// Creates a new client authenticating with `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            state: Arc::new(RwLock::new(InMemorySendGridState {
                mails: Vec::new(),
                response: SendGridResponse {
                    status_code: 202,
                    body: String::new(),
                },
                unreachable: false,
            })),
        }
    }

    /// Sets the response returned by every later call.
    pub fn respond_with(&self, status_code: u16, body: impl Into<String>) {
        self.state.write().unwrap().response = SendGridResponse {
            status_code,
            body: body.into(),
        };
    }

    /// Makes every later call fail before reaching the API.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.write().unwrap().unreachable = unreachable;
    }

    /// Returns every mail received so far.
    pub fn mails(&self) -> Vec<SendGridMail> {
        self.state.read().unwrap().mails.clone()
    }
}

#[async_trait]
impl SendGridClient for InMemorySendGridClient {
    async fn send(&self, mail: SendGridMail) -> Result<SendGridResponse, SendGridError> {
        let mut state = self.state.write().unwrap();

        if state.unreachable {
            return Err(SendGridError::Transport(
                "could not reach api.sendgrid.com".to_string(),
            ));
        }

        if self.api_key.trim().is_empty() {
            return Ok(SendGridResponse {
                status_code: 401,
                body: r#"{"errors":[{"message":"authorization required"}]}"#.to_string(),
            });
        }

        state.mails.push(mail);
        Ok(state.response.clone())
    }
}
