//! Amazon SES backend.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::message::EmailMessage;
use crate::sender::EmailDelivery;

const CHARSET: &str = "UTF-8";

/// A `SendEmail` request in the shape the SES API expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailRequest {
    pub source: String,
    pub destination: Destination,
    pub message: SesMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Destination {
    pub to_addresses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SesMessage {
    pub subject: Content,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Body {
    pub text: Content,
}

/// Text with its character set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Content {
    pub data: String,
    pub charset: String,
}

impl Content {
    fn utf8(data: &str) -> Self {
        Self {
            data: data.to_string(),
            charset: CHARSET.to_string(),
        }
    }
}

impl SendEmailRequest {
    /// Builds a single-recipient plain-text request.
    pub fn new(from: &str, message: &EmailMessage) -> Self {
        Self {
            source: from.to_string(),
            destination: Destination {
                to_addresses: vec![message.to().to_string()],
            },
            message: SesMessage {
                subject: Content::utf8(message.subject()),
                body: Body {
                    text: Content::utf8(message.body()),
                },
            },
        }
    }
}

/// Successful `SendEmail` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendEmailOutput {
    pub message_id: String,
}

/// Errors reported by the SES API.
#[derive(Debug, Error)]
pub enum SesError {
    /// The service answered with an error code.
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    /// The request never reached the service.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Trait for SES API clients.
#[async_trait]
pub trait SesClient: Send + Sync {
    /// Calls `SendEmail`.
    async fn send_email(&self, request: SendEmailRequest) -> Result<SendEmailOutput, SesError>;
}

/// SES delivery over a [`SesClient`].
pub struct SesDelivery<C: SesClient> {
    client: C,
}

impl<C: SesClient> SesDelivery<C> {
    /// Creates a new SES delivery.
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: SesClient> EmailDelivery for SesDelivery<C> {
    type Error = SesError;

    fn provider(&self) -> &'static str {
        "SES"
    }

    async fn deliver(&self, from: &str, message: &EmailMessage) -> Result<(), SesError> {
        let output = self
            .client
            .send_email(SendEmailRequest::new(from, message))
            .await?;
        tracing::debug!(message_id = %output.message_id, "SES accepted message");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemorySesState {
    requests: Vec<SendEmailRequest>,
    fail_with: Option<(String, String)>,
    unreachable: bool,
}

/// In-memory SES client for testing.
#[derive(Debug, Clone)]
pub struct InMemorySesClient {
    region: String,
    state: Arc<RwLock<InMemorySesState>>,
}

impl InMemorySesClient {
    /// Creates a new client for `region`.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            state: Arc::default(),
        }
    }

    /// Makes every call fail with the given service error.
    pub fn fail_with(&self, code: impl Into<String>, message: impl Into<String>) {
        self.state.write().unwrap().fail_with = Some((code.into(), message.into()));
    }

    /// Makes every later call fail before reaching the regional endpoint.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.write().unwrap().unreachable = unreachable;
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<SendEmailRequest> {
        self.state.read().unwrap().requests.clone()
    }
}

#[async_trait]
impl SesClient for InMemorySesClient {
    async fn send_email(&self, request: SendEmailRequest) -> Result<SendEmailOutput, SesError> {
        let mut state = self.state.write().unwrap();

        if state.unreachable {
            return Err(SesError::Transport(format!(
                "could not reach email.{}.amazonaws.com",
                self.region
            )));
        }

        if let Some((code, message)) = state.fail_with.clone() {
            return Err(SesError::Service { code, message });
        }

        state.requests.push(request);
        Ok(SendEmailOutput {
            message_id: uuid::Uuid::new_v4().to_string(),
        })
    }
}
