use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A primitive value was rejected by its validation rule.
///
/// Raised for malformed UUIDs, empty or oversized strings, negative prices
/// or stock, invalid email addresses and unknown configuration selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct InvalidArgument {
    message: String,
}

impl InvalidArgument {
    /// Creates a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Parses a UUID string, naming the kind of identifier in the error.
pub fn parse_uuid(raw: &str, kind: &str) -> Result<Uuid, InvalidArgument> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| InvalidArgument::new(format!("Invalid UUID for {kind}: {raw}")))
}
