//! Validated outgoing email.

use common::InvalidArgument;
use serde::Serialize;

/// Maximum subject length, in characters.
pub const MAX_SUBJECT_LENGTH: usize = 255;

/// A syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses an address of the form `local@domain.tld`.
    pub fn parse(raw: &str) -> Result<Self, InvalidArgument> {
        if is_valid_address(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidArgument::new(format!("Invalid email address: {raw}")))
        }
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_address(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    const SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";

    !local.is_empty()
        && local.len() <= 64
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();

    domain.len() <= 253
        && labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// A message that passed validation and is ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    to: EmailAddress,
    subject: String,
    body: String,
}

impl EmailMessage {
    /// Validates recipient, subject and body, in that order.
    pub fn new(to: &str, subject: &str, body: &str) -> Result<Self, InvalidArgument> {
        let to = EmailAddress::parse(to)?;

        if subject.trim().is_empty() {
            return Err(InvalidArgument::new("Subject cannot be empty"));
        }
        if subject.chars().count() > MAX_SUBJECT_LENGTH {
            return Err(InvalidArgument::new(format!(
                "Subject too long (max {MAX_SUBJECT_LENGTH} characters)"
            )));
        }
        if body.trim().is_empty() {
            return Err(InvalidArgument::new("Email body cannot be empty"));
        }

        Ok(Self {
            to,
            subject: subject.to_string(),
            body: body.to_string(),
        })
    }

    pub fn to(&self) -> &EmailAddress {
        &self.to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
