//! Provider-specific delivery strategies, their client contracts and
//! in-memory clients.

pub mod log;
pub mod mailgun;
pub mod sendgrid;
pub mod ses;
pub mod smtp;

pub use log::LogDelivery;
pub use mailgun::{InMemoryMailgunClient, MailgunClient, MailgunDelivery, MailgunError};
pub use sendgrid::{InMemorySendGridClient, SendGridClient, SendGridDelivery, SendGridError};
pub use ses::{InMemorySesClient, SesClient, SesDelivery, SesError};
pub use smtp::{InMemoryMailTransport, MailTransport, SmtpDelivery, SmtpError};
