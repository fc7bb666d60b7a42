//! Development backend that only logs.

use std::convert::Infallible;
use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;

use crate::logger::{Logger, log_context};
use crate::message::EmailMessage;
use crate::sender::EmailDelivery;

/// Delivery that records the message in the log and never fails.
pub struct LogDelivery {
    logger: Arc<dyn Logger>,
    echo: bool,
}

impl LogDelivery {
    /// Creates a new log delivery. With `echo`, messages are also printed
    /// to stdout.
    pub fn new(logger: Arc<dyn Logger>, echo: bool) -> Self {
        Self { logger, echo }
    }

    fn print(message: &EmailMessage) {
        if let Err(err) = Self::echo(&mut std::io::stdout().lock(), message) {
            tracing::debug!(error = %err, "could not echo email to stdout");
        }
    }

    fn echo(out: &mut impl Write, message: &EmailMessage) -> std::io::Result<()> {
        writeln!(
            out,
            "EMAIL (DEV MODE):\nTo: {}\nSubject: {}\nBody: {}\n---",
            message.to(),
            message.subject(),
            message.body()
        )
    }
}

#[async_trait]
impl EmailDelivery for LogDelivery {
    type Error = Infallible;

    fn provider(&self) -> &'static str {
        "Log"
    }

    async fn deliver(&self, from: &str, message: &EmailMessage) -> Result<(), Infallible> {
        self.logger.info(
            "Email would be sent",
            &log_context([
                ("from", from.into()),
                ("to", message.to().as_str().into()),
                ("subject", message.subject().into()),
                ("body", message.body().into()),
                ("provider", "log".into()),
            ]),
        );

        if self.echo {
            Self::print(message);
        }

        Ok(())
    }
}
