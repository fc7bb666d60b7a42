//! Backend selection by name.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use common::InvalidArgument;
use serde::Serialize;

use crate::sender::EmailSender;

/// The email backends the factory knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailService {
    Smtp,
    Log,
    Ses,
    SendGrid,
    Mailgun,
}

impl EmailService {
    /// Every backend, in listing order.
    pub const ALL: [EmailService; 5] = [
        EmailService::Smtp,
        EmailService::Log,
        EmailService::Ses,
        EmailService::SendGrid,
        EmailService::Mailgun,
    ];

    /// Returns the selector string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailService::Smtp => "smtp",
            EmailService::Log => "log",
            EmailService::Ses => "ses",
            EmailService::SendGrid => "sendgrid",
            EmailService::Mailgun => "mailgun",
        }
    }

    /// Returns a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            EmailService::Smtp => "SMTP delivery through the configured mail transport",
            EmailService::Log => "Log only (development/testing)",
            EmailService::Ses => "Amazon Simple Email Service (SES)",
            EmailService::SendGrid => "SendGrid Email Service",
            EmailService::Mailgun => "Mailgun Email Service",
        }
    }
}

impl fmt::Display for EmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailService {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmailService::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| InvalidArgument::new(format!("Unknown email service: {s}")))
    }
}

/// Resolves backend selectors to configured senders.
///
/// SMTP and Log are always present. SES, SendGrid and Mailgun are optional.
#[derive(Clone)]
pub struct EmailServiceFactory {
    smtp: Arc<dyn EmailSender>,
    log: Arc<dyn EmailSender>,
    ses: Option<Arc<dyn EmailSender>>,
    sendgrid: Option<Arc<dyn EmailSender>>,
    mailgun: Option<Arc<dyn EmailSender>>,
}

impl EmailServiceFactory {
    /// Creates a factory with only the mandatory backends.
    pub fn new(smtp: Arc<dyn EmailSender>, log: Arc<dyn EmailSender>) -> Self {
        Self {
            smtp,
            log,
            ses: None,
            sendgrid: None,
            mailgun: None,
        }
    }

    /// Configures the SES backend.
    pub fn with_ses(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.ses = Some(sender);
        self
    }

    /// Configures the SendGrid backend.
    pub fn with_sendgrid(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.sendgrid = Some(sender);
        self
    }

    /// Configures the Mailgun backend.
    pub fn with_mailgun(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.mailgun = Some(sender);
        self
    }

    /// Returns the sender for `service`.
    ///
    /// Fails if the selector is unknown or names a backend that was never
    /// configured.
    pub fn create(&self, service: &str) -> Result<Arc<dyn EmailSender>, InvalidArgument> {
        self.get(service.parse()?)
    }

    /// Returns the sender for an already parsed selector.
    pub fn get(&self, service: EmailService) -> Result<Arc<dyn EmailSender>, InvalidArgument> {
        let not_configured =
            |name: &str| InvalidArgument::new(format!("{name} service not configured"));

        match service {
            EmailService::Smtp => Ok(self.smtp.clone()),
            EmailService::Log => Ok(self.log.clone()),
            EmailService::Ses => self.ses.clone().ok_or_else(|| not_configured("SES")),
            EmailService::SendGrid => self
                .sendgrid
                .clone()
                .ok_or_else(|| not_configured("SendGrid")),
            EmailService::Mailgun => self
                .mailgun
                .clone()
                .ok_or_else(|| not_configured("Mailgun")),
        }
    }

    /// Returns true if `service` can be created.
    pub fn is_configured(&self, service: EmailService) -> bool {
        match service {
            EmailService::Smtp | EmailService::Log => true,
            EmailService::Ses => self.ses.is_some(),
            EmailService::SendGrid => self.sendgrid.is_some(),
            EmailService::Mailgun => self.mailgun.is_some(),
        }
    }

    /// Lists the configured backends in the order smtp, log, ses,
    /// sendgrid, mailgun.
    pub fn available_services(&self) -> Vec<EmailService> {
        EmailService::ALL
            .into_iter()
            .filter(|service| self.is_configured(*service))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::Result;

    struct Named(&'static str);

    #[async_trait]
    impl EmailSender for Named {
        fn provider(&self) -> &'static str {
            self.0
        }

        async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<()> {
            Ok(())
        }
    }

    fn factory() -> EmailServiceFactory {
        EmailServiceFactory::new(Arc::new(Named("SMTP")), Arc::new(Named("Log")))
    }

    fn provider_of(factory: &EmailServiceFactory, service: &str) -> &'static str {
        match factory.create(service) {
            Ok(sender) => sender.provider(),
            Err(e) => panic!("{service}: {e}"),
        }
    }

    #[test]
    fn test_parse_selectors() {
        for service in EmailService::ALL {
            assert_eq!(service.as_str().parse::<EmailService>().unwrap(), service);
        }
        let err = "SMTP".parse::<EmailService>().unwrap_err();
        assert_eq!(err.message(), "Unknown email service: SMTP");
    }

    #[test]
    fn test_mandatory_backends() {
        let factory = factory();
        assert_eq!(provider_of(&factory, "smtp"), "SMTP");
        assert_eq!(provider_of(&factory, "log"), "Log");
        assert_eq!(
            factory.available_services(),
            vec![EmailService::Smtp, EmailService::Log]
        );
    }

    #[test]
    fn test_unconfigured_backends() {
        let factory = factory();

        let messages: Vec<String> = ["ses", "sendgrid", "mailgun"]
            .into_iter()
            .map(|s| factory.create(s).err().unwrap().message().to_string())
            .collect();

        assert_eq!(
            messages,
            vec![
                "SES service not configured",
                "SendGrid service not configured",
                "Mailgun service not configured",
            ]
        );
    }

    #[test]
    fn test_unknown_backend() {
        let err = factory().create("bogus").err().unwrap();
        assert_eq!(err.message(), "Unknown email service: bogus");
    }

    #[test]
    fn test_optional_backends_listed_in_order() {
        let factory = factory()
            .with_mailgun(Arc::new(Named("Mailgun")))
            .with_ses(Arc::new(Named("SES")));

        assert_eq!(provider_of(&factory, "mailgun"), "Mailgun");
        assert_eq!(
            factory.available_services(),
            vec![
                EmailService::Smtp,
                EmailService::Log,
                EmailService::Ses,
                EmailService::Mailgun
            ]
        );
        assert!(!factory.is_configured(EmailService::SendGrid));
    }

    #[test]
    fn test_descriptions_and_serialization() {
        assert_eq!(
            EmailService::Ses.description(),
            "Amazon Simple Email Service (SES)"
        );
        assert_eq!(
            serde_json::to_string(&EmailService::SendGrid).unwrap(),
            r#""sendgrid""#
        );
    }
}
