//! Application configuration loaded from environment variables.

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Mailgun account settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailgunConfig {
    pub domain: String,
    pub api_key: String,
}

/// Inventory configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `text` or `json` (default: `text`)
/// - `MAIL_FROM`: sender address (default: `"noreply@inventory.local"`)
/// - `MAIL_SERVICE`: backend used for notifications (default: `"log"`)
/// - `NOTIFY_RECIPIENT`: who hears about new products
/// - `NOTIFY_ISOLATE_FAILURES`: keep going when a notification fails
/// - `SMTP_HOST` / `SMTP_PORT`: mail transport target (default: `localhost:25`)
/// - `SES_REGION`: enables SES
/// - `SENDGRID_API_KEY`: enables SendGrid
/// - `MAILGUN_DOMAIN` + `MAILGUN_API_KEY`: enable Mailgun
/// - `MAIL_ECHO`: print log-backend emails to stdout (default: `true`)
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub mail_from: String,
    pub mail_service: String,
    pub notify_recipient: String,
    pub isolate_notification_failures: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub ses_region: Option<String>,
    pub sendgrid_api_key: Option<String>,
    pub mailgun: Option<MailgunConfig>,
    pub mail_echo: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset. Unparsable numbers and booleans fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let mailgun = match (get("MAILGUN_DOMAIN"), get("MAILGUN_API_KEY")) {
            (Some(domain), Some(api_key)) => Some(MailgunConfig { domain, api_key }),
            _ => None,
        };

        Self {
            log_level: get("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: get("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or(defaults.log_format),
            mail_from: get("MAIL_FROM").unwrap_or(defaults.mail_from),
            mail_service: get("MAIL_SERVICE").unwrap_or(defaults.mail_service),
            notify_recipient: get("NOTIFY_RECIPIENT").unwrap_or(defaults.notify_recipient),
            isolate_notification_failures: get("NOTIFY_ISOLATE_FAILURES")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.isolate_notification_failures),
            smtp_host: get("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: get("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.smtp_port),
            ses_region: get("SES_REGION"),
            sendgrid_api_key: get("SENDGRID_API_KEY"),
            mailgun,
            mail_echo: get("MAIL_ECHO")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.mail_echo),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            mail_from: "noreply@inventory.local".to_string(),
            mail_service: "log".to_string(),
            notify_recipient: "inventory-admin@inventory.local".to_string(),
            isolate_notification_failures: false,
            smtp_host: "localhost".to_string(),
            smtp_port: 25,
            ses_region: None,
            sendgrid_api_key: None,
            mailgun: None,
            mail_echo: true,
        }
    }
}
