use clap::{Parser, Subcommand};

/// Default body of `test-email`.
pub const DEFAULT_TEST_BODY: &str = "This is a test email sent from the inventory system.";

#[derive(Debug, Parser)]
#[command(name = "inventory")]
#[command(about = "Product inventory and notification tooling.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List email backends and whether each one is configured
    #[command(alias = "services")]
    EmailServices,
    /// Send a test email through one backend
    TestEmail(TestEmailArgs),
    /// Create a sample product and print the catalog as JSON
    Demo,
}

#[derive(Debug, Clone, clap::Args)]
pub struct TestEmailArgs {
    /// Backend to use (smtp, log, ses, sendgrid, mailgun)
    #[arg(short, long, default_value = "log")]
    pub service: String,

    /// Recipient address
    #[arg(short, long, default_value = "test@example.com")]
    pub to: String,

    /// Subject line
    #[arg(long, default_value = "Email service test")]
    pub subject: String,

    /// Message body
    #[arg(short, long, default_value = DEFAULT_TEST_BODY)]
    pub body: String,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_defaults() {
        let cli = CommandLine::try_parse_from(["inventory", "test-email"]).unwrap();
        let Commands::TestEmail(args) = cli.command else {
            panic!("expected test-email");
        };
        assert_eq!(args.service, "log");
        assert_eq!(args.to, "test@example.com");
        assert_eq!(args.subject, "Email service test");
        assert_eq!(args.body, DEFAULT_TEST_BODY);
    }

    #[test]
    fn test_email_overrides() {
        let cli = CommandLine::try_parse_from([
            "inventory",
            "test-email",
            "-s",
            "smtp",
            "--to",
            "ops@tienda.es",
            "--subject",
            "Ping",
        ])
        .unwrap();
        let Commands::TestEmail(args) = cli.command else {
            panic!("expected test-email");
        };
        assert_eq!(args.service, "smtp");
        assert_eq!(args.to, "ops@tienda.es");
        assert_eq!(args.subject, "Ping");
    }

    #[test]
    fn test_alias_and_unknown() {
        let cli = CommandLine::try_parse_from(["inventory", "services"]).unwrap();
        assert!(matches!(cli.command, Commands::EmailServices));
        assert!(CommandLine::try_parse_from(["inventory", "bogus"]).is_err());
    }
}
