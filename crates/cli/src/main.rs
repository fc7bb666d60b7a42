//! `inventory` entry point.

use cli::{App, CommandLine, Commands, Config, LogFormat};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output; logs go to stderr
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    init_tracing(&config);

    // 2. Wire backends, repository and handlers
    let app = App::from_config(&config)?;

    // 3. Run the requested command
    match commands.command {
        Commands::EmailServices => {
            for service in app.email_services() {
                let state = if service.configured { "configured" } else { "not configured" };
                println!("{:<10} {:<16} {}", service.name, state, service.description);
            }
            Ok(())
        }
        Commands::TestEmail(args) => {
            tracing::info!(service = %args.service, to = %args.to, "sending test email");
            app.send_test_email(&args).await?;
            println!("Email sent successfully using {}", args.service);
            Ok(())
        }
        Commands::Demo => {
            let products = app.run_demo().await?;
            println!("{}", serde_json::to_string_pretty(&products)?);
            Ok(())
        }
    }
}
