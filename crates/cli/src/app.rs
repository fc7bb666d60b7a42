//! Wires configuration, backends, repository and handlers together.

use std::sync::Arc;

use anyhow::Context;
use domain::{
    CreateProduct, FailurePolicy, InMemoryProductRepository, ProductService, SyncEventDispatcher,
    UpdateVariant, VariantSpec,
};
use notification::providers::{
    InMemoryMailTransport, InMemoryMailgunClient, InMemorySendGridClient, InMemorySesClient,
    LogDelivery, MailgunDelivery, SendGridDelivery, SesDelivery, SmtpDelivery,
};
use notification::{
    EmailService, EmailServiceFactory, Logger, Mailer, ProductCreatedListener, TracingLogger,
};
use projections::{
    GetAllProducts, GetAllProductsHandler, GetProductById, GetProductByIdHandler,
    ProductResponse, QueryHandler,
};
use serde::Serialize;

use crate::commands::TestEmailArgs;
use crate::config::Config;

/// One row of the `email-services` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub name: &'static str,
    pub description: &'static str,
    pub configured: bool,
}

/// Builds the email factory from configuration.
///
/// Network clients are external collaborators; every backend is wired with
/// its in-memory client.
pub fn build_factory(config: &Config, logger: Arc<dyn Logger>) -> EmailServiceFactory {
    let from = config.mail_from.as_str();

    let smtp = Mailer::new(
        SmtpDelivery::new(InMemoryMailTransport::new(&config.smtp_host, config.smtp_port)),
        from,
        logger.clone(),
    );
    let log = Mailer::new(
        LogDelivery::new(logger.clone(), config.mail_echo),
        from,
        logger.clone(),
    );
    let mut factory = EmailServiceFactory::new(Arc::new(smtp), Arc::new(log));

    if let Some(region) = &config.ses_region {
        let ses = SesDelivery::new(InMemorySesClient::new(region.as_str()));
        factory = factory.with_ses(Arc::new(Mailer::new(ses, from, logger.clone())));
    }

    if let Some(api_key) = &config.sendgrid_api_key {
        let sendgrid = SendGridDelivery::new(InMemorySendGridClient::new(api_key.as_str()));
        factory = factory.with_sendgrid(Arc::new(Mailer::new(sendgrid, from, logger.clone())));
    }

    if let Some(mailgun) = &config.mailgun {
        let client = InMemoryMailgunClient::new(mailgun.api_key.as_str());
        let delivery = MailgunDelivery::new(client, mailgun.domain.as_str());
        factory = factory.with_mailgun(Arc::new(Mailer::new(delivery, from, logger)));
    }

    factory
}

/// Everything an operator command needs.
pub struct App {
    factory: EmailServiceFactory,
    products: ProductService<InMemoryProductRepository, SyncEventDispatcher>,
    get_all: GetAllProductsHandler<InMemoryProductRepository>,
    get_by_id: GetProductByIdHandler<InMemoryProductRepository>,
}

impl App {
    /// Builds the application with a tracing-backed logger.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::with_logger(config, Arc::new(TracingLogger))
    }

    /// Builds the application with the given logger.
    ///
    /// Fails if `MAIL_SERVICE` names an unknown or unconfigured backend.
    pub fn with_logger(config: &Config, logger: Arc<dyn Logger>) -> anyhow::Result<Self> {
        let factory = build_factory(config, logger);

        let sender = factory
            .create(&config.mail_service)
            .with_context(|| format!("MAIL_SERVICE={}", config.mail_service))?;
        let listener = ProductCreatedListener::new(sender, config.notify_recipient.as_str());

        let policy = if config.isolate_notification_failures {
            FailurePolicy::Isolate
        } else {
            FailurePolicy::Propagate
        };
        let dispatcher = SyncEventDispatcher::new()
            .with_policy(policy)
            .with_listener(Arc::new(listener));

        let repository = InMemoryProductRepository::new();

        Ok(Self {
            factory,
            products: ProductService::new(repository.clone(), dispatcher),
            get_all: GetAllProductsHandler::new(repository.clone()),
            get_by_id: GetProductByIdHandler::new(repository),
        })
    }

    /// Returns the email factory.
    pub fn factory(&self) -> &EmailServiceFactory {
        &self.factory
    }

    /// Lists every backend with its configuration state.
    pub fn email_services(&self) -> Vec<ServiceStatus> {
        EmailService::ALL
            .into_iter()
            .map(|service| ServiceStatus {
                name: service.as_str(),
                description: service.description(),
                configured: self.factory.is_configured(service),
            })
            .collect()
    }

    /// Sends one email through the requested backend.
    #[tracing::instrument(skip(self, args), fields(service = %args.service))]
    pub async fn send_test_email(&self, args: &TestEmailArgs) -> anyhow::Result<()> {
        let sender = self.factory.create(&args.service)?;
        sender.send(&args.to, &args.subject, &args.body).await?;
        Ok(())
    }

    /// Creates a sample product, edits one variant and returns the catalog.
    #[tracing::instrument(skip(self))]
    pub async fn run_demo(&self) -> anyhow::Result<Vec<ProductResponse>> {
        let created = self
            .products
            .create_product(
                CreateProduct::new("Camiseta", "Camiseta de algodón", 19.99, 10)
                    .with_variant(
                        VariantSpec::new("Camiseta Azul M", 21.99, 5).with_image("imagen.jpg"),
                    )
                    .with_variant(VariantSpec::inheriting("Camiseta Roja L")),
            )
            .await?;

        let product_id = created.product.id();
        if let Some(variant) = created.product.variants().last() {
            self.products
                .update_variant(UpdateVariant::new(product_id, variant.id()).with_stock(3))
                .await?;
        }

        let found = self.get_by_id.handle(GetProductById::new(product_id)).await?;
        tracing::info!(found = found.is_some(), "demo product stored");

        Ok(self.get_all.handle(GetAllProducts).await?)
    }
}
