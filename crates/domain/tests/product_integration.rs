//! Integration tests for the product write side.
//!
//! These tests drive the catalog through `ProductService` and check the
//! stored state through the repository.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use domain::{
    CreateProduct, DeleteProduct, DomainError, EventListener, InMemoryProductRepository,
    ListenerError, Product, ProductEvent, ProductId, ProductRepository, ProductService,
    SyncEventDispatcher, UpdateProduct, UpdateVariant, VariantSpec,
};

type Service = ProductService<InMemoryProductRepository, SyncEventDispatcher>;

/// Helper to create a service together with a handle on its storage
fn create_service() -> (Service, InMemoryProductRepository) {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo.clone(), SyncEventDispatcher::new());
    (service, repo)
}

fn camiseta() -> CreateProduct {
    CreateProduct::new("Camiseta", "Camiseta de algodón", 19.99, 10).with_variant(
        VariantSpec::new("Camiseta Azul M", 21.99, 5).with_image("imagen.jpg"),
    )
}

async fn stored(repo: &InMemoryProductRepository, id: ProductId) -> Product {
    repo.find_by_id(&id).await.unwrap().unwrap()
}

mod create {
    use super::*;

    #[tokio::test]
    async fn camiseta_is_stored_verbatim() {
        let (service, repo) = create_service();
        service.create_product(camiseta()).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);

        let product = &all[0];
        assert_eq!(product.name().as_str(), "Camiseta");
        assert_eq!(product.description().as_str(), "Camiseta de algodón");
        assert_eq!(product.price().value(), 19.99);
        assert_eq!(product.stock(), 10);

        assert_eq!(product.variants().len(), 1);
        let variant = &product.variants()[0];
        assert_eq!(variant.name().as_str(), "Camiseta Azul M");
        assert_eq!(variant.price().value(), 21.99);
        assert_eq!(variant.stock(), 5);
        assert_eq!(variant.image(), Some("imagen.jpg"));
        assert_eq!(variant.product_id(), product.id());
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_case_sensitively() {
        let (service, repo) = create_service();
        service.create_product(camiseta()).await.unwrap();

        let err = service.create_product(camiseta()).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateName { .. }));
        assert!(err.is_client_error());

        service
            .create_product(CreateProduct::new("camiseta", "Minúsculas", 1.0, 1))
            .await
            .unwrap();
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn every_creation_gets_fresh_ids() {
        let (service, _) = create_service();
        let a = service.create_product(camiseta()).await.unwrap().product;
        let b = service
            .create_product(
                CreateProduct::new("Sudadera", "Con capucha", 35.0, 2)
                    .with_variant(VariantSpec::new("Sudadera Roja L", 35.0, 1)),
            )
            .await
            .unwrap()
            .product;

        assert_ne!(a.id(), b.id());
        assert_ne!(a.variants()[0].id(), b.variants()[0].id());
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn omitted_variants_are_kept_and_empty_variants_are_removed() {
        let (service, repo) = create_service();
        let id = service.create_product(camiseta()).await.unwrap().product.id();

        service
            .update_product(UpdateProduct::new(id).with_price(18.5))
            .await
            .unwrap();
        let kept = stored(&repo, id).await;
        assert_eq!(kept.variant_count(), 1);
        assert_eq!(kept.price().value(), 18.5);

        service
            .update_product(UpdateProduct::new(id).with_variants(vec![]))
            .await
            .unwrap();
        let wiped = stored(&repo, id).await;
        assert_eq!(wiped.variant_count(), 0);
        assert_eq!(repo.variant_count().await, 0);
    }

    #[tokio::test]
    async fn replaced_variants_get_new_ids() {
        let (service, repo) = create_service();
        let created = service.create_product(camiseta()).await.unwrap().product;
        let old_variant = created.variants()[0].id();

        service
            .update_product(UpdateProduct::new(created.id()).with_variants(vec![
                VariantSpec::new("Camiseta Azul M", 21.99, 5),
                VariantSpec::inheriting("Camiseta Verde S"),
            ]))
            .await
            .unwrap();

        let product = stored(&repo, created.id()).await;
        assert_eq!(product.variant_count(), 2);
        assert!(product.variant(&old_variant).is_none());
        assert_eq!(product.variants()[1].name().as_str(), "Camiseta Verde S");
        assert_eq!(product.variants()[1].price().value(), 19.99);
    }

    #[tokio::test]
    async fn rename_to_another_products_name_fails() {
        let (service, repo) = create_service();
        service.create_product(camiseta()).await.unwrap();
        let other = service
            .create_product(CreateProduct::new("Pantalón", "Vaquero", 40.0, 3))
            .await
            .unwrap()
            .product;

        let err = service
            .update_product(UpdateProduct::new(other.id()).with_name("Camiseta"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::DuplicateName { .. }));
        assert_eq!(stored(&repo, other.id()).await.name().as_str(), "Pantalón");
    }
}

mod update_variant {
    use super::*;

    #[tokio::test]
    async fn only_supplied_fields_change() {
        let (service, repo) = create_service();
        let created = service.create_product(camiseta()).await.unwrap().product;
        let variant_id = created.variants()[0].id();

        service
            .update_variant(UpdateVariant::new(created.id(), variant_id).with_name("Camiseta Azul L"))
            .await
            .unwrap();

        let product = stored(&repo, created.id()).await;
        let variant = product.variant(&variant_id).unwrap();
        assert_eq!(variant.name().as_str(), "Camiseta Azul L");
        assert_eq!(variant.price().value(), 21.99);
        assert_eq!(variant.stock(), 5);
        assert_eq!(variant.image(), Some("imagen.jpg"));
    }

    #[tokio::test]
    async fn negative_stock_is_rejected() {
        let (service, repo) = create_service();
        let created = service.create_product(camiseta()).await.unwrap().product;
        let variant_id = created.variants()[0].id();

        let err = service
            .update_variant(UpdateVariant::new(created.id(), variant_id).with_stock(-3))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(stored(&repo, created.id()).await, created);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn delete_removes_product_and_variants() {
        let (service, repo) = create_service();
        let id = service.create_product(camiseta()).await.unwrap().product.id();

        service.delete_product(DeleteProduct::new(id)).await.unwrap();

        assert!(repo.find_by_id(&id).await.unwrap().is_none());
        assert_eq!(repo.variant_count().await, 0);
    }

    #[tokio::test]
    async fn delete_unknown_product_fails() {
        let (service, _) = create_service();
        let id = ProductId::new();

        let err = service.delete_product(DeleteProduct::new(id)).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), format!("Product not found: {id}"));
    }
}

mod events {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<ProductEvent>>,
    }

    #[async_trait]
    impl EventListener for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        async fn handle(&self, event: &ProductEvent) -> Result<(), ListenerError> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn product_created_carries_denormalized_fields() {
        let recorder = Arc::new(Recorder::default());
        let service = ProductService::new(
            InMemoryProductRepository::new(),
            SyncEventDispatcher::new().with_listener(recorder.clone()),
        );

        let product = service.create_product(camiseta()).await.unwrap().product;

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        let ProductEvent::ProductCreated(data) = &events[0];
        assert_eq!(data.product_id, product.id());
        assert_eq!(data.product_name, "Camiseta");
        assert_eq!(data.product_description, "Camiseta de algodón");
        assert_eq!(data.product_price, 19.99);
        assert_eq!(data.product_stock, 10);
        assert_eq!(data.product, product);
    }
}

mod concurrency {
    use std::time::Duration;

    use domain::RepositoryError;

    use super::*;

    /// Repository whose reads take a few milliseconds, like a networked
    /// store, so concurrent handlers interleave between check and write.
    #[derive(Clone, Default)]
    struct SlowRepository {
        inner: InMemoryProductRepository,
    }

    impl SlowRepository {
        async fn latency() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[async_trait]
    impl ProductRepository for SlowRepository {
        async fn insert(&self, product: &mut Product) -> Result<(), RepositoryError> {
            self.inner.insert(product).await
        }

        async fn update(&self, product: &mut Product) -> Result<(), RepositoryError> {
            self.inner.update(product).await
        }

        async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
            Self::latency().await;
            self.inner.find_by_id(id).await
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
            Self::latency().await;
            self.inner.find_by_name(name).await
        }

        async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
            self.inner.find_all().await
        }

        async fn delete(&self, product: &Product) -> Result<(), RepositoryError> {
            self.inner.delete(product).await
        }
    }

    fn slow_service() -> (ProductService<SlowRepository, SyncEventDispatcher>, SlowRepository) {
        let repo = SlowRepository::default();
        let service = ProductService::new(repo.clone(), SyncEventDispatcher::new());
        (service, repo)
    }

    #[tokio::test]
    async fn concurrent_creates_with_same_name_store_one() {
        let (service, repo) = slow_service();

        let (first, second) = tokio::join!(
            service.create_product(CreateProduct::new("Camiseta", "a", 1.0, 1)),
            service.create_product(CreateProduct::new("Camiseta", "b", 1.0, 1)),
        );

        assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
        let err = first.err().or(second.err()).unwrap();
        assert!(matches!(err, DomainError::DuplicateName { ref name } if name == "Camiseta"));
        assert_eq!(repo.inner.len().await, 1);
    }

    #[tokio::test]
    async fn update_racing_delete_never_resurrects() {
        let (service, repo) = slow_service();
        let id = service.create_product(camiseta()).await.unwrap().product.id();

        let (updated, deleted) = tokio::join!(
            service.update_product(UpdateProduct::new(id).with_stock(5)),
            service.delete_product(DeleteProduct::new(id)),
        );

        assert!(
            updated.is_err() || deleted.is_err(),
            "update and delete cannot both win"
        );
        let present = repo.inner.find_by_id(&id).await.unwrap();
        match deleted {
            Ok(()) => {
                assert!(present.is_none());
                assert!(updated.unwrap_err().is_not_found());
            }
            Err(err) => {
                assert!(err.is_conflict());
                assert_eq!(present.unwrap().stock(), 5);
            }
        }
    }

    #[tokio::test]
    async fn stale_update_is_rejected_as_conflict() {
        let (service, repo) = slow_service();
        let id = service.create_product(camiseta()).await.unwrap().product.id();

        let (first, second) = tokio::join!(
            service.update_product(UpdateProduct::new(id).with_stock(1)),
            service.update_product(UpdateProduct::new(id).with_stock(2)),
        );

        assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
        let winner = first.as_ref().or(second.as_ref()).unwrap().product.stock();
        let err = first.err().or(second.err()).unwrap();
        assert!(err.is_conflict());
        assert_eq!(repo.inner.find_by_id(&id).await.unwrap().unwrap().stock(), winner);
    }
}
