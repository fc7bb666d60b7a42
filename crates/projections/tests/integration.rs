//! Integration tests: ProductService commands → query handlers.

use domain::{
    CreateProduct, DeleteProduct, InMemoryProductRepository, ProductService, SyncEventDispatcher,
    UpdateProduct, UpdateVariant, VariantSpec,
};
use projections::{
    GetAllProducts, GetAllProductsHandler, GetProductById, GetProductByIdHandler, QueryHandler,
};

/// Helper to set up the service and both query handlers over one store.
fn setup() -> (
    ProductService<InMemoryProductRepository, SyncEventDispatcher>,
    GetAllProductsHandler<InMemoryProductRepository>,
    GetProductByIdHandler<InMemoryProductRepository>,
) {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo.clone(), SyncEventDispatcher::new());
    (
        service,
        GetAllProductsHandler::new(repo.clone()),
        GetProductByIdHandler::new(repo),
    )
}

fn camiseta() -> CreateProduct {
    CreateProduct::new("Camiseta", "Camiseta de algodón", 19.99, 10).with_variant(
        VariantSpec::new("Camiseta Azul M", 21.99, 5).with_image("imagen.jpg"),
    )
}

#[tokio::test]
async fn test_created_product_is_listed_verbatim() {
    let (service, get_all, _) = setup();
    service.create_product(camiseta()).await.unwrap();

    let products = get_all.handle(GetAllProducts).await.unwrap();

    assert_eq!(products.len(), 1);
    let product = &products[0];
    assert_eq!(product.name, "Camiseta");
    assert_eq!(product.description, "Camiseta de algodón");
    assert_eq!(product.price, 19.99);
    assert_eq!(product.stock, 10);

    assert_eq!(product.variants.len(), 1);
    let variant = &product.variants[0];
    assert_eq!(variant.name, "Camiseta Azul M");
    assert_eq!(variant.price, 21.99);
    assert_eq!(variant.stock, 5);
    assert_eq!(variant.image.as_deref(), Some("imagen.jpg"));
}

#[tokio::test]
async fn test_get_by_id_reflects_updates() {
    let (service, _, get_by_id) = setup();
    let created = service.create_product(camiseta()).await.unwrap().product;
    let variant_id = created.variants()[0].id();

    service
        .update_product(UpdateProduct::new(created.id()).with_description("Algodón orgánico"))
        .await
        .unwrap();
    service
        .update_variant(UpdateVariant::new(created.id(), variant_id).clear_image())
        .await
        .unwrap();

    let response = get_by_id
        .handle(GetProductById::parse(&created.id().to_string()).unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(response.description, "Algodón orgánico");
    assert_eq!(response.variants[0].id, variant_id.to_string());
    assert_eq!(response.variants[0].image, None);
}

#[tokio::test]
async fn test_deleted_product_is_absent() {
    let (service, get_all, get_by_id) = setup();
    let created = service.create_product(camiseta()).await.unwrap().product;

    service.delete_product(DeleteProduct::new(created.id())).await.unwrap();

    assert!(get_all.handle(GetAllProducts).await.unwrap().is_empty());
    assert!(
        get_by_id
            .handle(GetProductById::new(created.id()))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_variant_order_survives_replacement() {
    let (service, _, get_by_id) = setup();
    let created = service.create_product(camiseta()).await.unwrap().product;

    let specs = ["XS", "S", "M", "L", "XL"]
        .into_iter()
        .map(|size| VariantSpec::inheriting(format!("Camiseta {size}")))
        .collect();
    service
        .update_product(UpdateProduct::new(created.id()).with_variants(specs))
        .await
        .unwrap();

    let response = get_by_id
        .handle(GetProductById::new(created.id()))
        .await
        .unwrap()
        .unwrap();
    let names: Vec<_> = response.variants.iter().map(|v| v.name.as_str()).collect();

    assert_eq!(
        names,
        vec!["Camiseta XS", "Camiseta S", "Camiseta M", "Camiseta L", "Camiseta XL"]
    );
    assert!(response.variants.iter().all(|v| v.price == 19.99 && v.stock == 10));
}
