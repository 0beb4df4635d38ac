mod common;

use devtoolhub_api::{
    dto::{
        categories::CreateCategoryRequest,
        products::{CreateProductRequest, UpdateProductRequest},
    },
    error::AppError,
    models::Product,
    services::catalog_service,
};
use rust_decimal::Decimal;
use serde_json::json;

use common::{memory_state, product_json};

fn create_request(value: serde_json::Value) -> CreateProductRequest {
    serde_json::from_value(value).expect("valid request body")
}

#[tokio::test]
async fn product_lifecycle() -> anyhow::Result<()> {
    let state = memory_state();

    let mut body = product_json("Gaming Laptop Pro", "Laptops", "1200.00");
    body["originalPrice"] = json!("1500.00");
    let created = catalog_service::create_product(&state, create_request(body))
        .await?
        .data
        .expect("product");
    assert_eq!(created.discount, 20);
    assert_eq!(created.rating, Decimal::new(50, 1));
    assert!(created.is_active);
    assert!(!created.is_featured);

    let update: UpdateProductRequest = serde_json::from_value(json!({ "price": "1350.00" }))?;
    let updated = catalog_service::update_product(&state, created.id, update)
        .await?
        .data
        .expect("product");
    assert_eq!(updated.name, "Gaming Laptop Pro");
    assert_eq!(updated.discount, 10);

    let listed = catalog_service::list_active_products(&state).await?;
    assert_eq!(listed.meta.and_then(|m| m.total), Some(1));

    catalog_service::delete_product(&state, created.id).await?;
    let missing = catalog_service::get_product(&state, created.id).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    // Deleting again is still a success.
    let again = catalog_service::delete_product(&state, created.id).await?;
    assert_eq!(again.data.expect("body")["removed"], json!(false));
    Ok(())
}

#[tokio::test]
async fn stored_product_matches_input_and_patch_touches_only_given_fields() -> anyhow::Result<()> {
    let state = memory_state();

    let body = json!({
        "name": "Mechanical Keyboard",
        "description": "Hot-swappable switches and a USB-C cable",
        "category": "Peripherals",
        "price": "120.00",
        "originalPrice": "160.00",
        "rating": "4.2",
        "imageUrl": "https://example.com/kb.png",
        "affiliateUrl": "https://example.com/go/kb",
        "isActive": true,
        "isFeatured": true,
    });
    let created = catalog_service::create_product(&state, create_request(body))
        .await?
        .data
        .expect("product");
    let expected = Product {
        id: created.id,
        name: "Mechanical Keyboard".into(),
        description: "Hot-swappable switches and a USB-C cable".into(),
        category: "Peripherals".into(),
        price: Decimal::new(12000, 2),
        original_price: Some(Decimal::new(16000, 2)),
        discount: 25,
        rating: Decimal::new(42, 1),
        image_url: "https://example.com/kb.png".into(),
        affiliate_url: "https://example.com/go/kb".into(),
        is_active: true,
        is_featured: true,
        created_at: created.created_at,
    };
    assert_eq!(created, expected);

    let fetched = catalog_service::get_product(&state, created.id)
        .await?
        .data
        .expect("product");
    assert_eq!(fetched, expected);

    let update: UpdateProductRequest = serde_json::from_value(json!({ "isFeatured": false }))?;
    let updated = catalog_service::update_product(&state, created.id, update)
        .await?
        .data
        .expect("product");
    assert_eq!(
        updated,
        Product {
            is_featured: false,
            ..expected.clone()
        }
    );

    let empty: UpdateProductRequest = serde_json::from_value(json!({}))?;
    let unchanged = catalog_service::update_product(&state, created.id, empty)
        .await?
        .data
        .expect("product");
    assert_eq!(
        unchanged,
        Product {
            is_featured: false,
            ..expected
        }
    );
    Ok(())
}

#[tokio::test]
async fn inactive_products_are_hidden_from_listings_but_fetchable_by_id() -> anyhow::Result<()> {
    let state = memory_state();

    let mut body = product_json("Retired Keyboard", "Peripherals", "89.00");
    body["isActive"] = json!(false);
    let hidden = catalog_service::create_product(&state, create_request(body))
        .await?
        .data
        .expect("product");

    let listed = catalog_service::list_active_products(&state).await?.data.unwrap();
    assert!(listed.is_empty());

    let search = catalog_service::search_products(&state, Some("keyboard"))
        .await?
        .data
        .unwrap();
    assert!(search.is_empty());

    let fetched = catalog_service::get_product(&state, hidden.id).await?.data.unwrap();
    assert_eq!(fetched.name, "Retired Keyboard");
    Ok(())
}

#[tokio::test]
async fn featured_listing_respects_flag_and_limit() -> anyhow::Result<()> {
    let state = memory_state();

    for i in 0..4 {
        let mut body = product_json(&format!("Monitor {i}"), "Displays", "250.00");
        body["isFeatured"] = json!(i % 2 == 0);
        catalog_service::create_product(&state, create_request(body)).await?;
    }

    let featured = catalog_service::list_featured_products(&state, None)
        .await?
        .data
        .unwrap();
    assert_eq!(featured.len(), 2);
    assert!(featured.iter().all(|p| p.is_featured));

    let one = catalog_service::list_featured_products(&state, Some(1))
        .await?
        .data
        .unwrap();
    assert_eq!(one.len(), 1);

    let none = catalog_service::list_featured_products(&state, Some(0))
        .await?
        .data
        .unwrap();
    assert!(none.is_empty());
    Ok(())
}

#[tokio::test]
async fn search_matches_name_description_and_category_case_insensitively() -> anyhow::Result<()> {
    let state = memory_state();
    catalog_service::create_product(
        &state,
        create_request(product_json("Mechanical Keyboard", "Peripherals", "120.00")),
    )
    .await?;
    catalog_service::create_product(
        &state,
        create_request(product_json("Standing Desk", "Furniture", "480.00")),
    )
    .await?;

    let by_name = catalog_service::search_products(&state, Some("KEYBOARD"))
        .await?
        .data
        .unwrap();
    assert_eq!(by_name.len(), 1);

    let by_category = catalog_service::search_products(&state, Some("furni"))
        .await?
        .data
        .unwrap();
    assert_eq!(by_category[0].name, "Standing Desk");

    let by_description = catalog_service::search_products(&state, Some("everyday"))
        .await?
        .data
        .unwrap();
    assert_eq!(by_description.len(), 2);

    let blank = catalog_service::search_products(&state, Some("   ")).await;
    assert!(matches!(blank, Err(AppError::InvalidInput(_))));
    Ok(())
}

#[tokio::test]
async fn invalid_products_are_rejected() {
    let state = memory_state();

    let zero_price = create_request(product_json("Free Thing", "Misc", "0"));
    assert!(matches!(
        catalog_service::create_product(&state, zero_price).await,
        Err(AppError::InvalidInput(_))
    ));

    let mut bad_url = product_json("Bad Link", "Misc", "10.00");
    bad_url["affiliateUrl"] = json!("not a url");
    assert!(matches!(
        catalog_service::create_product(&state, create_request(bad_url)).await,
        Err(AppError::InvalidInput(_))
    ));

    let mut bad_rating = product_json("Overrated", "Misc", "10.00");
    bad_rating["rating"] = json!("5.5");
    assert!(matches!(
        catalog_service::create_product(&state, create_request(bad_rating)).await,
        Err(AppError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn updating_a_missing_product_is_not_found() -> anyhow::Result<()> {
    let state = memory_state();
    let update: UpdateProductRequest = serde_json::from_value(json!({ "name": "Ghost" }))?;
    let result = catalog_service::update_product(&state, 999, update).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn duplicate_category_returns_existing_row() -> anyhow::Result<()> {
    let state = memory_state();

    let request: CreateCategoryRequest = serde_json::from_value(json!({ "name": "Laptops" }))?;
    let first = catalog_service::create_category(&state, request).await?;
    let first = first.data.expect("category");
    assert!(!first.is_default);

    let request: CreateCategoryRequest = serde_json::from_value(json!({ "name": "Laptops" }))?;
    let second = catalog_service::create_category(&state, request).await?;
    assert_eq!(second.message, "Category already exists");
    assert_eq!(second.data.expect("category").id, first.id);

    let all = catalog_service::list_categories(&state).await?.data.unwrap();
    assert_eq!(all.len(), 1);
    Ok(())
}
